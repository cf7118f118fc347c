//! Event transport port.
//!
//! A transport moves opaque message bodies to named durable destinations.
//! It is owned by the event publisher, which serializes access to it.

use async_trait::async_trait;

use crate::error::Result;

/// Connection to a durable message sink.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Ensure a durable destination with this name exists. Idempotent.
    async fn declare(&self, destination: &str) -> Result<()>;

    /// Hand a message body to the transport without waiting for delivery.
    async fn send(&self, destination: &str, body: &[u8]) -> Result<()>;

    /// Close the underlying channel and connection.
    async fn close(&self) -> Result<()>;
}
