//! Best-effort domain event publisher.
//!
//! The publisher either owns a connected [`EventTransport`] or runs in
//! fallback mode. Fallback is entered when the transport cannot be reached
//! at construction and lasts for the life of the publisher: every publish is
//! then a logged no-op that reports success. There is no reconnection.
//!
//! Publishes are serialized through a single async lock around the
//! transport, so at most one publish is in flight at a time. Delivery is
//! at-most-once: `Ok(())` means the message was handed to the transport.

use std::future::Future;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::DomainEvent;
use crate::error::Result;
use crate::port::outbound::transport::EventTransport;

enum Mode {
    /// `None` once the publisher has been closed.
    Connected(Mutex<Option<Box<dyn EventTransport>>>),
    Fallback,
}

/// Publishes domain events to a durable sink, or nowhere in fallback mode.
pub struct EventPublisher {
    mode: Mode,
}

impl EventPublisher {
    /// Await a transport connection, falling back permanently on failure.
    pub async fn establish<T, F>(connect: F) -> Self
    where
        T: EventTransport + 'static,
        F: Future<Output = Result<T>>,
    {
        match connect.await {
            Ok(transport) => {
                info!("Event publisher connected");
                Self::with_transport(Box::new(transport))
            }
            Err(e) => {
                warn!(error = %e, "Event sink unreachable, publishing to fallback sink");
                Self::fallback()
            }
        }
    }

    /// Publisher backed by an already connected transport.
    #[must_use]
    pub fn with_transport(transport: Box<dyn EventTransport>) -> Self {
        Self {
            mode: Mode::Connected(Mutex::new(Some(transport))),
        }
    }

    /// Publisher that accepts and drops every event.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            mode: Mode::Fallback,
        }
    }

    /// Returns true when running without a transport.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.mode, Mode::Fallback)
    }

    /// Publish a payload to the destination named `event_type`.
    ///
    /// # Errors
    ///
    /// In connected mode, returns an error if the payload cannot be
    /// serialized or the transport rejects the declare or send. Fallback
    /// mode never errors.
    pub async fn publish_event<T>(&self, event_type: &str, payload: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let Mode::Connected(transport) = &self.mode else {
            info!(event_type, "Event published to fallback sink");
            return Ok(());
        };

        let guard = transport.lock().await;
        let Some(transport) = guard.as_ref() else {
            info!(event_type, "Publisher closed, event dropped");
            return Ok(());
        };

        let body = serde_json::to_vec(payload)?;
        transport.declare(event_type).await?;
        transport.send(event_type, &body).await?;

        debug!(event_type, bytes = body.len(), "Event published");
        Ok(())
    }

    /// Publish a typed domain event.
    ///
    /// # Errors
    ///
    /// See [`EventPublisher::publish_event`].
    pub async fn publish(&self, event: &DomainEvent) -> Result<()> {
        self.publish_event(event.event_type(), event.transaction())
            .await
    }

    /// Close the transport if one is open. No-op in fallback mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to close cleanly.
    pub async fn close(&self) -> Result<()> {
        let Mode::Connected(transport) = &self.mode else {
            return Ok(());
        };

        let transport = transport.lock().await.take();
        if let Some(transport) = transport {
            transport.close().await?;
            info!("Event publisher closed");
        }
        Ok(())
    }
}
