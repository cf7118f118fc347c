//! Inbound (driving) ports consumed by inbound adapters.
//!
//! The CLI and any request-handling layer drive the application through
//! these traits.

pub mod payment;
