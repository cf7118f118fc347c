//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: transaction storage
//! and the durable event transport.

pub mod store;
pub mod transport;
