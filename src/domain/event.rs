//! Lifecycle events emitted by the payment pipeline.

use super::transaction::Transaction;

/// Event type label for newly created payments.
pub const PAYMENT_CREATED: &str = "payment.created";

/// Domain events published to the event sink.
///
/// Each variant carries its full payload; the event type label doubles as
/// the destination queue name.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// A payment was accepted and persisted.
    PaymentCreated(Transaction),
}

impl DomainEvent {
    /// Event type label, e.g. `payment.created`.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::PaymentCreated(_) => PAYMENT_CREATED,
        }
    }

    /// Payload carried by the event.
    #[must_use]
    pub fn transaction(&self) -> &Transaction {
        match self {
            DomainEvent::PaymentCreated(txn) => txn,
        }
    }
}
