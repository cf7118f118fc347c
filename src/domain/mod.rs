//! Payment domain: identifiers, records, and the pure scoring and routing
//! policies.

pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod provider;
pub mod risk;
pub mod transaction;

pub use event::DomainEvent;
pub use id::{TransactionId, UserId};
pub use money::{Amount, RiskScore};
pub use provider::Provider;
pub use risk::RiskAssessment;
pub use transaction::{Metadata, PaymentRequest, Transaction, TransactionStatus};
