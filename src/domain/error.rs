//! Domain validation errors for payment types.
//!
//! These errors are returned when an incoming payment request or a stored
//! value violates a domain rule.
//!
//! # Examples
//!
//! ```
//! use sentinelpay::domain::error::DomainError;
//! use sentinelpay::domain::transaction::PaymentRequest;
//! use rust_decimal_macros::dec;
//!
//! let request = PaymentRequest::new("user-1", dec!(0), "USD");
//! assert!(matches!(request.validate(), Err(DomainError::NonPositiveAmount { .. })));
//! ```

use thiserror::Error;

use super::transaction::TransactionStatus;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Every payment must belong to a user.
    #[error("user id cannot be empty")]
    EmptyUserId,

    /// Payment amounts must be strictly positive.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The invalid amount that was provided.
        amount: rust_decimal::Decimal,
    },

    /// Currency must be a three-letter alphabetic code.
    #[error("invalid currency code '{code}'")]
    InvalidCurrency {
        /// The rejected currency code.
        code: String,
    },

    /// A stored or supplied status label is not recognised.
    #[error("unknown transaction status '{0}'")]
    UnknownStatus(String),

    /// A stored or supplied provider label is not recognised.
    #[error("unknown payment provider '{0}'")]
    UnknownProvider(String),

    /// Final transactions cannot be settled again.
    #[error("transaction is already {status}")]
    AlreadySettled {
        /// The final status already recorded.
        status: TransactionStatus,
    },
}
