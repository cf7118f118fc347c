//! Payment requests and transaction records.
//!
//! A [`Transaction`] is created once at intake with status
//! [`TransactionStatus::Processing`]. Later status changes are made by
//! collaborators through the persistence layer.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{TransactionId, UserId};
use super::money::{Amount, RiskScore};
use super::provider::Provider;
use super::risk::RiskAssessment;

/// Arbitrary caller-supplied key/value metadata.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Accepted at intake, awaiting provider settlement.
    Processing,
    /// Settled by the provider.
    Completed,
    /// Rejected or errored at the provider.
    Failed,
    /// Stopped by fraud review.
    Blocked,
}

impl TransactionStatus {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Processing => "processing",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Blocked => "blocked",
        }
    }

    /// Returns true once the transaction can no longer change.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Processing)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(TransactionStatus::Processing),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            "blocked" => Ok(TransactionStatus::Blocked),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Incoming payment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub user_id: UserId,
    pub amount: Amount,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl PaymentRequest {
    /// Create a request without description or metadata.
    pub fn new(user_id: impl Into<UserId>, amount: Amount, currency: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            currency: currency.into(),
            description: None,
            metadata: None,
        }
    }

    /// Attach a free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach caller metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check the request against intake rules.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the user id is blank, the amount is not
    /// positive, or the currency is not a three-letter alphabetic code.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.is_blank() {
            return Err(DomainError::EmptyUserId);
        }
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        let code = self.currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency {
                code: self.currency.clone(),
            });
        }
        Ok(())
    }
}

/// Persisted payment transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: Amount,
    pub currency: String,
    pub status: TransactionStatus,
    pub risk_score: RiskScore,
    pub fraud_detected: bool,
    pub provider: Provider,
    #[serde(default)]
    pub provider_txn_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Assemble a freshly accepted transaction in the `processing` state.
    #[must_use]
    pub fn open(
        id: TransactionId,
        request: PaymentRequest,
        risk: RiskAssessment,
        provider: Provider,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: request.user_id,
            amount: request.amount,
            currency: request.currency.trim().to_ascii_uppercase(),
            status: TransactionStatus::Processing,
            risk_score: risk.score,
            fraud_detected: risk.fraud_detected,
            provider,
            provider_txn_id: None,
            description: request.description.unwrap_or_default(),
            metadata: request.metadata.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn validate_accepts_well_formed_request() {
        let request = PaymentRequest::new("user-1", dec!(25.00), "usd");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_user() {
        let request = PaymentRequest::new(" ", dec!(25.00), "USD");
        assert_eq!(request.validate(), Err(DomainError::EmptyUserId));
    }

    #[test]
    fn validate_rejects_zero_and_negative_amounts() {
        for amount in [dec!(0), dec!(-1)] {
            let request = PaymentRequest::new("user-1", amount, "USD");
            assert!(matches!(
                request.validate(),
                Err(DomainError::NonPositiveAmount { .. })
            ));
        }
    }

    #[test]
    fn validate_rejects_malformed_currency() {
        for code in ["", "US", "USDT", "U5D"] {
            let request = PaymentRequest::new("user-1", dec!(1), code);
            assert!(matches!(
                request.validate(),
                Err(DomainError::InvalidCurrency { .. })
            ));
        }
    }

    #[test]
    fn open_starts_processing_with_request_fields() {
        let mut metadata = Metadata::new();
        metadata.insert("order".into(), serde_json::json!(42));
        let request = PaymentRequest::new("user-1", dec!(75), "eur")
            .with_description("coffee")
            .with_metadata(metadata.clone());
        let now = Utc::now();

        let txn = Transaction::open(
            TransactionId::from("t-1"),
            request,
            RiskAssessment {
                score: 0.0,
                fraud_detected: false,
            },
            Provider::Stripe,
            now,
        );

        assert_eq!(txn.status, TransactionStatus::Processing);
        assert_eq!(txn.currency, "EUR");
        assert_eq!(txn.description, "coffee");
        assert_eq!(txn.metadata, metadata);
        assert_eq!(txn.created_at, txn.updated_at);
        assert!(txn.provider_txn_id.is_none());
    }

    #[test]
    fn status_labels_round_trip() {
        for status in [
            TransactionStatus::Processing,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
            TransactionStatus::Blocked,
        ] {
            assert_eq!(status.as_str().parse::<TransactionStatus>().unwrap(), status);
        }
        assert!(!TransactionStatus::Processing.is_final());
        assert!(TransactionStatus::Blocked.is_final());
    }

    #[test]
    fn transaction_serializes_with_lowercase_labels() {
        let txn = Transaction::open(
            TransactionId::from("t-2"),
            PaymentRequest::new("user-2", dec!(2000), "USD"),
            RiskAssessment {
                score: 0.45,
                fraud_detected: false,
            },
            Provider::Paypal,
            Utc::now(),
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["status"], "processing");
        assert_eq!(json["provider"], "paypal");
        assert_eq!(json["id"], "t-2");
    }
}
