//! Amount-tiered fraud risk scoring.
//!
//! The score is a step function of the payment amount, evaluated from the
//! highest tier down. A payment is flagged as fraudulent when its score
//! exceeds [`FRAUD_THRESHOLD`], which only the top tier reaches.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::money::{Amount, RiskScore};

/// Scores above this value mark a payment as fraudulent.
pub const FRAUD_THRESHOLD: RiskScore = 0.70;

/// Score tiers as `(exclusive lower bound, score)`, highest first.
const TIERS: [(Decimal, RiskScore); 3] = [
    (dec!(5000), 0.75),
    (dec!(1000), 0.45),
    (dec!(100), 0.15),
];

/// Outcome of scoring a single payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk score in the 0.0-1.0 range.
    pub score: RiskScore,
    /// True when the score exceeds [`FRAUD_THRESHOLD`].
    pub fraud_detected: bool,
}

/// Score a payment amount.
#[must_use]
pub fn assess(amount: Amount) -> RiskAssessment {
    let score = TIERS
        .iter()
        .find(|(floor, _)| amount > *floor)
        .map_or(0.0, |(_, score)| *score);
    let fraud_detected = score > FRAUD_THRESHOLD;

    info!(
        amount = %amount,
        risk_score = score,
        fraud_detected,
        "Fraud detection"
    );

    RiskAssessment {
        score,
        fraud_detected,
    }
}
