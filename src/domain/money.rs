//! Monetary types for amount representation.

use rust_decimal::Decimal;

/// Monetary amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Probability-like risk score in the 0.0-1.0 range.
pub type RiskScore = f64;
