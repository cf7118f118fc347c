//! Payment providers and amount-based routing.
//!
//! Smaller payments go to Stripe, larger ones to PayPal. The routing rule is a
//! pure function of the amount; the fee schedule is informational and used by
//! the provider catalogue.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::TransactionId;
use super::money::Amount;

/// Amount above which payments are routed to PayPal.
pub const PAYPAL_THRESHOLD: Decimal = dec!(1000);

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Stripe card processing.
    Stripe,
    /// PayPal wallet processing.
    Paypal,
}

/// Percentage plus fixed fee charged by a provider per transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    /// Fraction of the amount, e.g. 0.029 for 2.9%.
    pub rate: Decimal,
    /// Flat fee added to every transaction.
    pub fixed: Decimal,
}

impl Provider {
    /// All known providers in display order.
    pub const ALL: [Provider; 2] = [Provider::Paypal, Provider::Stripe];

    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Provider::Stripe => "stripe",
            Provider::Paypal => "paypal",
        }
    }

    /// Published fee schedule for this provider.
    #[must_use]
    pub const fn fee_schedule(&self) -> FeeSchedule {
        match self {
            Provider::Stripe => FeeSchedule {
                rate: dec!(0.029),
                fixed: dec!(0.30),
            },
            Provider::Paypal => FeeSchedule {
                rate: dec!(0.034),
                fixed: dec!(0.30),
            },
        }
    }

    /// Fee charged for processing `amount`, rounded to cents.
    #[must_use]
    pub fn fee_for(&self, amount: Amount) -> Decimal {
        let schedule = self.fee_schedule();
        (amount * schedule.rate + schedule.fixed).round_dp(2)
    }

    /// Provider-side reference assigned when a charge is submitted.
    #[must_use]
    pub fn reference_for(&self, id: &TransactionId) -> String {
        format!("{}_{}", self.as_str(), id)
    }

    /// Whether the provider is currently accepting payments.
    ///
    /// There is no health endpoint integration; providers are assumed up.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        true
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stripe" => Ok(Provider::Stripe),
            "paypal" => Ok(Provider::Paypal),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

/// Select the provider for a payment of `amount`.
///
/// Total over non-negative amounts: anything above [`PAYPAL_THRESHOLD`] goes
/// to PayPal, everything else to Stripe.
#[must_use]
pub fn route(amount: Amount) -> Provider {
    if amount > PAYPAL_THRESHOLD {
        Provider::Paypal
    } else {
        Provider::Stripe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_route_to_stripe() {
        assert_eq!(route(dec!(0)), Provider::Stripe);
        assert_eq!(route(dec!(50)), Provider::Stripe);
        assert_eq!(route(dec!(1000)), Provider::Stripe);
    }

    #[test]
    fn large_amounts_route_to_paypal() {
        assert_eq!(route(dec!(1000.01)), Provider::Paypal);
        assert_eq!(route(dec!(2000)), Provider::Paypal);
        assert_eq!(route(dec!(6000)), Provider::Paypal);
    }

    #[test]
    fn provider_round_trips_through_str() {
        for provider in Provider::ALL {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), provider);
        }
        assert!(matches!(
            "adyen".parse::<Provider>(),
            Err(DomainError::UnknownProvider(_))
        ));
    }

    #[test]
    fn fees_follow_schedule() {
        assert_eq!(Provider::Stripe.fee_for(dec!(100)), dec!(3.20));
        assert_eq!(Provider::Paypal.fee_for(dec!(100)), dec!(3.70));
    }

    #[test]
    fn reference_is_prefixed_with_provider() {
        let id = TransactionId::from("abc");
        assert_eq!(Provider::Paypal.reference_for(&id), "paypal_abc");
    }
}
