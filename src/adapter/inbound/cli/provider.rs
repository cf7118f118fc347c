//! Provider catalogue listing.

use rust_decimal_macros::dec;
use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::provider::PAYPAL_THRESHOLD;
use crate::domain::Provider;

#[derive(Tabled)]
struct ProviderRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Fee")]
    fee: String,
    #[tabled(rename = "Fee on 100")]
    sample: String,
    #[tabled(rename = "Available")]
    available: &'static str,
}

fn fee_label(provider: Provider) -> String {
    let schedule = provider.fee_schedule();
    format!("{}% + {}", (schedule.rate * dec!(100)).normalize(), schedule.fixed)
}

/// List providers with their fee schedules.
pub fn list() {
    if output::is_json() {
        let providers: Vec<_> = Provider::ALL
            .iter()
            .map(|p| {
                json!({
                    "name": p.as_str(),
                    "fee_rate": p.fee_schedule().rate,
                    "fee_fixed": p.fee_schedule().fixed,
                    "available": p.is_available(),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "providers",
            "routing_threshold": PAYPAL_THRESHOLD,
            "providers": providers,
        }));
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Payment providers");

    let rows: Vec<ProviderRow> = Provider::ALL
        .iter()
        .map(|p| ProviderRow {
            name: p.as_str(),
            fee: fee_label(*p),
            sample: p.fee_for(dec!(100)).to_string(),
            available: if p.is_available() { "yes" } else { "no" },
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::field(
        "Routing",
        format!("amounts above {PAYPAL_THRESHOLD} go to paypal, the rest to stripe"),
    );
}
