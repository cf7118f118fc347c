//! Handlers for the transaction commands: `pay`, `show`, `list`, `status`,
//! and `settle`.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{ListArgs, PayArgs, SettleArgs};
use super::output;
use crate::domain::error::DomainError;
use crate::domain::{Metadata, PaymentRequest, Transaction, TransactionId, TransactionStatus};
use crate::error::{Error, Result};
use crate::port::inbound::payment::{Page, PaymentService};
use crate::port::outbound::store::TransactionStore;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            user: txn.user_id.to_string(),
            amount: format!("{} {}", txn.amount, txn.currency),
            provider: txn.provider.to_string(),
            status: txn.status.to_string(),
            risk: format!("{:.2}", txn.risk_score),
            created: txn.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Parse `KEY=VALUE` pairs. Values that parse as JSON keep their type,
/// anything else is stored as a string.
pub fn parse_metadata(entries: &[String]) -> Result<Metadata> {
    let mut metadata = Metadata::new();
    for entry in entries {
        let Some((key, raw)) = entry.split_once('=') else {
            return Err(Error::Parse(format!("metadata entry '{entry}' is not KEY=VALUE")));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Parse(format!("metadata entry '{entry}' has an empty key")));
        }
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        metadata.insert(key.to_string(), value);
    }
    Ok(metadata)
}

/// Execute `pay`.
pub async fn pay<P: PaymentService>(service: &P, args: PayArgs) -> Result<()> {
    let metadata = parse_metadata(&args.metadata)?;
    let mut request = PaymentRequest::new(args.user, args.amount, args.currency);
    if let Some(description) = args.description {
        request = request.with_description(description);
    }
    if !metadata.is_empty() {
        request = request.with_metadata(metadata);
    }

    let txn = service.create_transaction(request).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "pay", "transaction": txn }));
        return Ok(());
    }

    output::success("Payment accepted");
    print_transaction(&txn);
    if txn.fraud_detected {
        output::warning("Flagged as likely fraud");
    }
    Ok(())
}

/// Execute `show`.
pub async fn show<P: PaymentService>(service: &P, id: &str) -> Result<()> {
    let id = TransactionId::from(id);
    let txn = service
        .get_transaction(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("transaction {id}")))?;

    if output::is_json() {
        output::json_output(json!({ "command": "show", "transaction": txn }));
        return Ok(());
    }

    print_transaction(&txn);
    Ok(())
}

/// Execute `list`.
pub async fn list<P: PaymentService>(service: &P, args: ListArgs) -> Result<()> {
    let page = Page::new(args.limit, args.offset);
    let transactions = service.list_transactions(page).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "list",
            "limit": page.limit,
            "offset": page.offset,
            "transactions": transactions,
        }));
        return Ok(());
    }

    output::section("Transactions");
    if transactions.is_empty() {
        output::field("Found", output::muted("none"));
        return Ok(());
    }
    let rows: Vec<TransactionRow> = transactions.iter().map(TransactionRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// Execute `status`.
pub async fn status<P: PaymentService>(service: &P, id: &str) -> Result<()> {
    let id = TransactionId::from(id);
    let status = service
        .transaction_status(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("transaction {id}")))?;

    if output::is_json() {
        output::json_output(json!({
            "command": "status",
            "id": id,
            "status": status,
        }));
        return Ok(());
    }

    output::field("ID", &id);
    output::field("Status", styled_status(status));
    Ok(())
}

/// Execute `settle`.
///
/// Writes straight to the store; cached copies keep their old status until
/// they expire. Only `processing` transactions can be settled.
pub async fn settle<S: TransactionStore>(store: &S, args: SettleArgs) -> Result<()> {
    let id = TransactionId::from(args.id);
    let status = TransactionStatus::from(args.outcome);

    let Some(current) = store.find_by_id(&id).await? else {
        return Err(Error::NotFound(format!("transaction {id}")));
    };
    if current.status.is_final() {
        return Err(DomainError::AlreadySettled {
            status: current.status,
        }
        .into());
    }

    if !store.update_status(&id, status).await? {
        return Err(Error::NotFound(format!("transaction {id}")));
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "settle",
            "id": id,
            "status": status,
        }));
        return Ok(());
    }

    output::success(&format!("Transaction {id} marked {status}"));
    Ok(())
}

fn print_transaction(txn: &Transaction) {
    let reference = txn
        .provider_txn_id
        .clone()
        .unwrap_or_else(|| txn.provider.reference_for(&txn.id));

    output::field("ID", &txn.id);
    output::field("User", &txn.user_id);
    output::field("Amount", format!("{} {}", txn.amount, txn.currency));
    output::field("Status", styled_status(txn.status));
    output::field("Provider", txn.provider);
    output::field("Reference", output::muted(reference));
    output::field("Fee", format!("{} {}", txn.provider.fee_for(txn.amount), txn.currency));
    output::field("Risk score", format!("{:.2}", txn.risk_score));
    if !txn.description.is_empty() {
        output::field("Description", &txn.description);
    }
    if !txn.metadata.is_empty() {
        let metadata = serde_json::to_string(&txn.metadata).unwrap_or_default();
        output::field("Metadata", metadata);
    }
    output::field("Created", txn.created_at.to_rfc3339());
}

fn styled_status(status: TransactionStatus) -> String {
    match status {
        TransactionStatus::Completed => output::positive(status),
        TransactionStatus::Failed | TransactionStatus::Blocked => output::negative(status),
        TransactionStatus::Processing => status.to_string(),
    }
}
