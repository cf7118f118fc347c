//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::transactions;

/// Database row for a transaction.
///
/// Amounts are stored as decimal text, metadata as a JSON object, and
/// timestamps as fixed-width RFC 3339 UTC strings so they sort correctly.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub currency: String,
    pub status: String,
    pub risk_score: f64,
    pub fraud_detected: bool,
    pub provider: String,
    pub provider_txn_id: Option<String>,
    pub description: String,
    pub metadata: String,
    pub created_at: String,
    pub updated_at: String,
}
