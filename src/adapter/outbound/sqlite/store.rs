//! SQLite transaction store implementation.
//!
//! Provides persistent storage for transaction records using SQLite and
//! Diesel ORM.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::TransactionRow;
use crate::adapter::outbound::sqlite::database::schema::transactions;
use crate::domain::{Metadata, Provider, Transaction, TransactionId, TransactionStatus, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::store::TransactionStore;

/// SQLite-backed transaction store.
pub struct SqliteTransactionStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteTransactionStore {
    /// Create a new SQLite transaction store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn connection(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    fn to_row(transaction: &Transaction) -> Result<TransactionRow> {
        Ok(TransactionRow {
            id: transaction.id.to_string(),
            user_id: transaction.user_id.to_string(),
            amount: transaction.amount.to_string(),
            currency: transaction.currency.clone(),
            status: transaction.status.as_str().to_string(),
            risk_score: transaction.risk_score,
            fraud_detected: transaction.fraud_detected,
            provider: transaction.provider.as_str().to_string(),
            provider_txn_id: transaction.provider_txn_id.clone(),
            description: transaction.description.clone(),
            metadata: serde_json::to_string(&transaction.metadata)
                .map_err(|e| Error::Parse(e.to_string()))?,
            created_at: format_timestamp(transaction.created_at),
            updated_at: format_timestamp(transaction.updated_at),
        })
    }

    fn from_row(row: TransactionRow) -> Result<Transaction> {
        let amount = Decimal::from_str(&row.amount).map_err(|e| Error::Parse(e.to_string()))?;
        let status = TransactionStatus::from_str(&row.status)?;
        let provider = Provider::from_str(&row.provider)?;
        let metadata: Metadata =
            serde_json::from_str(&row.metadata).map_err(|e| Error::Parse(e.to_string()))?;

        Ok(Transaction {
            id: TransactionId::from(row.id),
            user_id: UserId::new(row.user_id),
            amount,
            currency: row.currency,
            status,
            risk_score: row.risk_score,
            fraud_detected: row.fraud_detected,
            provider,
            provider_txn_id: row.provider_txn_id,
            description: row.description,
            metadata,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}

impl TransactionStore for SqliteTransactionStore {
    async fn insert(&self, transaction: &Transaction) -> Result<()> {
        let row = Self::to_row(transaction)?;
        let mut conn = self.connection()?;

        diesel::insert_into(transactions::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let mut conn = self.connection()?;

        let row: Option<TransactionRow> = transactions::table
            .find(id.as_str())
            .select(TransactionRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn list_recent(&self, limit: usize, offset: usize) -> Result<Vec<Transaction>> {
        let mut conn = self.connection()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let rows: Vec<TransactionRow> = transactions::table
            .order((transactions::created_at.desc(), transactions::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(TransactionRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn update_status(&self, id: &TransactionId, status: TransactionStatus) -> Result<bool> {
        let mut conn = self.connection()?;

        let updated = diesel::update(transactions::table.find(id.as_str()))
            .set((
                transactions::status.eq(status.as_str()),
                transactions::updated_at.eq(format_timestamp(Utc::now())),
            ))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(updated > 0)
    }
}
