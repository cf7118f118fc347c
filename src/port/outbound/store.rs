//! Persistence port for transaction records.

use std::future::Future;

use crate::domain::{Transaction, TransactionId, TransactionStatus};
use crate::error::Result;

/// Storage operations for transactions.
///
/// The schema and encoding belong to the implementation; callers only rely
/// on the success/failure semantics of each operation.
pub trait TransactionStore: Send + Sync {
    /// Insert a new transaction. Fails if the record cannot be stored.
    fn insert(&self, transaction: &Transaction) -> impl Future<Output = Result<()>> + Send;

    /// Get a transaction by ID.
    fn find_by_id(
        &self,
        id: &TransactionId,
    ) -> impl Future<Output = Result<Option<Transaction>>> + Send;

    /// List transactions newest first.
    fn list_recent(
        &self,
        limit: usize,
        offset: usize,
    ) -> impl Future<Output = Result<Vec<Transaction>>> + Send;

    /// Set the status of a stored transaction and bump its update time.
    ///
    /// Returns false when no transaction has the given ID.
    fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> impl Future<Output = Result<bool>> + Send;
}
