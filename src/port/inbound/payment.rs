//! Payment intake and lookup use cases.

use std::future::Future;

use crate::domain::{PaymentRequest, Transaction, TransactionId, TransactionStatus};
use crate::error::Result;

/// Default page size for transaction listings.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Largest accepted page size for transaction listings.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Paging window for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    /// Build a page from optional caller input.
    ///
    /// Limits outside `1..=MAX_PAGE_LIMIT` fall back to the default.
    #[must_use]
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        let limit = limit
            .filter(|l| (1..=MAX_PAGE_LIMIT).contains(l))
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        Self {
            limit,
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Operations exposed to the request-handling layer.
pub trait PaymentService: Send + Sync {
    /// Score, route, persist, announce, and cache a new payment.
    fn create_transaction(
        &self,
        request: PaymentRequest,
    ) -> impl Future<Output = Result<Transaction>> + Send;

    /// Look up a transaction, cache first.
    fn get_transaction(
        &self,
        id: &TransactionId,
    ) -> impl Future<Output = Result<Option<Transaction>>> + Send;

    /// List stored transactions newest first.
    fn list_transactions(&self, page: Page) -> impl Future<Output = Result<Vec<Transaction>>> + Send;

    /// Current persisted status of a transaction.
    fn transaction_status(
        &self,
        id: &TransactionId,
    ) -> impl Future<Output = Result<Option<TransactionStatus>>> + Send;
}
