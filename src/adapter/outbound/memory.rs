//! In-process transaction store.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{Transaction, TransactionId, TransactionStatus};
use crate::error::{Error, Result};
use crate::port::outbound::store::TransactionStore;

/// Transaction store backed by a `HashMap`. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryTransactionStore {
    records: RwLock<HashMap<TransactionId, Transaction>>,
}

impl MemoryTransactionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionStore for MemoryTransactionStore {
    async fn insert(&self, transaction: &Transaction) -> Result<()> {
        let mut records = self.records.write();
        if records.contains_key(&transaction.id) {
            return Err(Error::Database(format!(
                "duplicate transaction id: {}",
                transaction.id
            )));
        }
        records.insert(transaction.id.clone(), transaction.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn list_recent(&self, limit: usize, offset: usize) -> Result<Vec<Transaction>> {
        let mut all: Vec<Transaction> = self.records.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all.into_iter().skip(offset).take(limit).collect())
    }

    async fn update_status(&self, id: &TransactionId, status: TransactionStatus) -> Result<bool> {
        let mut records = self.records.write();
        let Some(record) = records.get_mut(id) else {
            return Ok(false);
        };
        record.status = status;
        record.updated_at = Utc::now();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{provider, risk, PaymentRequest};

    fn transaction(id: &str, minutes_ago: i64) -> Transaction {
        let amount = dec!(42);
        Transaction::open(
            TransactionId::from(id),
            PaymentRequest::new("user-1", amount, "USD"),
            risk::assess(amount),
            provider::route(amount),
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryTransactionStore::new();
        let txn = transaction("a", 0);
        store.insert(&txn).await.unwrap();

        assert_eq!(store.find_by_id(&txn.id).await.unwrap(), Some(txn));
        assert_eq!(store.find_by_id(&"b".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_insert_fails() {
        let store = MemoryTransactionStore::new();
        let txn = transaction("a", 0);
        store.insert(&txn).await.unwrap();

        assert!(matches!(store.insert(&txn).await, Err(Error::Database(_))));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paged() {
        let store = MemoryTransactionStore::new();
        for (id, age) in [("old", 30), ("new", 1), ("mid", 10)] {
            store.insert(&transaction(id, age)).await.unwrap();
        }

        let ids: Vec<String> = store
            .list_recent(10, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        let page = store.list_recent(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id.as_str(), "mid");
    }

    #[tokio::test]
    async fn update_status_bumps_timestamp() {
        let store = MemoryTransactionStore::new();
        let txn = transaction("a", 5);
        store.insert(&txn).await.unwrap();

        assert!(store
            .update_status(&txn.id, TransactionStatus::Completed)
            .await
            .unwrap());
        let stored = store.find_by_id(&txn.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TransactionStatus::Completed);
        assert!(stored.updated_at > txn.updated_at);

        assert!(!store
            .update_status(&"missing".into(), TransactionStatus::Failed)
            .await
            .unwrap());
    }
}
