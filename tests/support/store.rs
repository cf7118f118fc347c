//! Transaction store doubles.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use sentinelpay::adapter::outbound::memory::MemoryTransactionStore;
use sentinelpay::domain::{Transaction, TransactionId, TransactionStatus};
use sentinelpay::error::{Error, Result};
use sentinelpay::port::outbound::store::TransactionStore;

/// In-memory store that counts calls and can be switched to fail.
#[derive(Default)]
pub struct ProbeStore {
    inner: MemoryTransactionStore,
    fail_inserts: AtomicBool,
    fail_reads: AtomicBool,
    inserts: AtomicUsize,
    lookups: AtomicUsize,
}

impl ProbeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_inserts() -> Self {
        let store = Self::default();
        store.fail_inserts.store(true, Ordering::SeqCst);
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl TransactionStore for ProbeStore {
    async fn insert(&self, transaction: &Transaction) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(Error::Database("insert rejected".into()));
        }
        self.inner.insert(transaction).await
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Connection("database unavailable".into()));
        }
        self.inner.find_by_id(id).await
    }

    async fn list_recent(&self, limit: usize, offset: usize) -> Result<Vec<Transaction>> {
        self.inner.list_recent(limit, offset).await
    }

    async fn update_status(&self, id: &TransactionId, status: TransactionStatus) -> Result<bool> {
        self.inner.update_status(id, status).await
    }
}
