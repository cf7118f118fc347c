//! Transaction intake and lookup pipeline.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::application::cache::TtlCache;
use crate::application::publisher::EventPublisher;
use crate::domain::{
    provider, risk, DomainEvent, PaymentRequest, Transaction, TransactionId, TransactionStatus,
};
use crate::error::Result;
use crate::port::inbound::payment::{Page, PaymentService};
use crate::port::outbound::store::TransactionStore;

/// How long a transaction stays in the read cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache of recently created or read transactions.
pub type TransactionCache = TtlCache<TransactionId, Transaction>;

/// Sequences scoring, routing, persistence, publication, and caching.
///
/// The cache and publisher are process-wide services shared by reference;
/// concurrent calls do not serialize against each other here.
pub struct TransactionOrchestrator<S> {
    store: Arc<S>,
    publisher: Arc<EventPublisher>,
    cache: Arc<TransactionCache>,
    cache_ttl: Duration,
}

impl<S: TransactionStore> TransactionOrchestrator<S> {
    /// Create an orchestrator over shared services.
    pub fn new(store: Arc<S>, publisher: Arc<EventPublisher>, cache: Arc<TransactionCache>) -> Self {
        Self {
            store,
            publisher,
            cache,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override the cache TTL applied to created and fetched transactions.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Accept a payment request.
    ///
    /// Persistence failure aborts the operation before anything is published
    /// or cached. Publish failure is logged and does not affect the result.
    ///
    /// # Errors
    ///
    /// Returns a domain error for invalid requests and the store's error if
    /// the insert fails.
    pub async fn create_transaction(&self, request: PaymentRequest) -> Result<Transaction> {
        request.validate()?;

        let id = TransactionId::generate();
        let now = Utc::now();
        let assessment = risk::assess(request.amount);
        let provider = provider::route(request.amount);
        let transaction = Transaction::open(id, request, assessment, provider, now);

        if let Err(e) = self.store.insert(&transaction).await {
            warn!(
                transaction_id = %transaction.id,
                error = %e,
                "Failed to persist transaction"
            );
            return Err(e);
        }

        let event = DomainEvent::PaymentCreated(transaction.clone());
        if let Err(e) = self.publisher.publish(&event).await {
            warn!(
                transaction_id = %transaction.id,
                event_type = event.event_type(),
                error = %e,
                "Failed to publish event"
            );
        }

        self.cache
            .set(transaction.id.clone(), transaction.clone(), self.cache_ttl);

        info!(
            transaction_id = %transaction.id,
            user_id = %transaction.user_id,
            amount = %transaction.amount,
            provider = %transaction.provider,
            fraud_detected = transaction.fraud_detected,
            "Transaction created"
        );

        Ok(transaction)
    }

    /// Look up a transaction, serving from cache when possible.
    ///
    /// A cache hit is returned as-is, without checking persistence or
    /// renewing the TTL. A miss reads the store and caches what it finds.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the lookup fails on a cache miss.
    pub async fn get_transaction(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        if let Some(cached) = self.cache.get(id) {
            debug!(transaction_id = %id, "Cache hit");
            return Ok(Some(cached));
        }

        let Some(transaction) = self.store.find_by_id(id).await? else {
            debug!(transaction_id = %id, "Transaction not found");
            return Ok(None);
        };

        self.cache
            .set(id.clone(), transaction.clone(), self.cache_ttl);
        Ok(Some(transaction))
    }

    /// List stored transactions newest first, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the query fails.
    pub async fn list_transactions(&self, page: Page) -> Result<Vec<Transaction>> {
        self.store.list_recent(page.limit, page.offset).await
    }

    /// Persisted status of a transaction, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the lookup fails.
    pub async fn transaction_status(&self, id: &TransactionId) -> Result<Option<TransactionStatus>> {
        Ok(self.store.find_by_id(id).await?.map(|txn| txn.status))
    }
}

impl<S: TransactionStore> PaymentService for TransactionOrchestrator<S> {
    async fn create_transaction(&self, request: PaymentRequest) -> Result<Transaction> {
        TransactionOrchestrator::create_transaction(self, request).await
    }

    async fn get_transaction(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        TransactionOrchestrator::get_transaction(self, id).await
    }

    async fn list_transactions(&self, page: Page) -> Result<Vec<Transaction>> {
        TransactionOrchestrator::list_transactions(self, page).await
    }

    async fn transaction_status(&self, id: &TransactionId) -> Result<Option<TransactionStatus>> {
        TransactionOrchestrator::transaction_status(self, id).await
    }
}
