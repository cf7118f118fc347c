//! Composition root for runtime wiring.
//!
//! Builds the process-wide services once and hands them out by `Arc`:
//! the SQLite pool and store, the transaction cache with its sweeper, the
//! event publisher, and the orchestrator over all three.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::amqp::AmqpTransport;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::SqliteTransactionStore;
use crate::application::cache::TtlCache;
use crate::application::orchestration::{TransactionCache, TransactionOrchestrator};
use crate::application::publisher::EventPublisher;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::TransactionStore;

const IN_MEMORY_DATABASE: &str = ":memory:";
const POOL_SIZE: u32 = 5;

/// Shared services for one process.
pub struct Services<S = SqliteTransactionStore> {
    pub store: Arc<S>,
    pub cache: Arc<TransactionCache>,
    pub publisher: Arc<EventPublisher>,
    pub orchestrator: Arc<TransactionOrchestrator<S>>,
}

impl Services<SqliteTransactionStore> {
    /// Open the database, connect the publisher, and start the cache.
    ///
    /// An unreachable broker is not an error: the publisher starts in
    /// fallback mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database pool cannot be created or
    /// migrations fail.
    pub async fn build(config: &Config) -> Result<Self> {
        let pool_size = if config.database == IN_MEMORY_DATABASE {
            1
        } else {
            POOL_SIZE
        };
        let pool = create_pool(&config.database, pool_size)?;
        run_migrations(&pool)?;
        info!(database = %config.database, "Database ready");

        let store = Arc::new(SqliteTransactionStore::new(pool));
        let publisher = connect_publisher(config).await;

        Ok(Self::assemble(config, store, publisher))
    }
}

impl<S: TransactionStore> Services<S> {
    /// Wire services around an existing store and publisher.
    ///
    /// Must be called inside a Tokio runtime; the cache sweeper is spawned
    /// here.
    #[must_use]
    pub fn assemble(config: &Config, store: Arc<S>, publisher: EventPublisher) -> Self {
        let cache: Arc<TransactionCache> = Arc::new(TtlCache::new(config.cache.sweep_interval()));
        let publisher = Arc::new(publisher);
        let orchestrator = Arc::new(
            TransactionOrchestrator::new(
                Arc::clone(&store),
                Arc::clone(&publisher),
                Arc::clone(&cache),
            )
            .with_cache_ttl(config.cache.ttl()),
        );

        Self {
            store,
            cache,
            publisher,
            orchestrator,
        }
    }

    /// Stop the cache sweeper and close the publisher.
    pub async fn shutdown(&self) {
        self.cache.shutdown().await;
        if let Err(e) = self.publisher.close().await {
            warn!(error = %e, "Failed to close event publisher");
        }
        info!("Services stopped");
    }
}

async fn connect_publisher(config: &Config) -> EventPublisher {
    if !config.broker.enabled {
        info!("Broker disabled, publishing to fallback sink");
        return EventPublisher::fallback();
    }
    // A channel that cannot be opened fails `connect` like a refused
    // connection, so both start the publisher in fallback mode rather than
    // aborting startup.
    EventPublisher::establish(AmqpTransport::connect(&config.broker.url)).await
}
