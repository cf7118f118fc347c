//! Concurrent key/value cache with per-entry expiry.
//!
//! Expiry is resolved at read time: an entry whose deadline has passed is
//! reported as absent even if the background sweeper has not removed it
//! yet. The sweeper is the only thing that reclaims memory for expired
//! entries that are never overwritten or deleted.
//!
//! Readers share a `parking_lot::RwLock`; `set`, `delete`, and each sweep
//! pass take the write lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

/// Default interval between background sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound applied to TTLs and sweep intervals. Longer durations are
/// clamped so deadline arithmetic cannot overflow the clock.
pub const MAX_DURATION: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

type Entries<K, V> = RwLock<HashMap<K, Entry<V>>>;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Thread-safe TTL cache with a background sweeper.
///
/// The sweeper is spawned on construction and stops when [`shutdown`] is
/// called or the cache is dropped.
///
/// [`shutdown`]: TtlCache::shutdown
pub struct TtlCache<K, V> {
    entries: Arc<Entries<K, V>>,
    shutdown_tx: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache and start its sweeper.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, or if `sweep_interval` is
    /// zero.
    #[must_use]
    pub fn new(sweep_interval: Duration) -> Self {
        let entries: Arc<Entries<K, V>> = Arc::new(RwLock::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(sweep_loop(
            Arc::downgrade(&entries),
            sweep_interval,
            shutdown_rx,
        ));

        debug!(interval_secs = sweep_interval.as_secs(), "Cache sweeper started");

        Self {
            entries,
            shutdown_tx,
            sweeper: Mutex::new(Some(handle)),
        }
    }

    /// Store a value that expires `ttl` from now, replacing any prior entry.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let expires_at = deadline(Instant::now(), ttl);
        self.entries
            .write()
            .insert(key, Entry { value, expires_at });
    }

    /// Get a live value.
    ///
    /// Returns `None` when the key is absent or its entry has expired.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    /// Remove an entry if present.
    pub fn delete(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Run one sweep pass immediately. Returns the number of evicted entries.
    pub fn sweep_expired(&self) -> usize {
        evict_expired(&self.entries, Instant::now())
    }

    /// Number of stored entries, including expired ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true while the background sweeper is alive.
    #[must_use]
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the sweeper and wait for it to exit. Idempotent.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl<K, V> Drop for TtlCache<K, V> {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// `now + after`, clamped to [`MAX_DURATION`] from now.
fn deadline(now: Instant, after: Duration) -> Instant {
    let after = after.min(MAX_DURATION);
    now.checked_add(after).unwrap_or(now)
}

fn evict_expired<K, V>(entries: &Entries<K, V>, now: Instant) -> usize
where
    K: Eq + Hash,
{
    let mut entries = entries.write();
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now));
    before - entries.len()
}

async fn sweep_loop<K, V>(
    entries: Weak<Entries<K, V>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    K: Eq + Hash,
{
    let interval = interval.min(MAX_DURATION);
    let mut ticker = time::interval_at(deadline(Instant::now(), interval), interval);

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let evicted = evict_expired(&entries, Instant::now());
                if evicted > 0 {
                    debug!(evicted, "Swept expired cache entries");
                }
            }
        }
    }

    debug!("Cache sweeper stopped");
}
