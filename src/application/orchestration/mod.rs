//! Transaction orchestration.
//!
//! The create path runs, in order:
//!
//! 1. **Validation**: reject malformed requests before any side effect
//! 2. **Scoring**: amount-tiered fraud risk
//! 3. **Routing**: pick the payment provider by amount
//! 4. **Persistence**: insert the record, aborting on failure
//! 5. **Publication**: best-effort `payment.created` event
//! 6. **Caching**: store the new record for fast reads
//!
//! Reads are cache-first with store fallback.

mod orchestrator;

pub use orchestrator::{TransactionCache, TransactionOrchestrator, DEFAULT_CACHE_TTL};
