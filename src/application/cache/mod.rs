//! Runtime caches used by application services.
//!
//! - [`ttl::TtlCache`]: key/value store with per-entry expiry and a
//!   background sweeper

pub mod ttl;

pub use ttl::{TtlCache, DEFAULT_SWEEP_INTERVAL};
