//! SQLite persistence adapter.
//!
//! Provides a SQLite-backed [`TransactionStore`](crate::port::outbound::store::TransactionStore)
//! using Diesel ORM with an r2d2 connection pool.

pub mod database;
pub mod store;

pub use store::SqliteTransactionStore;
