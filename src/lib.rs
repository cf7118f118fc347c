//! Sentinelpay - payment intake with fraud scoring, provider routing,
//! persistence, lifecycle events, and a read-through cache.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Transactions, fraud scoring, and provider routing (pure)
//! - [`port`] - Traits the application drives and is driven through
//! - [`application`] - The orchestrator plus its TTL cache and event publisher
//! - [`adapter`] - SQLite and in-memory stores, AMQP transport, CLI
//! - [`infrastructure`] - Configuration and the composition root
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use sentinelpay::domain::PaymentRequest;
//! use sentinelpay::infrastructure::bootstrap::Services;
//! use sentinelpay::infrastructure::config::settings::Config;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> sentinelpay::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let services = Services::build(&config).await?;
//!
//! let txn = services
//!     .orchestrator
//!     .create_transaction(PaymentRequest::new("user-1", dec!(49.99), "USD"))
//!     .await?;
//! println!("{} routed to {}", txn.id, txn.provider);
//!
//! services.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
