//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!     CLI / HTTP ───▶│  PaymentService         │
//!                    │  (orchestrator)         │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!        ┌───────────────┐               ┌───────────────┐
//!        │  Transaction  │               │    Event      │
//!        │  Store        │               │    Transport  │
//!        └───────────────┘               └───────────────┘
//! ```

pub mod inbound;
pub mod outbound;
