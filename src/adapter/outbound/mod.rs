//! Outbound adapters (driven side).

pub mod amqp;
pub mod memory;
pub mod sqlite;
