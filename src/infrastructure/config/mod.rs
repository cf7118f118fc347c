//! Infrastructure configuration modules.

pub mod broker;
pub mod cache;
pub mod logging;
pub mod settings;
