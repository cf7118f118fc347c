#![allow(dead_code)]

pub mod config;
pub mod store;
pub mod transport;
