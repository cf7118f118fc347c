//! Command-line interface definitions.
//!
//! Defines the CLI structure for the sentinelpay application using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::TransactionStatus;

/// Payment intake, lookup, and settlement CLI
#[derive(Parser, Debug)]
#[command(name = "sentinelpay")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply if missing)
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a payment request
    Pay(PayArgs),

    /// Show a transaction (cache first)
    Show(IdArg),

    /// List recent transactions, newest first
    List(ListArgs),

    /// Show the persisted status of a transaction
    Status(IdArg),

    /// Record a provider outcome for a transaction
    Settle(SettleArgs),

    /// List payment providers and their fees
    Providers,

    /// Validate configuration without touching the database or broker
    Check,
}

/// Arguments for `sentinelpay pay`.
#[derive(Args, Debug)]
pub struct PayArgs {
    /// Paying user
    #[arg(long)]
    pub user: String,

    /// Amount in major units (e.g. 19.99)
    #[arg(long)]
    pub amount: Decimal,

    /// Three-letter currency code
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Metadata entry as KEY=VALUE (repeatable; VALUE may be JSON)
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,
}

/// A single transaction id.
#[derive(Args, Debug)]
pub struct IdArg {
    /// Transaction id
    pub id: String,
}

/// Arguments for `sentinelpay list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page size (1-100, default 20)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Records to skip
    #[arg(long)]
    pub offset: Option<usize>,
}

/// Arguments for `sentinelpay settle`.
#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Transaction id
    pub id: String,

    /// Outcome reported by the provider
    #[arg(long, value_enum)]
    pub outcome: Outcome,
}

/// Final states a provider can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    Completed,
    Failed,
    Blocked,
}

impl From<Outcome> for TransactionStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed => TransactionStatus::Completed,
            Outcome::Failed => TransactionStatus::Failed,
            Outcome::Blocked => TransactionStatus::Blocked,
        }
    }
}
