//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for connection values (`RABBITMQ_URL`, `DATABASE_URL`).
//!
//! # Example
//!
//! ```no_run
//! use sentinelpay::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::broker::BrokerConfig;
use super::cache::{CacheConfig, MAX_CACHE_SECS};
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`BrokerConfig::url`].
pub const BROKER_URL_ENV: &str = "RABBITMQ_URL";
/// Environment variable overriding [`Config::database`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const BROKER_SCHEMES: [&str; 2] = ["amqp", "amqps"];

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Transaction read cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Event broker connection.
    #[serde(default)]
    pub broker: BrokerConfig,

    /// Path to SQLite database file.
    ///
    /// Defaults to "sentinelpay.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    "sentinelpay.db".to_string()
}

impl Config {
    /// Parse configuration from TOML content, applying process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content with a custom environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(url) = env(BROKER_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.broker.url = url;
        }
        if let Some(database) = env(DATABASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.database = database;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is invalid, or
    /// if the defaults fail validation after environment overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn validate(&self) -> Result<()> {
        check_cache_secs("ttl_secs", self.cache.ttl_secs)?;
        check_cache_secs("sweep_interval_secs", self.cache.sweep_interval_secs)?;

        if self.broker.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "broker.url" }.into());
        }
        let url = url::Url::parse(&self.broker.url).map_err(|e| ConfigError::InvalidValue {
            field: "broker.url",
            reason: e.to_string(),
        })?;
        if !BROKER_SCHEMES.contains(&url.scheme()) {
            return Err(ConfigError::InvalidValue {
                field: "broker.url",
                reason: format!("unsupported scheme '{}', expected amqp or amqps", url.scheme()),
            }
            .into());
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be 'pretty' or 'json'".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn check_cache_secs(field: &'static str, secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    if secs > MAX_CACHE_SECS {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be at most {MAX_CACHE_SECS}"),
        }
        .into());
    }
    Ok(())
}
