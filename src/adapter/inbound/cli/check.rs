//! Handler for the `check` command.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::infrastructure::config::settings::Config;

/// Report the effective configuration. Loading has already validated it.
pub fn execute(config_path: &Path, config: &Config) {
    let broker_host = url::Url::parse(&config.broker.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "config": config_path.display().to_string(),
            "config_found": config_path.exists(),
            "status": "ok",
            "database": config.database,
            "broker": {
                "enabled": config.broker.enabled,
                "host": broker_host,
            },
            "cache": {
                "ttl_secs": config.cache.ttl_secs,
                "sweep_interval_secs": config.cache.sweep_interval_secs,
            },
        }));
        return;
    }

    output::section("Configuration Check");
    output::field("Config", config_path.display());
    if config_path.exists() {
        output::success("Configuration file is valid");
    } else {
        output::warning("Configuration file not found, using defaults");
    }

    output::section("Summary");
    output::field("Database", &config.database);
    output::field("Cache TTL", format!("{}s", config.cache.ttl_secs));
    output::field("Sweep", format!("every {}s", config.cache.sweep_interval_secs));
    if config.broker.enabled {
        output::field("Broker", &broker_host);
    } else {
        output::field("Broker", output::muted("disabled (fallback sink)"));
    }

    output::success("Configuration check complete");
}
