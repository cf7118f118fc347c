//! Configuration fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use sentinelpay::infrastructure::config::settings::Config;

/// Defaults with no environment influence and the broker switched off.
pub fn offline_config() -> Config {
    let mut config = Config::parse_toml_with_env("", |_| None).expect("default config");
    config.broker.enabled = false;
    config
}

/// Write an offline config file whose database lives in `dir`.
pub fn write_offline_config(dir: &TempDir) -> PathBuf {
    let db = dir.path().join("payments.db");
    let contents = format!(
        "database = {:?}\n\n[broker]\nenabled = false\n\n[logging]\nlevel = \"warn\"\n",
        db.display().to_string()
    );
    write_config(dir.path(), &contents)
}

/// Write `contents` to `config.toml` in `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}
