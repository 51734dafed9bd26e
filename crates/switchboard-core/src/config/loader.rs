//! Config loader — reads `~/.switchboard/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.switchboard/config.json`
//! 3. Environment variables (override JSON):
//!    - `SWITCHBOARD_PROVIDER` — provider id
//!    - `SWITCHBOARD_MODEL` — model id
//!    - `SWITCHBOARD_DEBUG` — "1"/"true" enables debug logging
//!
//! A missing or unreadable file is not an error: the loader logs and falls
//! back to defaults so a first run works out of the box.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;
use crate::utils;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(&config_path, json)
}

/// Apply `SWITCHBOARD_*` environment overrides on top of a loaded config.
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(provider) = std::env::var("SWITCHBOARD_PROVIDER") {
        if !provider.is_empty() {
            config.provider = provider;
        }
    }
    if let Ok(model) = std::env::var("SWITCHBOARD_MODEL") {
        if !model.is_empty() {
            config.model = Some(model);
        }
    }
    if let Ok(debug) = std::env::var("SWITCHBOARD_DEBUG") {
        config.features.debug = matches!(debug.as_str(), "1" | "true" | "TRUE");
    }
    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
