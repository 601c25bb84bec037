//! Global configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.reviewbot/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use reviewbot_types::config::GlobalConfig;

/// Timeouts below this are raised to it; a zero deadline would fail every call.
const MIN_TIMEOUT_SECS: u64 = 1;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Relay timeouts are floored at one second.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    let mut config = match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return GlobalConfig::default();
        }
    };

    config.relay.storage_timeout_secs = config.relay.storage_timeout_secs.max(MIN_TIMEOUT_SECS);
    config.relay.backend_timeout_secs = config.relay.backend_timeout_secs.max(MIN_TIMEOUT_SECS);
    config
}

/// Resolve the data directory.
///
/// Priority:
/// 1. An explicit directory (CLI flag or `REVIEWBOT_DATA_DIR`)
/// 2. `~/.reviewbot`
/// 3. `.reviewbot` in the current directory
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".reviewbot");
    }

    PathBuf::from(".reviewbot")
}
