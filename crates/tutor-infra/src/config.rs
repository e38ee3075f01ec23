//! Configuration loader for Tutor.
//!
//! Reads `config.toml` from the data directory (`~/.tutor/` by default) and
//! deserializes it into [`TutorConfig`]. Falls back to defaults when the file
//! is missing or malformed.

use std::path::{Path, PathBuf};

use tutor_types::config::TutorConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TUTOR_DATA_DIR";

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory.
///
/// Priority:
/// 1. `TUTOR_DATA_DIR` environment variable
/// 2. `~/.tutor`
/// 3. `./.tutor` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".tutor");
    }

    PathBuf::from(".tutor")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`TutorConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> TutorConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return TutorConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return TutorConfig::default();
        }
    };

    match toml::from_str::<TutorConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", config_path.display());
            TutorConfig::default()
        }
    }
}
