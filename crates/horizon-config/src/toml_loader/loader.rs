//! Core TOML config loading from an explicit path.

use crate::schema::HorizonConfig;
use horizon_common::ConfigError;
use std::path::Path;
use tracing::info;

/// Parse a config from TOML text, using serde defaults for missing fields.
pub fn parse_toml(content: &str) -> Result<HorizonConfig, ConfigError> {
    toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load config from a specific TOML file path.
///
/// The file is only read, never created or rewritten.
pub fn load_from_path(path: &Path) -> Result<HorizonConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let config = parse_toml(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}
