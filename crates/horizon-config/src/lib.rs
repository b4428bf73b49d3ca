//! Horizon configuration system.
//!
//! TOML-based configuration with serde defaults and range validation.
//! Every section has defaults, so the demo runs without any file and a
//! partial file only needs the keys it overrides.
//!
//! ```rust,no_run
//! use horizon_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HorizonConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use horizon_common::ConfigError;

/// Load the configuration.
///
/// With no path the built-in defaults are returned and nothing is read
/// from or written to disk. With a path the file is parsed and validated.
pub fn load_config(path: Option<&Path>) -> Result<HorizonConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => HorizonConfig::default(),
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &HorizonConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
