//! Host configuration.
//!
//! TOML-based, with `serde(default)` on every section so a partial file
//! (or none at all) works out of the box.
//!
//! ```rust,no_run
//! use eaf_config::{config_to_json, load_config};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{EafConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{create_default_config, default_config_path, load_default, load_from_path};

use eaf_common::ConfigError;

/// Load config from the platform default path and validate it.
pub fn load_config() -> Result<EafConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &EafConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
