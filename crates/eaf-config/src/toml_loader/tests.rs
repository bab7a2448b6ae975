//! Tests for TOML config loading, creation, and path resolution.

use super::template::default_config_toml;
use super::*;
use crate::schema::{EafConfig, LogLevel};
use eaf_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_eaf_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[buffer]
default_width = 1024
background_color = "#000000"

[logging]
level = "debug"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.buffer.default_width, 1024);
    assert_eq!(config.buffer.background_color, "#000000");
    assert_eq!(config.logging.level, LogLevel::Debug);
    // Defaults preserved
    assert_eq!(config.buffer.default_height, 600);
    assert_eq!(config.dispatch.max_tasks_per_drain, 256);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[buffer]\ndefault_width = 0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.buffer.default_width, 800);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eaf").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.buffer.default_width, 800);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn default_config_toml_is_valid() {
    let config: EafConfig = toml::from_str(default_config_toml()).unwrap();
    assert_eq!(config.buffer.background_color, "#ffffff");
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("eaf"));
        assert!(path_str.ends_with("config.toml"));
    }
}
