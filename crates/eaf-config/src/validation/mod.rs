//! Full configuration validation.
//!
//! Every section has its own check; this orchestrator runs them all and
//! collects the errors into a single `ConfigError`.

mod buffer;
mod helpers;


use crate::schema::EafConfig;
use eaf_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &EafConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    buffer::validate_buffer(&mut errors, config);
    buffer::validate_dispatch(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
