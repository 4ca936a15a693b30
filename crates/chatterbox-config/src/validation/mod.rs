//! Full configuration validation.
//!
//! Validates numeric ranges, interval ordering and the server URL.
//! Each section has its own function; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::ChatterboxConfig;
use chatterbox_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChatterboxConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_server(&mut errors, config);
    sections::validate_activity(&mut errors, config);
    sections::validate_chatter(&mut errors, config);
    sections::validate_presence(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
