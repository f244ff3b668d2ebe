//! Full configuration validation.
//!
//! Validates numeric ranges and required strings. Each section has its own
//! validator; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod api;
mod helpers;
mod misc;


use crate::schema::GemchatConfig;
use gemchat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GemchatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    api::validate_api(&mut errors, config);
    misc::validate_retry(&mut errors, config);
    misc::validate_storage(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
