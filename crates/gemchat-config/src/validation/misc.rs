//! Validation for the `[retry]` and `[storage]` sections.

use crate::schema::GemchatConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_retry(errors: &mut Vec<String>, config: &GemchatConfig) {
    validate_range(errors, "retry.max_attempts", config.retry.max_attempts, 1, 10);
    validate_range(errors, "retry.base_delay_ms", config.retry.base_delay_ms, 0, 60_000);
}

pub(crate) fn validate_storage(errors: &mut Vec<String>, config: &GemchatConfig) {
    validate_non_empty(errors, "storage.state_key", &config.storage.state_key);
}
