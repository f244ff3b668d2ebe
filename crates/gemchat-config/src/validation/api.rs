//! Validation for the `[api]` section.

use crate::schema::GemchatConfig;

use super::helpers::{validate_non_empty, validate_range, validate_range_f64};

pub(crate) fn validate_api(errors: &mut Vec<String>, config: &GemchatConfig) {
    let api = &config.api;
    validate_non_empty(errors, "api.model", &api.model);
    validate_non_empty(errors, "api.api_key_env", &api.api_key_env);
    if !api.base_url.starts_with("http://") && !api.base_url.starts_with("https://") {
        errors.push(format!(
            "api.base_url = \"{}\" must start with http:// or https://",
            api.base_url
        ));
    }
    validate_range_f64(errors, "api.temperature", api.temperature, 0.0, 2.0);
    validate_range_f64(errors, "api.top_p", api.top_p, 0.0, 1.0);
    validate_range(errors, "api.top_k", api.top_k, 1, 100);
    validate_range(errors, "api.max_output_tokens", api.max_output_tokens, 1, 65536);
    validate_range(errors, "api.connect_timeout_secs", api.connect_timeout_secs, 1, 120);
    validate_range(errors, "api.request_timeout_secs", api.request_timeout_secs, 1, 600);
}
