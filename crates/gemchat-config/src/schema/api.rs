//! Remote API configuration: model, credential and generation parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content-safety blocking threshold applied to every harm category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyLevel {
    BlockNone,
    BlockOnlyHigh,
    #[default]
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// Gemini API settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub model: String,
    pub base_url: String,
    /// Inline key. Prefer `api_key_env`; this wins when both are set.
    pub api_key: Option<String>,
    /// Environment variable holding the key.
    pub api_key_env: String,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Nucleus sampling (valid range: 0.0-1.0).
    pub top_p: f64,
    /// Top-k sampling (valid range: 1-100).
    pub top_k: u32,
    /// Output length cap (valid range: 1-65536).
    pub max_output_tokens: u32,
    pub safety_threshold: SafetyLevel,
    /// Connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub request_timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            api_key: None,
            api_key_env: "GEMINI_API_KEY".into(),
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 2048,
            safety_threshold: SafetyLevel::default(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_env", &self.api_key_env)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("top_k", &self.top_k)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("safety_threshold", &self.safety_threshold)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    /// The configured key: inline `api_key` if non-blank, else the value of
    /// `api_key_env`. Returns an empty string when neither is set.
    pub fn resolve_api_key(&self) -> String {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return key.to_string();
        }
        std::env::var(&self.api_key_env).unwrap_or_default()
    }
}
