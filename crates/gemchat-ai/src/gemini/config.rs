//! Gemini API client configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::exchange::RetryPolicy;

use super::client::GEMINI_API_BASE;

/// Harm categories every request sets a blocking threshold for.
pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Content-safety blocking threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyThreshold {
    BlockNone,
    BlockOnlyHigh,
    #[default]
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

impl SafetyThreshold {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyThreshold::BlockNone => "BLOCK_NONE",
            SafetyThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
            SafetyThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            SafetyThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
        }
    }
}

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Empty means not configured; exchanges fail before any network I/O.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
    pub safety_threshold: SafetyThreshold,
    pub retry: RetryPolicy,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("top_k", &self.top_k)
            .field("top_p", &self.top_p)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("safety_threshold", &self.safety_threshold)
            .field("retry", &self.retry)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
            safety_threshold: SafetyThreshold::default(),
            retry: RetryPolicy::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_safety_threshold(mut self, threshold: SafetyThreshold) -> Self {
        self.safety_threshold = threshold;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_generation_parameters() {
        let c = GeminiConfig::new("k");
        assert_eq!(c.model, "gemini-2.5-flash");
        assert_eq!(c.temperature, 0.7);
        assert_eq!(c.top_k, 40);
        assert_eq!(c.top_p, 0.95);
        assert_eq!(c.max_output_tokens, 2048);
        assert_eq!(c.safety_threshold, SafetyThreshold::BlockMediumAndAbove);
        assert_eq!(c.retry.max_attempts, 3);
    }

    #[test]
    fn debug_redacts_api_key() {
        let c = GeminiConfig::new("super-secret-key");
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("super-secret-key"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn blank_key_is_not_a_credential() {
        assert!(!GeminiConfig::new("").has_credential());
        assert!(!GeminiConfig::new("   ").has_credential());
        assert!(GeminiConfig::new("abc").has_credential());
    }

    #[test]
    fn builders_override_fields() {
        let c = GeminiConfig::new("k")
            .with_model("gemini-2.0-flash")
            .with_base_url("http://localhost:1234")
            .with_temperature(0.2)
            .with_top_k(8)
            .with_top_p(0.5)
            .with_max_output_tokens(256)
            .with_safety_threshold(SafetyThreshold::BlockNone)
            .with_retry(RetryPolicy::new(5, Duration::from_millis(10)));
        assert_eq!(c.model, "gemini-2.0-flash");
        assert_eq!(c.base_url, "http://localhost:1234");
        assert_eq!(c.top_k, 8);
        assert_eq!(c.max_output_tokens, 256);
        assert_eq!(c.safety_threshold.as_str(), "BLOCK_NONE");
        assert_eq!(c.retry.max_attempts, 5);
    }

    #[test]
    fn threshold_serde_uses_api_names() {
        let json = serde_json::to_string(&SafetyThreshold::BlockLowAndAbove).unwrap();
        assert_eq!(json, "\"BLOCK_LOW_AND_ABOVE\"");
        let t: SafetyThreshold = serde_json::from_str("\"BLOCK_ONLY_HIGH\"").unwrap();
        assert_eq!(t, SafetyThreshold::BlockOnlyHigh);
    }
}
