//! Gemini API client struct, request building, and response parsing.

use std::sync::Arc;

use tracing::debug;

use crate::exchange::Turn;
use crate::transport::{HttpTransport, RawResponse, Transport};
use crate::ExchangeError;

use super::config::{GeminiConfig, HARM_CATEGORIES};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) transport: Arc<dyn Transport>,
}

impl GeminiClient {
    /// Client over a real HTTP transport using the configured timeouts.
    pub fn new(config: GeminiConfig) -> Result<Self, ExchangeError> {
        let transport = HttpTransport::new(config.connect_timeout, config.request_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: GeminiConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(&self, turns: &[Turn<'_>]) -> serde_json::Value {
        let contents: Vec<_> = turns
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.api_role(),
                    "parts": [{ "text": turn.text }]
                })
            })
            .collect();

        let threshold = self.config.safety_threshold.as_str();
        let safety: Vec<_> = HARM_CATEGORIES
            .iter()
            .map(|category| {
                serde_json::json!({
                    "category": category,
                    "threshold": threshold,
                })
            })
            .collect();

        serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature": self.config.temperature,
                "topK": self.config.top_k,
                "topP": self.config.top_p,
                "maxOutputTokens": self.config.max_output_tokens,
            },
            "safetySettings": safety,
        })
    }

    /// Turn a final (non-retried) response into reply text or a failure.
    pub(crate) fn parse_response(&self, response: &RawResponse) -> Result<String, ExchangeError> {
        if !response.is_success() {
            let remote_message = serde_json::from_str::<serde_json::Value>(&response.body)
                .ok()
                .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
                .filter(|m| !m.is_empty());
            let message = remote_message.unwrap_or_else(|| {
                format!(
                    "Gemini API returned {}: {}",
                    response.status, response.reason
                )
            });
            return Err(ExchangeError::RemoteRejected {
                status: response.status,
                message,
            });
        }

        let json: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| ExchangeError::MalformedResponse(e.to_string()))?;

        let first = json["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .ok_or(ExchangeError::NoCandidates)?;

        if let Some(reason) = first["finishReason"].as_str() {
            debug!(finish_reason = reason, "Gemini candidate finished");
        }

        match first["content"]["parts"][0]["text"].as_str() {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(ExchangeError::EmptyResponse),
        }
    }
}
