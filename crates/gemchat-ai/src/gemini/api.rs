//! ExchangeClient implementation for GeminiClient.

use async_trait::async_trait;
use gemchat_common::Message;
use tracing::{debug, info};

use crate::exchange::{normalize_conversation, send_with_retry};
use crate::{ExchangeClient, ExchangeError};

use super::client::GeminiClient;

#[async_trait]
impl ExchangeClient for GeminiClient {
    async fn exchange(&self, history: &[Message]) -> Result<String, ExchangeError> {
        if !self.config.has_credential() {
            return Err(ExchangeError::MissingCredential);
        }

        let turns = normalize_conversation(history)?;
        if turns.len() != history.len() {
            debug!(
                original = history.len(),
                normalized = turns.len(),
                "collapsed conversation to alternating turns"
            );
        }

        let body = self.build_request_body(&turns);
        let url = self.api_url();
        debug!(model = %self.config.model, turns = turns.len(), "Gemini API request");

        let response = send_with_retry(
            self.transport.as_ref(),
            &url,
            &self.config.api_key,
            &body,
            &self.config.retry,
        )
        .await?;

        let text = self.parse_response(&response)?;
        info!(model = %self.config.model, chars = text.len(), "Gemini reply received");
        Ok(text)
    }
}
