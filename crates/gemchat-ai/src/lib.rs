//! AI exchange for gemchat.
//!
//! Turns a conversation history into exactly one assistant reply from the
//! Gemini generative-language API, or a classified failure:
//! - conversation normalization into strict user/model alternation
//! - bounded retry with exponential backoff on 503 and network faults
//! - response validation (candidates, empty text, remote error messages)

pub mod exchange;
pub mod gemini;
pub mod transport;

use async_trait::async_trait;
use gemchat_common::Message;

pub use exchange::{normalize_conversation, RetryPolicy, Turn};
pub use gemini::{GeminiClient, GeminiConfig, SafetyThreshold};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

/// One round trip: full history in, one assistant reply out.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    async fn exchange(&self, history: &[Message]) -> Result<String, ExchangeError>;
}

/// Why an exchange produced no reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error(
        "API key is missing. Set api.api_key in the config file or the environment \
         variable named by api.api_key_env"
    )]
    MissingCredential,

    #[error("No valid messages to send")]
    InvalidConversation,

    #[error("Gemini API is temporarily unavailable ({status}) after {attempts} attempts")]
    TransientUnavailable { status: u16, attempts: u32 },

    #[error("{message}")]
    RemoteRejected { status: u16, message: String },

    #[error("No response generated from AI. The content may have been blocked by safety filters.")]
    NoCandidates,

    #[error("AI returned an empty response")]
    EmptyResponse,

    #[error("Malformed response from AI: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    TransportFailure(String),
}

impl From<TransportError> for ExchangeError {
    fn from(e: TransportError) -> Self {
        ExchangeError::TransportFailure(e.to_string())
    }
}
