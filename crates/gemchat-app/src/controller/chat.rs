//! Async send for ChatController.

use gemchat_ai::ExchangeError;
use gemchat_common::Message;
use gemchat_store::{generate_chat_title, DEFAULT_TITLE_LEN};
use tracing::{debug, warn};

use super::manager::ChatController;
use super::types::{BusyGuard, SendOutcome};

/// Assistant-visible text for a failed exchange.
pub fn error_reply(error: &ExchangeError) -> String {
    format!(
        "Sorry, I encountered an error: {error}. Please make sure your API key is set correctly."
    )
}

impl ChatController {
    /// Append `content` as a user message to the active session, exchange the
    /// session's history and append the reply (or an error message).
    pub async fn send(&mut self, content: &str) -> SendOutcome {
        let content = content.trim();
        if content.is_empty() {
            return SendOutcome::Ignored;
        }

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            return SendOutcome::Busy;
        };

        let Some(session) = self.store.active_session() else {
            debug!("send with no active session ignored");
            return SendOutcome::Ignored;
        };
        let session_id = session.id.clone();
        let is_first_message = session.messages.is_empty();

        self.store.append_message(Message::user(content));
        let history = self
            .store
            .session(&session_id)
            .map(|s| s.messages.clone())
            .unwrap_or_default();

        let result = match self.client.exchange(&history).await {
            Ok(reply) if reply.trim().is_empty() => Err(ExchangeError::EmptyResponse),
            other => other,
        };

        let outcome = match result {
            Ok(reply) => {
                let message = Message::assistant(reply);
                self.store.append_message(message.clone());
                SendOutcome::Replied(message)
            }
            Err(error) => {
                warn!(session = %session_id, "exchange failed: {error}");
                let message = Message::assistant(error_reply(&error));
                self.store.append_message(message.clone());
                SendOutcome::Failed { error, message }
            }
        };

        if is_first_message {
            let title = generate_chat_title(content, DEFAULT_TITLE_LEN);
            self.store.rename_session(&session_id, title);
        }

        outcome
    }
}
