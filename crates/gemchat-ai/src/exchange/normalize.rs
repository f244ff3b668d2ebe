//! Conversation normalization into strict user/model alternation.

use gemchat_common::{Message, Role};

use crate::ExchangeError;

/// One turn as the remote API sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn<'a> {
    pub role: Role,
    pub text: &'a str,
}

impl Turn<'_> {
    /// Role label on the wire: the API calls the assistant `model`.
    pub fn api_role(&self) -> &'static str {
        match self.role {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

/// Collapse runs of same-role messages to their first message and drop a
/// leading assistant turn.
///
/// Fails with [`ExchangeError::InvalidConversation`] when nothing is left.
pub fn normalize_conversation(messages: &[Message]) -> Result<Vec<Turn<'_>>, ExchangeError> {
    let mut turns: Vec<Turn<'_>> = Vec::with_capacity(messages.len());
    for msg in messages {
        if turns.last().map(|t| t.role) != Some(msg.role) {
            turns.push(Turn {
                role: msg.role,
                text: &msg.content,
            });
        }
    }

    if turns.first().is_some_and(|t| t.role != Role::User) {
        turns.remove(0);
    }

    if turns.is_empty() {
        return Err(ExchangeError::InvalidConversation);
    }
    Ok(turns)
}
