use serde::{Deserialize, Serialize};

use crate::id::SessionId;
use crate::time::now_millis;

use super::Message;

/// Title given to sessions before the first exchange names them.
pub const DEFAULT_TITLE: &str = "New Chat";

/// One independent conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    /// Append-only; insertion order is conversation order.
    pub messages: Vec<Message>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::new_at(now_millis())
    }

    /// Create an empty session stamped with the given epoch-millis time.
    pub fn new_at(now: i64) -> Self {
        Self {
            id: SessionId::new(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete persisted state: every session plus the active pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Most recently created first.
    pub sessions: Vec<ChatSession>,
    #[serde(alias = "activeChatId")]
    pub active_id: Option<SessionId>,
}

impl StoreState {
    pub fn find(&self, id: &SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn find_mut(&mut self, id: &SessionId) -> Option<&mut ChatSession> {
        self.sessions.iter_mut().find(|s| &s.id == id)
    }
}
