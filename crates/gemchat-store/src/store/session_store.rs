//! SessionStore struct, rehydration and mutations.

use std::sync::Arc;

use gemchat_common::{now_millis, ChatSession, Message, SessionId, StoreError, StoreState};
use tracing::{debug, error, info, warn};

use crate::kv::KeyValueStore;

/// Key the snapshot lives under unless configured otherwise.
pub const DEFAULT_STATE_KEY: &str = "chatAppState";

/// Source of epoch-millis timestamps for `createdAt` / `updatedAt`.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Owns every chat session and the identity of the active one.
///
/// Each mutating call applies its change in memory and then rewrites the
/// full snapshot to the backing [`KeyValueStore`] before returning. There
/// is exactly one mutator per process; callers needing shared access wrap
/// the store in their own lock.
pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    state: StoreState,
    clock: Clock,
    last_persist_error: Option<String>,
}

impl SessionStore {
    /// Rehydrate from `backend` under `key`.
    ///
    /// An absent, unreadable or malformed snapshot yields the empty state;
    /// the problem is logged, never returned.
    pub fn open(backend: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = load_snapshot(&backend, &key);
        info!(
            key = %key,
            sessions = state.sessions.len(),
            "session store opened"
        );
        Self {
            backend: Box::new(backend),
            key,
            state,
            clock: Arc::new(now_millis),
            last_persist_error: None,
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // -- reads --------------------------------------------------------------

    /// All sessions, most recently created first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.state.sessions
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.state.active_id.as_ref()
    }

    /// The active session, if the active pointer resolves to one.
    pub fn active_session(&self) -> Option<&ChatSession> {
        self.state.active_id.as_ref().and_then(|id| self.state.find(id))
    }

    pub fn session(&self, id: &SessionId) -> Option<&ChatSession> {
        self.state.find(id)
    }

    /// The complete current state, exactly as it is persisted.
    pub fn snapshot(&self) -> &StoreState {
        &self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The error from the most recent failed write, cleared by the next
    /// successful one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    // -- mutations ----------------------------------------------------------

    /// Create an empty session, put it first and make it active.
    pub fn create_session(&mut self) -> SessionId {
        let session = ChatSession::new_at((self.clock)());
        let id = session.id.clone();
        self.state.sessions.insert(0, session);
        self.state.active_id = Some(id.clone());
        debug!(session = %id, "created session");
        self.persist_logged();
        id
    }

    /// Point the active pointer at `id`.
    ///
    /// The id is not checked against the stored sessions: passing a live id
    /// is the caller's responsibility. An unknown id leaves no active session
    /// resolvable until the caller switches again or the store reassigns the
    /// pointer on delete.
    pub fn switch_active(&mut self, id: &SessionId) {
        if self.state.find(id).is_none() {
            warn!(session = %id, "switching to a session that does not exist");
        }
        self.state.active_id = Some(id.clone());
        self.persist_logged();
    }

    /// Append `message` to the active session and bump its `updatedAt`.
    ///
    /// Returns `false`, leaving the state untouched, when no active session
    /// resolves.
    pub fn append_message(&mut self, message: Message) -> bool {
        let now = (self.clock)();
        let Some(active) = self.state.active_id.clone() else {
            debug!("append with no active session ignored");
            return false;
        };
        let Some(session) = self.state.find_mut(&active) else {
            debug!(session = %active, "append to unresolved active session ignored");
            return false;
        };
        session.messages.push(message);
        session.updated_at = now;
        self.persist_logged();
        true
    }

    /// Replace the title of session `id`. Returns `false` if no such session.
    pub fn rename_session(&mut self, id: &SessionId, title: impl Into<String>) -> bool {
        let now = (self.clock)();
        let Some(session) = self.state.find_mut(id) else {
            debug!(session = %id, "rename of unknown session ignored");
            return false;
        };
        session.title = title.into();
        session.updated_at = now;
        self.persist_logged();
        true
    }

    /// Remove session `id`. If it was active, the first remaining session
    /// (or none) becomes active. Returns `false` if no such session.
    pub fn delete_session(&mut self, id: &SessionId) -> bool {
        let before = self.state.sessions.len();
        self.state.sessions.retain(|s| &s.id != id);
        if self.state.sessions.len() == before {
            debug!(session = %id, "delete of unknown session ignored");
            return false;
        }
        if self.state.active_id.as_ref() == Some(id) {
            self.state.active_id = self.state.sessions.first().map(|s| s.id.clone());
        }
        debug!(session = %id, remaining = self.state.sessions.len(), "deleted session");
        self.persist_logged();
        true
    }

    // -- persistence --------------------------------------------------------

    /// Serialize the full snapshot and write it to the backend.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let result = serde_json::to_string(&self.state)
            .map_err(StoreError::from)
            .and_then(|json| self.backend.set(&self.key, &json));
        match &result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => self.last_persist_error = Some(e.to_string()),
        }
        result
    }

    /// Persist after a mutation. The in-memory change stands even if the
    /// write fails.
    fn persist_logged(&mut self) {
        if let Err(e) = self.persist() {
            error!(key = %self.key, "failed to persist session snapshot: {e}");
        }
    }
}

fn load_snapshot(backend: &dyn KeyValueStore, key: &str) -> StoreState {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored snapshot, starting empty");
            return StoreState::default();
        }
        Err(e) => {
            warn!(key, "failed to read snapshot, starting empty: {e}");
            return StoreState::default();
        }
    };

    match serde_json::from_str::<StoreState>(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!(key, "malformed snapshot, starting empty: {e}");
            StoreState::default()
        }
    }
}
