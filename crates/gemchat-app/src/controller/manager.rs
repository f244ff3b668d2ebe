//! ChatController struct and session management.

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use gemchat_ai::ExchangeClient;
use gemchat_common::{ChatSession, SessionId, StoreError};
use gemchat_store::{export_session, SessionStore};
use tracing::{debug, info};

/// Owns the session store and drives exchanges against a client.
pub struct ChatController {
    pub(super) store: SessionStore,
    pub(super) client: Arc<dyn ExchangeClient>,
    /// Whether an exchange is currently outstanding.
    pub(super) busy: AtomicBool,
}

impl ChatController {
    pub fn new(store: SessionStore, client: Arc<dyn ExchangeClient>) -> Self {
        Self {
            store,
            client,
            busy: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Make sure there is at least one session to talk in.
    pub fn ensure_session(&mut self) {
        if self.store.sessions().is_empty() {
            info!("no sessions found, creating one");
            self.store.create_session();
        }
    }

    pub fn new_session(&mut self) -> SessionId {
        self.store.create_session()
    }

    /// Resolve a full id or a unique id prefix to a stored session id.
    pub fn resolve(&self, id_or_prefix: &str) -> Option<SessionId> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return None;
        }
        if let Some(exact) = self.store.sessions().iter().find(|s| s.id == needle) {
            return Some(exact.id.clone());
        }
        let mut matches = self
            .store
            .sessions()
            .iter()
            .filter(|s| s.id.as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.id.clone()),
            _ => None,
        }
    }

    /// Switch to an existing session. Unknown ids are rejected here so the
    /// store never receives one from this caller.
    pub fn switch(&mut self, id: &SessionId) -> bool {
        if self.store.session(id).is_none() {
            debug!(session = %id, "refusing to switch to unknown session");
            return false;
        }
        self.store.switch_active(id);
        true
    }

    /// Rename a session. Blank or unchanged titles are ignored.
    pub fn rename(&mut self, id: &SessionId, title: &str) -> bool {
        let title = title.trim();
        match self.store.session(id) {
            Some(session) if !title.is_empty() && session.title != title => {
                self.store.rename_session(id, title)
            }
            _ => false,
        }
    }

    /// Delete a session, first creating a replacement if it is the last one
    /// so there is always an active session afterwards.
    pub fn delete(&mut self, id: &SessionId) -> bool {
        if self.store.session(id).is_none() {
            return false;
        }
        if self.store.sessions().len() == 1 {
            self.store.create_session();
        }
        self.store.delete_session(id)
    }

    pub fn export(&self, id: &SessionId, dir: &Path) -> Result<PathBuf, StoreError> {
        let session: &ChatSession = self
            .store
            .session(id)
            .ok_or_else(|| StoreError::Export(format!("no session with id {id}")))?;
        export_session(session, dir)
    }
}
