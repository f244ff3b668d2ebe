//! Standalone JSON export of a single session.

use std::path::{Path, PathBuf};

use gemchat_common::{ChatSession, SessionId, StoreError};
use tracing::info;

/// File name an exported session is written under.
pub fn export_file_name(id: &SessionId) -> String {
    format!("chat-{id}.json")
}

/// Pretty-printed JSON document of `session`, in the stored session shape.
pub fn export_session_json(session: &ChatSession) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(session)?)
}

/// Write `session` to `{dir}/chat-{id}.json`, creating `dir` if needed.
pub fn export_session(session: &ChatSession, dir: &Path) -> Result<PathBuf, StoreError> {
    let json = export_session_json(session)?;
    std::fs::create_dir_all(dir).map_err(|e| {
        StoreError::Export(format!("failed to create {}: {e}", dir.display()))
    })?;
    let path = dir.join(export_file_name(&session.id));
    std::fs::write(&path, json)
        .map_err(|e| StoreError::Export(format!("failed to write {}: {e}", path.display())))?;
    info!(session = %session.id, path = %path.display(), "exported session");
    Ok(path)
}
