//! File-backed key-value store.
//!
//! Each key maps to `{dir}/{sanitized_key}.json`. Writes go to a `.tmp`
//! sibling first and are renamed into place so a crash mid-write never
//! leaves a truncated snapshot behind.

use std::path::{Path, PathBuf};

use gemchat_common::StoreError;
use tracing::{debug, warn};

use super::KeyValueStore;

/// Persistent store writing one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "read snapshot");
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                reason: format!("failed to read {}: {e}", path.display()),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |reason: String| StoreError::Write {
            key: key.to_string(),
            reason,
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            write_err(format!(
                "failed to create storage directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)
            .map_err(|e| write_err(format!("failed to write {}: {e}", tmp_path.display())))?;

        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            // Rename can fail across some Windows filesystems
            warn!("atomic rename failed ({e}), falling back to direct write");
            std::fs::write(&path, value)
                .map_err(|e2| write_err(format!("failed to write {}: {e2}", path.display())))?;
            let _ = std::fs::remove_file(&tmp_path);
        }

        Ok(())
    }
}

/// Map a key to a safe file stem: anything outside `[A-Za-z0-9_-]` becomes `_`.
fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}
