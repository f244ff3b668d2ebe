//! Session storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the session snapshot and exports live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the snapshot file. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    /// Key the snapshot is stored under (must be non-empty).
    pub state_key: String,
    /// Directory exports are written to. Defaults to the working directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            state_key: "chatAppState".into(),
            export_dir: None,
        }
    }
}
