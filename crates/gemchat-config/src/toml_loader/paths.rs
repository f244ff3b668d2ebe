//! Where the config file lives, and seeding it on first run.

use std::path::{Path, PathBuf};

use gemchat_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// `config.toml` inside the platform config directory for gemchat.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    gemchat_common::paths::config_file()
}

/// Write the commented template to `path`, creating parent directories.
/// An existing file at `path` is never replaced.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir).map_err(|e| {
            ConfigError::PathError(format!("cannot create {}: {e}", dir.display()))
        })?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::PathError(format!("cannot write {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}
