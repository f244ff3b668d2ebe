//! Platform directory resolution for gemchat.

use std::path::PathBuf;

use crate::ConfigError;

pub const APP_NAME: &str = "gemchat";

/// Returns the platform-specific configuration directory for gemchat.
///
/// - macOS: `~/Library/Application Support/gemchat`
/// - Linux: `$XDG_CONFIG_HOME/gemchat` (defaults to `~/.config/gemchat`)
/// - Windows: `%APPDATA%\gemchat`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| ConfigError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for gemchat.
///
/// - macOS: `~/Library/Application Support/gemchat`
/// - Linux: `$XDG_DATA_HOME/gemchat` (defaults to `~/.local/share/gemchat`)
/// - Windows: `%APPDATA%\gemchat`
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| ConfigError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the main configuration file.
///
/// Located at `config_dir()/config.toml`.
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}
