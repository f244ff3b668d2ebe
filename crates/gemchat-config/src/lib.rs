//! gemchat configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gemchat_config::toml_loader::load_default;
//!
//! let config = load_default().expect("failed to load config");
//! println!("model: {}", config.api.model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ApiConfig, GemchatConfig, LogLevel, LoggingConfig, RetryConfig, SafetyLevel, StorageConfig,
};

