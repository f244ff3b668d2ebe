//! Retry/backoff configuration for remote exchanges.

use serde::{Deserialize, Serialize};

/// Retry settings for 503 responses and network faults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first (valid range: 1-10).
    pub max_attempts: u32,
    /// Delay before the first retry in ms, doubling each time (valid range: 0-60000).
    pub base_delay_ms: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}
