//! Bounded retry with exponential backoff.

use std::time::Duration;

use tracing::{debug, warn};

use crate::transport::{RawResponse, Transport};
use crate::ExchangeError;

/// Status the remote uses to signal temporary overload.
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// How many requests to make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each one after.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exp)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// POST `body` through `transport`, retrying 503s and transport faults.
///
/// Any response other than a 503 ends the loop and is returned as is,
/// success or not. A 503 on the final attempt becomes
/// [`ExchangeError::TransientUnavailable`]; a transport fault on the final
/// attempt becomes [`ExchangeError::TransportFailure`].
pub async fn send_with_retry(
    transport: &dyn Transport,
    url: &str,
    api_key: &str,
    body: &serde_json::Value,
    policy: &RetryPolicy,
) -> Result<RawResponse, ExchangeError> {
    let attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        debug!(attempt, max_attempts = attempts, "sending exchange request");
        let outcome = transport.post_json(url, api_key, body).await;
        let last = attempt >= attempts;

        match outcome {
            Ok(resp) if resp.status == SERVICE_UNAVAILABLE => {
                if last {
                    warn!(attempts, "service unavailable, retries exhausted");
                    return Err(ExchangeError::TransientUnavailable {
                        status: resp.status,
                        attempts,
                    });
                }
                warn!(attempt, "service unavailable, backing off");
            }
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if last {
                    warn!(attempts, "transport failure, retries exhausted: {e}");
                    return Err(e.into());
                }
                warn!(attempt, "transport failure, backing off: {e}");
            }
        }

        tokio::time::sleep(policy.delay_after(attempt)).await;
        attempt += 1;
    }
}
