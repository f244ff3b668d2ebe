//! Provider-independent parts of an exchange: turn normalization and the
//! retry loop.

mod normalize;
mod retry;

pub use normalize::{normalize_conversation, Turn};
pub use retry::{send_with_retry, RetryPolicy, SERVICE_UNAVAILABLE};
