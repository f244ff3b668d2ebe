//! Controller outcome types and the in-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};

use gemchat_ai::ExchangeError;
use gemchat_common::Message;

/// What happened to a `send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The assistant replied; the reply was appended.
    Replied(Message),
    /// The exchange failed; a synthetic assistant message was appended.
    Failed {
        error: ExchangeError,
        message: Message,
    },
    /// Blank input or no active session; nothing changed.
    Ignored,
    /// Another exchange is still in flight; nothing changed.
    Busy,
}

/// Holds the `busy` flag for the length of one exchange; cleared on drop.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy flag. Returns `None` if already busy.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
