//! The session store: all sessions plus the active pointer, persisted as
//! one snapshot after every mutation.

mod session_store;

#[cfg(test)]
mod tests;

pub use session_store::{Clock, SessionStore, DEFAULT_STATE_KEY};
