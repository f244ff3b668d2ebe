//! Key-value persistence boundary.
//!
//! The store only ever reads and writes one serialized snapshot under one
//! key, so the contract is a plain get/set of strings.

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

use gemchat_common::StoreError;

/// A durable string slot keyed by name.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
