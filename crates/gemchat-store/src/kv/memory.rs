//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gemchat_common::StoreError;

use super::KeyValueStore;

/// Shared in-memory map. Clones refer to the same underlying slots, so a
/// test can keep a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot, as if written by a previous process.
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.into(), value.into());
        }
        self
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let slots = self.slots.lock().map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
