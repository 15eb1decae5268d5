//! In-memory storage.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::Result;
use crate::port::outbound::storage::{KeyValueStore, StorageKey};

/// Storage held in process memory. Used by tests and by the `memory`
/// storage backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key.
    #[must_use]
    pub fn with_value(self, key: StorageKey, value: impl Into<String>) -> Self {
        self.values.lock().insert(key, value.into());
        self
    }

    #[must_use]
    pub fn contains(&self, key: StorageKey) -> bool {
        self.values.lock().contains_key(&key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.values.lock().get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.values.lock().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.values.lock().remove(&key);
        Ok(())
    }
}
