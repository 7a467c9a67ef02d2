//! Key/value persistence helpers
//!
//! Everything the picker persists goes through [`KeyValueStore`] as JSON text.
//! A value that is missing or cannot be decoded reads as `None`; callers turn
//! that into their zero value (empty history, neutral tone).

use crate::interface::KeyValueStore;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// Process-local store, used by tests and hosts that do not need durability.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: String) -> Option<String> {
        self.entries.read().get(&key).cloned()
    }

    fn set(&self, key: String, value: String) {
        self.entries.write().insert(key, value);
    }

    fn remove(&self, key: String) {
        self.entries.write().remove(&key);
    }
}

/// Decode the JSON value stored under `key`.
pub(crate) fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key.to_string())?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable persisted value");
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
pub(crate) fn write_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key.to_string(), raw),
        Err(e) => tracing::warn!(key, error = %e, "failed to encode value for persistence"),
    }
}
