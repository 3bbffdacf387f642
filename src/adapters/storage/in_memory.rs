//! In-memory storage adapter.
//!
//! Backs the session in tests and in embeddings that have no durable slot.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::ports::{SessionStorage, TOKEN_KEY};

/// In-memory implementation of the [`SessionStorage`] port.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with a persisted token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.set(TOKEN_KEY, &token.into());
        storage
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().unwrap().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.values.write().unwrap().clear();
    }
}

impl SessionStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.write().unwrap().remove(key);
    }
}
