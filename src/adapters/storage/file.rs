//! File-backed storage adapter.
//!
//! Persists the key-value map as a single JSON file so desktop and dev
//! shells keep their token between runs. The file is loaded once at
//! construction and rewritten on every change.
//!
//! The [`SessionStorage`] port has no error channel, so IO and parse
//! failures are logged and degrade to empty/unchanged state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::ports::SessionStorage;

/// File-backed implementation of the [`SessionStorage`] port.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Opens storage at the given path, loading existing content if present.
    ///
    /// An unreadable or unparseable file starts the store empty; the stale
    /// file is overwritten on the next write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = Self::load(&path);
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn load(path: &Path) -> HashMap<String, String> {
        if !path.exists() {
            return HashMap::new();
        }

        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("ignoring unparseable session file {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) => {
                tracing::warn!("failed to read session file {}: {}", path.display(), e);
                HashMap::new()
            }
        }
    }

    fn persist(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("failed to create session dir {}: {}", parent.display(), e);
                return;
            }
        }

        let json = match serde_json::to_string_pretty(values) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize session values: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, json) {
            tracing::warn!("failed to write session file {}: {}", self.path.display(), e);
        }
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.write().unwrap();
        if values.remove(key).is_some() {
            self.persist(&values);
        }
    }
}
