//! Override storage
//!
//! The override document is the only mutable state of the content model.
//! It is kept under a fixed key in a small key-value store: one JSON file per
//! key in a state directory, or an in-memory map for tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, warn};

use crate::empty_document;

/// Storage key holding the serialized override document
pub const OVERRIDE_KEY: &str = "derm_site_override_v1";

/// Errors for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value storage scoped to one site.
pub trait KeyValueStore {
    /// Read the raw value under `key`, `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

/// File-backed store: `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Write to temp file first
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items().remove(key);
        Ok(())
    }
}

/// Persists the override document under [`OVERRIDE_KEY`].
#[derive(Debug, Clone)]
pub struct OverrideStore<S> {
    backend: S,
}

impl<S: KeyValueStore> OverrideStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Load the override document.
    ///
    /// Missing, unreadable or malformed data yields an empty document.
    pub fn load(&self) -> Value {
        let raw = match self.backend.get_item(OVERRIDE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return empty_document(),
            Err(e) => {
                warn!(error = %e, "override store unreadable, using no overrides");
                return empty_document();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(doc @ Value::Object(_)) => {
                debug!(bytes = raw.len(), "loaded overrides");
                doc
            }
            Ok(_) => {
                warn!("stored overrides are not an object, ignoring");
                empty_document()
            }
            Err(e) => {
                warn!(error = %e, "stored overrides are not valid JSON, ignoring");
                empty_document()
            }
        }
    }

    /// Persist the whole override document, replacing what was stored.
    pub fn save(&self, doc: &Value) -> Result<(), StoreError> {
        let raw = serde_json::to_string(doc)?;
        self.backend.set_item(OVERRIDE_KEY, &raw)?;
        debug!(bytes = raw.len(), "saved overrides");
        Ok(())
    }

    /// Remove the persisted override document.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove_item(OVERRIDE_KEY)?;
        debug!("cleared overrides");
        Ok(())
    }
}
