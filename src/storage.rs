//! Local persistence adapter.
//!
//! The engine persists three independent JSON blobs (session credentials,
//! list cache, selected list id). The adapter trait keeps the backend
//! swappable: in-memory for tests, a plain file per key for embedders with
//! a writable data directory. There is no schema version or migration
//! handling; readers must tolerate missing or corrupt entries.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Keyed blob store. Save and remove failures are logged, never propagated;
/// persistence is best-effort.
pub trait StorageAdapter: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Load and decode a JSON blob, falling back on a missing or corrupt entry.
pub fn load_json<T: DeserializeOwned>(storage: &dyn StorageAdapter, key: &str, fallback: T) -> T {
    let Some(raw) = storage.load(key) else {
        return fallback;
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(%key, error = %e, "failed to parse stored blob, using fallback");
            fallback
        }
    }
}

/// Encode and store a JSON blob.
pub fn save_json<T: Serialize>(storage: &dyn StorageAdapter, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.save(key, &raw),
        Err(e) => tracing::error!(%key, error = %e, "failed to serialize blob"),
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Mutex-backed map, used in tests and by embedders that do their own
/// persistence.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One `{key}.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create the store, making the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal constants, but keep path traversal out anyway.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl StorageAdapter for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::write(self.path_for(key), value) {
            tracing::error!(%key, error = %e, "failed to persist blob");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::error!(%key, error = %e, "failed to remove blob");
            }
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
