//! Key-value persistence adapter.
//!
//! A scoped string store in the spirit of browser local storage: the app
//! durably remembers the user's city selection under a single key across
//! process restarts. `JsonFileStore` keeps the whole scope in one JSON
//! object file under the config directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempo_core::StorageError;

/// Scoped string store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns `StorageError` when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any prior value.
    ///
    /// # Errors
    /// Returns `StorageError` when the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: one JSON object per scope.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `<dir>/storage.json`.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("storage.json"),
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| StorageError::Malformed(e.to_string()))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        fs::write(&self.path, json).map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Malformed(e)) => {
                // A corrupt scope is replaced rather than kept fatal
                tracing::warn!("Discarding malformed store: {e}");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, bypassing the trait (test setup)
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.map.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.get("selectedCities").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.set("selectedCities", r#"[{"key":"1","label":"A"}]"#).unwrap();
        assert_eq!(
            store.get("selectedCities").unwrap().as_deref(),
            Some(r#"[{"key":"1","label":"A"}]"#)
        );
    }

    #[test]
    fn test_set_overwrites_prior_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.set("k", "old").unwrap();
        store.set("k", "new").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = JsonFileStore::new(dir.path());
            store.set("k", "v").unwrap();
        }
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_corrupt_file_is_malformed_on_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("storage.json"), "not json").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(store.get("k"), Err(StorageError::Malformed(_))));
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("storage.json"), "not json").unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
