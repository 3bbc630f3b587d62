/// Durable storage backends for the catalog snapshot
///
/// The store persists through the `Storage` trait (get/set by key) so it
/// never depends on a specific backend. The real application uses
/// `JsonFileStorage`; tests use `MemoryStorage`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

/// Fixed key under which the catalog snapshot is stored
pub const STORAGE_KEY: &str = "product-storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
}

/// Key/value storage capability.
///
/// Values are opaque strings (JSON in practice). A missing key reads
/// as `Ok(None)`, never as an error.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON file per key in the user data directory.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create the storage directory (if needed) and open it.
    ///
    /// Files live in the user's data directory:
    /// - Linux: ~/.local/share/product-catalog/
    /// - macOS: ~/Library/Application Support/product-catalog/
    /// - Windows: %APPDATA%\product-catalog\
    pub fn new() -> Result<Self, StorageError> {
        Self::at(Self::get_data_dir())
    }

    /// Open storage rooted at an explicit directory
    pub fn at(dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir)?;
        Ok(JsonFileStorage { dir })
    }

    /// Get the directory where snapshot files should be stored
    fn get_data_dir() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(|| dirs::home_dir())
            .expect("Could not determine user data directory");

        path.push("product-catalog");
        path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a test can keep a handle
/// onto storage it has handed to a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();

        assert!(storage.get("missing").unwrap().is_none());

        storage.set("key", "value").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some("value"));

        storage.set("key", "replaced").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some("replaced"));
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let mut storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set("key", "value").unwrap();

        assert_eq!(handle.get("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = std::env::temp_dir().join(format!("product-catalog-test-{}", uuid::Uuid::new_v4()));
        let mut storage = JsonFileStorage::at(dir.clone()).unwrap();

        assert!(storage.get(STORAGE_KEY).unwrap().is_none());

        storage.set(STORAGE_KEY, "{\"products\":[]}").unwrap();
        assert_eq!(
            storage.get(STORAGE_KEY).unwrap().as_deref(),
            Some("{\"products\":[]}")
        );

        fs::remove_dir_all(dir).unwrap();
    }
}
