//! Key-value storage slots backing the task store

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use eyre::{Context, Result};
use fs2::FileExt;
use tracing::debug;

/// A key-value slot store holding serialized values
pub trait Storage: Send {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage: one `{key}.json` file per slot
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open or create a storage directory at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create storage directory")?;
        debug!(?base_path, "Opened file storage");
        Ok(Self { base_path })
    }

    /// Directory holding the slot files
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.lock", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            debug!(key, "get: slot absent");
            return Ok(None);
        }
        let content = fs::read_to_string(&path).context(format!("Failed to read slot: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path(key))
            .context("Failed to open lock file")?;
        lock_file.lock_exclusive().context("Failed to lock slot")?;

        let path = self.slot_path(key);
        let written = fs::write(&path, value).context(format!("Failed to write slot: {}", path.display()));

        FileExt::unlock(&lock_file).context("Failed to unlock slot")?;
        written?;
        debug!(key, bytes = value.len(), "set: slot written");
        Ok(())
    }
}

/// In-memory storage; clones share the same slots
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot pre-populated
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().map_err(|e| eyre::eyre!("Storage lock poisoned: {}", e))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|e| eyre::eyre!("Storage lock poisoned: {}", e))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_slot_is_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();
        assert!(storage.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_set_then_get() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(temp.path()).unwrap();

        storage.set("slot", "[1,2,3]").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(storage.slot_path("slot").exists());

        storage.set("slot", "[]").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_creates_nested_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_memory_storage_clones_share_slots() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();

        writer.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_storage_with_value() {
        let storage = MemoryStorage::with_value("k", "seed");
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("seed"));
        assert!(storage.get("other").unwrap().is_none());
    }
}
