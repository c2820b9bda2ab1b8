//! Cart persistence slots

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Cart storage error
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single named slot holding the serialized cart
///
/// Each save replaces the whole value; there is no merging.
pub trait CartStorage: Send {
    /// Stored value, `None` if the slot was never written
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored value
    fn save(&self, contents: &str) -> Result<(), StorageError>;

    /// Drop the stored value
    fn delete(&self) -> Result<(), StorageError>;
}

/// File-backed slot
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    /// Slot `<base_path>/<slot>.json`
    pub fn new(base_path: impl Into<PathBuf>, slot: &str) -> Self {
        let path = base_path.into().join(format!("{slot}.json"));
        Self { path }
    }

    /// Make sure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&self, contents: &str) -> Result<(), StorageError> {
        self.ensure_dir()?;
        // Write then rename so a crash never leaves a half-written slot
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn delete(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory slot; clones share the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `contents`
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Current stored value
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, contents: &str) -> Result<(), StorageError> {
        *self.slot.lock() = Some(contents.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), StorageError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slot_save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileCartStorage::new(dir.path().join("acme"), "quickplate-cart");

        assert!(storage.load().unwrap().is_none());
        storage.save("[]").unwrap();
        assert!(storage.exists());
        assert_eq!(storage.load().unwrap().as_deref(), Some("[]"));

        storage.save("[{\"id\":1}]").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("[{\"id\":1}]"));
        assert!(!storage.path().with_extension("json.tmp").exists());

        storage.delete().unwrap();
        assert!(!storage.exists());
    }

    #[test]
    fn test_memory_slot_is_shared_between_clones() {
        let storage = MemoryCartStorage::new();
        let observer = storage.clone();
        storage.save("[]").unwrap();
        assert_eq!(observer.contents().as_deref(), Some("[]"));
    }
}
