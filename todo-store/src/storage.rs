//! Storage backends for persisted state
//!
//! The store treats storage as an opaque key-value collaborator with
//! `get`/`set`/`remove`. Encryption at rest belongs to the backend: an
//! encrypting backend implements [`StorageBackend`] like any other.

use crate::error::{Result, TodoError};
use crate::utils::validate_storage_key;
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Key-value storage the persisted state is written through
pub trait StorageBackend: Debug + Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory storage
///
/// Clones share the same entries, so a test can keep a handle to inspect
/// what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| TodoError::storage("memory storage lock poisoned"))
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// File-based storage with one JSON file per key
///
/// Values are written as given; the directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for stored values
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the file path for a key
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            TodoError::storage(format!(
                "Failed to read stored value '{}': {}",
                path.display(),
                e
            ))
        })?;

        trace!("Read {} bytes from {}", content.len(), path.display());
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        fs::create_dir_all(&self.base_dir)?;

        fs::write(&path, value).map_err(|e| {
            TodoError::storage(format!(
                "Failed to write stored value '{}': {}",
                path.display(),
                e
            ))
        })?;

        trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path)?;
        Ok(())
    }
}
