//! File-backed storage implementation.

use crate::{StorageError, StorageResult, TokenStorage};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// File-backed storage persisting entries as a JSON object.
///
/// Entries survive process restarts within the same profile directory.
/// Every mutation rewrites the file through a temp-file rename, so readers
/// never observe a partially written store.
pub struct FileTokenStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileTokenStorage {
    /// Open the storage file, creating parent directories as needed.
    ///
    /// A missing file is treated as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| StorageError::Encoding(e.to_string()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        debug!(path = %self.path.display(), key = %key, "Setting entry");

        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        debug!(path = %self.path.display(), key = %key, "Deleting entry");

        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&entries)?;
        Ok(true)
    }
}
