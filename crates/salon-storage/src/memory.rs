//! In-memory storage implementation.

use crate::{StorageResult, TokenStorage};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory storage for tests and ephemeral sessions.
///
/// Nothing is persisted; entries are lost when the process exits.
#[derive(Default)]
pub struct MemoryTokenStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut data = self.data.lock().unwrap();
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self.data.lock().unwrap();
        Ok(data.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let mut data = self.data.lock().unwrap();
        Ok(data.remove(key).is_some())
    }
}
