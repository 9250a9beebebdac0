use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{KeyValueStore, Result, StorageError};

/// In-memory key/value store.
///
/// Clones share the same underlying map, which makes it convenient for tests
/// that want to inspect what a session persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let store = InMemoryStore::new();
        store.set("shop:cart", "{\"items\":[]}").unwrap();

        assert_eq!(
            store.get("shop:cart").unwrap().as_deref(),
            Some("{\"items\":[]}")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_key_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get("shop:orders").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let store = InMemoryStore::new();
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn clones_share_entries() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.set("a", "1").unwrap();

        assert_eq!(other.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(other.keys().unwrap(), vec!["a".to_string()]);
    }
}
