//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as the
//! filesystem store but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::traits::{validate_key, StorageEntry, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn store(&self, entry: &StorageEntry) -> Result<()> {
        validate_key(&entry.key)?;
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(entry.key.clone(), entry.body.clone());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<StorageEntry> {
        validate_key(key)?;
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        entries
            .get(key)
            .map(|body| StorageEntry::new(key, body.clone()))
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn list(&self) -> Result<Vec<StorageEntry>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries
            .iter()
            .map(|(key, body)| StorageEntry::new(key.clone(), body.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new();
        let entry = StorageEntry::new("abcd.json", b"{\"Payload\":\"x\"}".to_vec());

        store.store(&entry).await.unwrap();
        assert_eq!(store.load("abcd.json").await.unwrap(), entry);
        assert!(store.contains("abcd.json").await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.load("missing.json").await,
            Err(StoreError::NotFound(key)) if key == "missing.json"
        ));
        assert!(!store.contains("missing.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store
            .store(&StorageEntry::new("k.json", b"one".to_vec()))
            .await
            .unwrap();
        store
            .store(&StorageEntry::new("k.json", b"two".to_vec()))
            .await
            .unwrap();

        assert_eq!(store.load("k.json").await.unwrap().body, b"two");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_rejects_bad_keys() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.store(&StorageEntry::new("../x", b"".to_vec())).await,
            Err(StoreError::InvalidKey(_))
        ));
        assert!(store.is_empty());
    }
}
