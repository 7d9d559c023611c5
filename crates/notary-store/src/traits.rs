//! Store trait: the abstract interface for receipt persistence.
//!
//! The store is a flat map from key to bytes. It knows nothing about
//! receipts; callers derive the key from the receipt's own identifier, which
//! makes the map content-addressed.

use async_trait::async_trait;

use crate::error::{Result, StoreError};

/// The unit of persistence: a body stored under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    /// Flat name of the entry, e.g. `<hex>.json`.
    pub key: String,
    /// Serialized receipt.
    pub body: Vec<u8>,
}

impl StorageEntry {
    pub fn new(key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
        }
    }
}

/// The Store trait: async interface for entry persistence.
///
/// # Design Notes
///
/// - **Overwrite on conflict**: storing under an existing key replaces the
///   body. With content-derived keys the body is identical, so this is
///   observationally idempotent.
/// - **No delete**: entries are only removed out of band.
/// - **Unordered listing**: `list` makes no ordering promise.
#[async_trait]
pub trait Store: Send + Sync {
    /// Write `entry.body` under `entry.key`, creating or replacing it.
    async fn store(&self, entry: &StorageEntry) -> Result<()>;

    /// Read the entry under `key`.
    ///
    /// Returns [`StoreError::NotFound`] if nothing is stored there.
    async fn load(&self, key: &str) -> Result<StorageEntry>;

    /// Enumerate every entry, in no particular order.
    async fn list(&self) -> Result<Vec<StorageEntry>>;
}

/// Extension trait for common store patterns.
#[async_trait]
pub trait StoreExt: Store {
    /// Check whether an entry exists.
    async fn contains(&self, key: &str) -> Result<bool> {
        match self.load(key).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

#[async_trait]
impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    async fn store(&self, entry: &StorageEntry) -> Result<()> {
        (**self).store(entry).await
    }

    async fn load(&self, key: &str) -> Result<StorageEntry> {
        (**self).load(key).await
    }

    async fn list(&self) -> Result<Vec<StorageEntry>> {
        (**self).list().await
    }
}

/// Prefix reserved for in-flight writes.
pub(crate) const RESERVED_PREFIX: char = '.';

/// Reject keys that cannot name a flat entry.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key.starts_with(RESERVED_PREFIX)
        || key.contains(['/', '\\', '\0']);
    if invalid {
        Err(StoreError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}
