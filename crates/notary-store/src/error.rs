//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing an entry failed (permissions, disk full, bad path).
    #[error("failed to write entry {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// No entry exists under the key.
    #[error("entry not found: {0}")]
    NotFound(String),

    /// The entry exists but could not be read.
    #[error("failed to read entry {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing directory could not be created or opened.
    #[error("failed to open store: {0}")]
    Open(#[source] std::io::Error),

    /// The backing namespace could not be enumerated.
    #[error("failed to list entries: {0}")]
    List(#[source] std::io::Error),

    /// The key cannot name an entry (empty, path separator, reserved prefix).
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// A lock guarding in-memory state was poisoned.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Whether the caller, not the store, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::InvalidKey(_))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
