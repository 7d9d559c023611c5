//! # Notary Store
//!
//! Storage abstraction for the notary. Provides a trait-based interface
//! for receipt persistence with filesystem and in-memory implementations.
//!
//! ## Overview
//!
//! The store is a flat namespace of `key -> bytes`. It never interprets the
//! bytes it holds; the service layer derives keys from receipt identifiers
//! and encodes bodies with the wire codec.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`FileStore`] - One file per entry in a private directory
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`StorageEntry`] - A key and its body
//!
//! ## Usage
//!
//! ```rust,no_run
//! use notary_store::{FileStore, StorageEntry, Store};
//!
//! async fn example() {
//!     let store = FileStore::open("./receipts").unwrap();
//!     let entry = StorageEntry::new("ab12.json", b"{}".to_vec());
//!     store.store(&entry).await.unwrap();
//!     assert_eq!(store.load("ab12.json").await.unwrap(), entry);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic writes**: a crash mid-write never leaves a truncated entry visible
//! - **Flat keys**: keys containing separators or starting with `.` are rejected
//! - **Long keys**: `FileStore` splits keys longer than a file name allows
//!   across nested directories and joins them back when listing

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use fs::{FileStore, NAME_MAX};
pub use memory::MemoryStore;
pub use traits::{validate_key, StorageEntry, Store, StoreExt};
