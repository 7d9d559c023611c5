//! # Notary
//!
//! Notarization as a library: payloads go in, timestamped receipts come out
//! and are filed under their own identifier.
//!
//! ## Overview
//!
//! - **Receipt**: Immutable. Binds a payload to its capture time with a
//!   signature (RSA key configured) or an integrity stamp (no key).
//! - **Identifier**: Hex of the integrity value. Also the storage key.
//! - **Store**: Any [`store::Store`]; the filesystem one is the default.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use notary::{signer_from_key_file, Notary};
//! use notary::store::FileStore;
//! use std::path::Path;
//!
//! async fn example() {
//!     let signer = signer_from_key_file(Some(Path::new("signing.pem"))).unwrap();
//!     let store = FileStore::open("./receipts").unwrap();
//!     let notary = Notary::new(signer, store);
//!
//!     let (hash, _receipt) = notary.notarize("hello").await.unwrap();
//!     let stored = notary.load(hash.as_str()).await.unwrap();
//!     assert_eq!(stored.payload, "hello");
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `notary::core` - Receipts, signers, codec
//! - `notary::store` - Storage abstraction and backends

pub mod error;
pub mod service;

// Re-export component crates
pub use notary_core as core;
pub use notary_store as store;

// Re-export main types for convenience
pub use error::{NotaryError, Result};
pub use service::{signer_from_key_file, Notary, Verification};

// Re-export commonly used core types
pub use notary_core::{
    Receipt, ReceiptHash, RsaSigner, SignatureVerifier, Signer, SignerMode, Timestamp, WireReceipt,
};
