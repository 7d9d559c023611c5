//! # Notary Core
//!
//! Pure primitives for the notary: receipts, signers, digests, and the wire codec.
//!
//! This crate does no storage and no networking. The only I/O is reading a
//! key file when a signer or verifier is constructed.
//!
//! ## Key Types
//!
//! - [`Receipt`] - Immutable record binding a payload to its capture time
//! - [`Signer`] - Capability that produces receipts; [`RsaSigner`] or [`DigestSigner`]
//! - [`ReceiptHash`] - Canonical identifier (hex of the integrity value)
//! - [`WireReceipt`] - The stored JSON document
//! - [`SignatureVerifier`] - Checks signed receipts against a public key
//!
//! ## Integrity
//!
//! Both strategies hash `timestamp || payload`, timestamp first. The
//! asymmetric signer signs the SHA-256 digest with RSASSA-PKCS1-v1_5; the
//! keyless signer keeps the SHA-512 digest as an integrity stamp.

pub mod codec;
pub mod crypto;
pub mod error;
pub mod receipt;
pub mod signer;
pub mod types;

pub use codec::{from_wire, to_wire, WireReceipt};
pub use crypto::{RsaSignature, Sha256Digest, Sha512Digest};
pub use error::{DecodeError, EncodeError, KeyLoadError, SigningError, VerifyError};
pub use receipt::{Integrity, Receipt, SignerMode};
pub use signer::{DigestSigner, RsaSigner, SignatureVerifier, Signer};
pub use types::{ReceiptHash, Timestamp, RECEIPT_KEY_SUFFIX};

pub use rsa::{RsaPrivateKey, RsaPublicKey};
