//! Receipt: the notarization record.
//!
//! A receipt is immutable. Once created by a [`Signer`](crate::Signer) it
//! cannot be edited; amending a payload means notarizing it again under a
//! new timestamp.

use bytes::Bytes;

use crate::crypto::{RsaSignature, Sha256Digest, Sha512Digest};
use crate::error::VerifyError;
use crate::types::{ReceiptHash, Timestamp};

/// Which kind of integrity value a receipt carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerMode {
    /// RSA signature over a SHA-256 digest. Third-party verifiable.
    Asymmetric,
    /// Bare SHA-512 stamp. Tamper-evident, not attributable.
    DigestOnly,
}

/// The integrity material bound to `(timestamp, payload)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Integrity {
    /// `digest = SHA-256(ts || payload)`, `signature = RSA-PKCS1v15(key, digest)`.
    Signed {
        digest: Sha256Digest,
        signature: RsaSignature,
    },
    /// `hash = SHA-512(ts || payload)`.
    Stamped { hash: Sha512Digest },
}

impl Integrity {
    /// The bytes the canonical identifier is derived from.
    pub fn integrity_value(&self) -> &[u8] {
        match self {
            Integrity::Signed { signature, .. } => signature.as_bytes(),
            Integrity::Stamped { hash } => hash.as_bytes(),
        }
    }

    pub fn mode(&self) -> SignerMode {
        match self {
            Integrity::Signed { .. } => SignerMode::Asymmetric,
            Integrity::Stamped { .. } => SignerMode::DigestOnly,
        }
    }
}

/// A notarization receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    timestamp: Timestamp,
    payload: Bytes,
    integrity: Integrity,
}

impl Receipt {
    /// Assemble a receipt from already-computed parts.
    ///
    /// Signers use this after computing the integrity value; decoders use it
    /// to rebuild a stored receipt. Nothing is checked here, see
    /// [`Receipt::check_integrity`].
    pub fn from_parts(timestamp: Timestamp, payload: Bytes, integrity: Integrity) -> Self {
        Self {
            timestamp,
            payload,
            integrity,
        }
    }

    /// The message bound into the digest: `timestamp || payload`.
    pub fn signed_message(timestamp: &Timestamp, payload: &[u8]) -> Vec<u8> {
        let mut message = Vec::with_capacity(timestamp.as_bytes().len() + payload.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(payload);
        message
    }

    /// The canonical identifier: hex of the integrity value.
    pub fn id(&self) -> ReceiptHash {
        ReceiptHash::from_integrity(self.integrity.integrity_value())
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn integrity(&self) -> &Integrity {
        &self.integrity
    }

    pub fn mode(&self) -> SignerMode {
        self.integrity.mode()
    }

    /// Whether this receipt carries a verifiable signature.
    pub fn is_signed(&self) -> bool {
        matches!(self.integrity, Integrity::Signed { .. })
    }

    /// The SHA-256 digest (signed receipts only).
    pub fn digest(&self) -> Option<&Sha256Digest> {
        match &self.integrity {
            Integrity::Signed { digest, .. } => Some(digest),
            Integrity::Stamped { .. } => None,
        }
    }

    /// The RSA signature (signed receipts only).
    pub fn signature(&self) -> Option<&RsaSignature> {
        match &self.integrity {
            Integrity::Signed { signature, .. } => Some(signature),
            Integrity::Stamped { .. } => None,
        }
    }

    /// Recompute the digest or stamp from `(timestamp, payload)` and compare.
    ///
    /// This needs no key and proves only that the stored fields agree with
    /// each other. Signature verification is [`SignatureVerifier`](crate::SignatureVerifier).
    pub fn check_integrity(&self) -> Result<(), VerifyError> {
        let parts: [&[u8]; 2] = [self.timestamp.as_bytes(), self.payload.as_ref()];
        let matches = match &self.integrity {
            Integrity::Signed { digest, .. } => Sha256Digest::hash_parts(&parts) == *digest,
            Integrity::Stamped { hash } => Sha512Digest::hash_parts(&parts) == *hash,
        };
        if matches {
            Ok(())
        } else {
            Err(VerifyError::DigestMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamped(ts: &str, payload: &[u8]) -> Receipt {
        let timestamp = Timestamp::from_string(ts);
        let hash = Sha512Digest::hash(&Receipt::signed_message(&timestamp, payload));
        Receipt::from_parts(
            timestamp,
            Bytes::copy_from_slice(payload),
            Integrity::Stamped { hash },
        )
    }

    #[test]
    fn test_signed_message_timestamp_first() {
        let ts = Timestamp::from_string("T");
        assert_eq!(Receipt::signed_message(&ts, b"hello"), b"Thello".to_vec());
        assert_eq!(Receipt::signed_message(&ts, b""), b"T".to_vec());
    }

    #[test]
    fn test_stamped_receipt_id_is_hash_hex() {
        let receipt = stamped("2024-01-15T10:30:00.123456789+00:00", b"hello");
        let Integrity::Stamped { hash } = receipt.integrity() else {
            panic!("expected a stamp");
        };
        assert_eq!(receipt.id().as_str(), hash.to_hex());
        assert_eq!(receipt.id().as_str().len(), 128);
        assert_eq!(receipt.mode(), SignerMode::DigestOnly);
        assert!(!receipt.is_signed());
        assert!(receipt.digest().is_none());
        assert!(receipt.signature().is_none());
    }

    #[test]
    fn test_check_integrity() {
        let receipt = stamped("2024-01-15T10:30:00.123456789+00:00", b"hello");
        assert_eq!(receipt.check_integrity(), Ok(()));

        let tampered = Receipt::from_parts(
            receipt.timestamp().clone(),
            Bytes::from_static(b"hellp"),
            receipt.integrity().clone(),
        );
        assert_eq!(tampered.check_integrity(), Err(VerifyError::DigestMismatch));

        let shifted = Receipt::from_parts(
            Timestamp::from_string("2024-01-15T10:30:01.123456789+00:00"),
            receipt.payload().clone(),
            receipt.integrity().clone(),
        );
        assert_eq!(shifted.check_integrity(), Err(VerifyError::DigestMismatch));
    }

    #[test]
    fn test_signed_integrity_value_is_signature() {
        let ts = Timestamp::from_string("T");
        let integrity = Integrity::Signed {
            digest: Sha256Digest::hash(b"Tx"),
            signature: RsaSignature(vec![0xab; 4]),
        };
        let receipt = Receipt::from_parts(ts, Bytes::from_static(b"x"), integrity);
        assert_eq!(receipt.id().as_str(), "abababab");
        assert!(receipt.is_signed());
        assert_eq!(receipt.check_integrity(), Ok(()));
    }
}
