//! JSON wire form of a receipt.
//!
//! The stored document is a flat JSON object:
//!
//! ```json
//! {"Timestamp":"2024-01-15T10:30:00.123456789+00:00","Payload":"hello","Hash":"3f60...","Signature":"5364..."}
//! ```
//!
//! Binary fields are hex. `Signature` always carries the integrity value:
//! the RSA signature for a signed receipt, the SHA-512 stamp otherwise.
//! `Hash` (the SHA-256 digest) is present only on signed receipts, so its
//! presence decides the mode. Decoding is syntactic: nothing is recomputed
//! or verified here.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::crypto::{RsaSignature, Sha256Digest, Sha512Digest};
use crate::error::{DecodeError, EncodeError};
use crate::receipt::{Integrity, Receipt, SignerMode};
use crate::types::{ReceiptHash, Timestamp};

/// A decoded, not yet verified, receipt document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireReceipt {
    pub timestamp: String,
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub signature: String,
}

impl WireReceipt {
    /// Build the wire form of a receipt.
    ///
    /// Fails if the payload is not valid UTF-8, since the stored text could
    /// not reproduce the signed bytes.
    pub fn from_receipt(receipt: &Receipt) -> Result<Self, EncodeError> {
        let payload = std::str::from_utf8(receipt.payload())?.to_string();
        let (hash, signature) = match receipt.integrity() {
            Integrity::Signed { digest, signature } => (Some(digest.to_hex()), signature.to_hex()),
            Integrity::Stamped { hash } => (None, hash.to_hex()),
        };
        Ok(Self {
            timestamp: receipt.timestamp().as_str().to_string(),
            payload,
            hash,
            signature,
        })
    }

    /// Which mode produced this document.
    pub fn mode(&self) -> SignerMode {
        if self.hash.is_some() {
            SignerMode::Asymmetric
        } else {
            SignerMode::DigestOnly
        }
    }

    /// Decoded `Hash` field.
    pub fn hash_bytes(&self) -> Result<Option<Vec<u8>>, DecodeError> {
        self.hash
            .as_deref()
            .map(|hash| decode_hex("Hash", hash))
            .transpose()
    }

    /// Decoded `Signature` field.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        decode_hex("Signature", &self.signature)
    }

    /// The identifier this document should be stored under.
    pub fn id(&self) -> Result<ReceiptHash, DecodeError> {
        Ok(ReceiptHash::from_integrity(&self.signature_bytes()?))
    }

    /// Rebuild a typed receipt, checking field shapes.
    pub fn into_receipt(self) -> Result<Receipt, DecodeError> {
        let integrity = match self.hash.as_deref() {
            Some(digest) => Integrity::Signed {
                digest: typed_field("Hash", digest, 32, Sha256Digest::from_hex)?,
                signature: RsaSignature::from_hex(&self.signature).map_err(|source| {
                    DecodeError::InvalidHex {
                        field: "Signature",
                        source,
                    }
                })?,
            },
            None => Integrity::Stamped {
                hash: typed_field("Signature", &self.signature, 64, Sha512Digest::from_hex)?,
            },
        };

        Ok(Receipt::from_parts(
            Timestamp::from_string(self.timestamp),
            Bytes::from(self.payload.into_bytes()),
            integrity,
        ))
    }
}

/// Serialize a receipt to its stored JSON form.
pub fn to_wire(receipt: &Receipt) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(&WireReceipt::from_receipt(receipt)?)?)
}

/// Parse a stored JSON document, validating every hex field.
pub fn from_wire(bytes: &[u8]) -> Result<WireReceipt, DecodeError> {
    let wire: WireReceipt = serde_json::from_slice(bytes)?;
    wire.hash_bytes()?;
    wire.signature_bytes()?;
    Ok(wire)
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, DecodeError> {
    hex::decode(value).map_err(|source| DecodeError::InvalidHex { field, source })
}

/// Parse a fixed-width hex field, reporting a wrong width as a length error.
fn typed_field<T>(
    field: &'static str,
    value: &str,
    expected: usize,
    parse: impl FnOnce(&str) -> Result<T, hex::FromHexError>,
) -> Result<T, DecodeError> {
    if value.len() != expected * 2 {
        return Err(DecodeError::InvalidLength {
            field,
            expected,
            actual: value.len() / 2,
        });
    }
    parse(value).map_err(|source| DecodeError::InvalidHex { field, source })
}
