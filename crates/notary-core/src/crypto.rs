//! Cryptographic primitives: SHA-256/SHA-512 digests and RSA key handling.
//!
//! Strong newtypes keep the two digest widths and the signature bytes from
//! being confused with one another.

use std::fmt;
use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256, Sha512};

use crate::error::KeyLoadError;

/// PEM label of a PKCS#1 private key.
pub const PKCS1_PRIVATE_LABEL: &str = "RSA PRIVATE KEY";
/// PEM label of a PKCS#8 private key.
pub const PKCS8_PRIVATE_LABEL: &str = "PRIVATE KEY";
/// PEM label of a PKCS#1 public key.
pub const PKCS1_PUBLIC_LABEL: &str = "RSA PUBLIC KEY";
/// PEM label of an X.509 SubjectPublicKeyInfo public key.
pub const SPKI_PUBLIC_LABEL: &str = "PUBLIC KEY";

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest(pub [u8; 32]);

impl Sha256Digest {
    /// Compute the SHA-256 digest of data.
    pub fn hash(data: &[u8]) -> Self {
        Self::hash_parts(&[data])
    }

    /// Compute the SHA-256 digest of the concatenation of `parts`.
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Sha256Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 64-byte SHA-512 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha512Digest(pub [u8; 64]);

impl Sha512Digest {
    /// Compute the SHA-512 digest of data.
    pub fn hash(data: &[u8]) -> Self {
        Self::hash_parts(&[data])
    }

    /// Compute the SHA-512 digest of the concatenation of `parts`.
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha512::new();
        for part in parts {
            hasher.update(part);
        }
        let mut out = [0u8; 64];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 64];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Sha512Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA512({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Sha512Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An RSASSA-PKCS1-v1_5 signature. Its length equals the modulus size.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RsaSignature(pub Vec<u8>);

impl RsaSignature {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(Self)
    }
}

impl fmt::Debug for RsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "RsaSig({}...)", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for RsaSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Read a PEM file into memory.
pub fn read_pem_file(path: &Path) -> Result<String, KeyLoadError> {
    std::fs::read_to_string(path).map_err(|source| KeyLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an RSA private key from the first PEM block in `pem`.
///
/// Accepts PKCS#1 (`RSA PRIVATE KEY`) and PKCS#8 (`PRIVATE KEY`) blocks.
pub fn private_key_from_pem(pem: &str) -> Result<RsaPrivateKey, KeyLoadError> {
    let block = pem::parse(pem).map_err(|e| KeyLoadError::Pem(e.to_string()))?;
    match block.tag() {
        PKCS1_PRIVATE_LABEL => RsaPrivateKey::from_pkcs1_der(block.contents())
            .map_err(|e| KeyLoadError::InvalidKey(e.to_string())),
        PKCS8_PRIVATE_LABEL => RsaPrivateKey::from_pkcs8_der(block.contents())
            .map_err(|e| KeyLoadError::InvalidKey(e.to_string())),
        other => Err(KeyLoadError::UnsupportedLabel(other.to_string())),
    }
}

/// Parse an RSA public key from the first PEM block in `pem`.
///
/// Accepts PKCS#1 (`RSA PUBLIC KEY`) and SPKI (`PUBLIC KEY`) blocks.
pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey, KeyLoadError> {
    let block = pem::parse(pem).map_err(|e| KeyLoadError::Pem(e.to_string()))?;
    match block.tag() {
        PKCS1_PUBLIC_LABEL => RsaPublicKey::from_pkcs1_der(block.contents())
            .map_err(|e| KeyLoadError::InvalidKey(e.to_string())),
        SPKI_PUBLIC_LABEL => RsaPublicKey::from_public_key_der(block.contents())
            .map_err(|e| KeyLoadError::InvalidKey(e.to_string())),
        other => Err(KeyLoadError::UnsupportedLabel(other.to_string())),
    }
}
