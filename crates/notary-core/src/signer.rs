//! Signers: the two strategies that turn a payload into a [`Receipt`].
//!
//! [`RsaSigner`] produces a third-party verifiable signature and needs a
//! private key. [`DigestSigner`] is keyless and produces an integrity stamp.
//! Both bind the capture time into the hashed material so neither a stale
//! signature nor a forged timestamp survives verification.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::crypto::{
    private_key_from_pem, public_key_from_pem, read_pem_file, RsaSignature, Sha256Digest,
    Sha512Digest,
};
use crate::error::{KeyLoadError, SigningError, VerifyError};
use crate::receipt::{Integrity, Receipt, SignerMode};
use crate::types::Timestamp;

/// The signing capability.
///
/// Implementations are immutable after construction and safe to share
/// across concurrent requests.
pub trait Signer: Send + Sync {
    /// Produce a receipt for `payload` captured at `timestamp`.
    ///
    /// Deterministic in `(timestamp, payload)` and the signer's key.
    fn sign_at(&self, timestamp: Timestamp, payload: Bytes) -> Result<Receipt, SigningError>;

    /// Produce a receipt for `payload` captured now.
    fn sign(&self, payload: Bytes) -> Result<Receipt, SigningError> {
        self.sign_at(Timestamp::now(), payload)
    }

    fn mode(&self) -> SignerMode;

    /// The public half of the signing key, if there is one.
    fn public_key(&self) -> Option<RsaPublicKey>;
}

/// RSASSA-PKCS1-v1_5 over `SHA-256(timestamp || payload)`.
#[derive(Clone)]
pub struct RsaSigner {
    private_key: RsaPrivateKey,
}

impl RsaSigner {
    /// Wrap an already parsed key.
    pub fn from_key(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }

    /// Parse a PKCS#1 or PKCS#8 PEM private key.
    pub fn from_pem(pem: &str) -> Result<Self, KeyLoadError> {
        private_key_from_pem(pem).map(Self::from_key)
    }

    /// Load a PEM private key from disk.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, KeyLoadError> {
        let pem = read_pem_file(path.as_ref())?;
        Self::from_pem(&pem)
    }

    /// Modulus size in bytes, which is also the signature length.
    pub fn signature_len(&self) -> usize {
        self.private_key.size()
    }
}

impl Signer for RsaSigner {
    fn sign_at(&self, timestamp: Timestamp, payload: Bytes) -> Result<Receipt, SigningError> {
        let digest = Sha256Digest::hash_parts(&[timestamp.as_bytes(), &payload[..]]);

        let mut rng = rand::thread_rng();
        let signature = self
            .private_key
            .sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha256>(), digest.as_bytes())
            .map_err(|e| SigningError::Rsa(e.to_string()))?;

        Ok(Receipt::from_parts(
            timestamp,
            payload,
            Integrity::Signed {
                digest,
                signature: RsaSignature(signature),
            },
        ))
    }

    fn mode(&self) -> SignerMode {
        SignerMode::Asymmetric
    }

    fn public_key(&self) -> Option<RsaPublicKey> {
        Some(self.private_key.to_public_key())
    }
}

impl fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaSigner(rsa-{})", self.private_key.size() * 8)
    }
}

/// Keyless `SHA-512(timestamp || payload)` stamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestSigner;

impl DigestSigner {
    pub fn new() -> Self {
        Self
    }
}

impl Signer for DigestSigner {
    fn sign_at(&self, timestamp: Timestamp, payload: Bytes) -> Result<Receipt, SigningError> {
        let hash = Sha512Digest::hash_parts(&[timestamp.as_bytes(), &payload[..]]);
        Ok(Receipt::from_parts(
            timestamp,
            payload,
            Integrity::Stamped { hash },
        ))
    }

    fn mode(&self) -> SignerMode {
        SignerMode::DigestOnly
    }

    fn public_key(&self) -> Option<RsaPublicKey> {
        None
    }
}

/// Checks signed receipts against an RSA public key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    public_key: RsaPublicKey,
}

impl SignatureVerifier {
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self { public_key }
    }

    /// Parse a PKCS#1 or SPKI PEM public key.
    pub fn from_public_pem(pem: &str) -> Result<Self, KeyLoadError> {
        public_key_from_pem(pem).map(Self::new)
    }

    /// Load a PEM public key from disk.
    pub fn from_public_pem_file(path: impl AsRef<Path>) -> Result<Self, KeyLoadError> {
        let pem = read_pem_file(path.as_ref())?;
        Self::from_public_pem(&pem)
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Recompute the digest, then check the signature over it.
    ///
    /// Integrity stamps are rejected with [`VerifyError::NotSigned`].
    pub fn verify(&self, receipt: &Receipt) -> Result<(), VerifyError> {
        let Integrity::Signed { digest, signature } = receipt.integrity() else {
            return Err(VerifyError::NotSigned);
        };
        receipt.check_integrity()?;
        self.verify_digest(digest, signature)
    }

    /// Check a signature over a digest without touching the payload.
    pub fn verify_digest(
        &self,
        digest: &Sha256Digest,
        signature: &RsaSignature,
    ) -> Result<(), VerifyError> {
        self.public_key
            .verify(
                Pkcs1v15Sign::new::<Sha256>(),
                digest.as_bytes(),
                signature.as_bytes(),
            )
            .map_err(|_| VerifyError::SignatureInvalid)
    }
}
