//! The Notary: signs payloads into receipts and keeps them content-addressed.
//!
//! The notary owns one signer and one store for its whole lifetime. Every
//! operation is a short pipeline over the two; there is no other state.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use notary_core::{
    from_wire, to_wire, DigestSigner, KeyLoadError, Receipt, ReceiptHash, RsaSigner,
    SignatureVerifier, Signer, SignerMode, Timestamp, WireReceipt,
};
use notary_store::{StorageEntry, Store};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{NotaryError, Result};

/// Pick the signing strategy from an optional key file.
///
/// With a key the notary issues RSA signatures; without one it falls back to
/// keyless SHA-512 integrity stamps.
pub fn signer_from_key_file(
    path: Option<&Path>,
) -> std::result::Result<Arc<dyn Signer>, KeyLoadError> {
    match path {
        Some(path) => {
            let signer = RsaSigner::from_pem_file(path)?;
            info!(bits = signer.signature_len() * 8, "loaded RSA signing key");
            Ok(Arc::new(signer))
        }
        None => {
            warn!("no signing key configured, receipts will carry integrity stamps only");
            Ok(Arc::new(DigestSigner::new()))
        }
    }
}

/// Outcome of re-checking a stored receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// The identifier that was checked.
    pub hash: ReceiptHash,
    /// Mode of the stored receipt.
    pub mode: SignerMode,
    /// The stored content hashes to its own integrity value and identifier.
    pub integrity_ok: bool,
    /// Signature check against this notary's key. `None` for integrity
    /// stamps, or when the notary holds no key.
    pub signature_ok: Option<bool>,
}

/// The notarization service.
pub struct Notary<S: Store> {
    signer: Arc<dyn Signer>,
    verifier: Option<SignatureVerifier>,
    store: Arc<S>,
}

impl<S: Store> Notary<S> {
    pub fn new(signer: Arc<dyn Signer>, store: S) -> Self {
        let verifier = signer.public_key().map(SignatureVerifier::new);
        Self {
            signer,
            verifier,
            store: Arc::new(store),
        }
    }

    /// The mode every new receipt is issued in.
    pub fn mode(&self) -> SignerMode {
        self.signer.mode()
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Issuing
    // ─────────────────────────────────────────────────────────────────────────

    /// Notarize `payload` at the current local time and persist the receipt.
    ///
    /// Returns the receipt's identifier together with the receipt. Nothing is
    /// returned unless the store accepted the write. Payloads must be UTF-8
    /// text; anything else is rejected before signing.
    pub async fn notarize(&self, payload: impl Into<Bytes>) -> Result<(ReceiptHash, Receipt)> {
        let receipt = self.signer.sign(text_payload(payload.into())?)?;
        self.persist(receipt).await
    }

    /// Like [`Notary::notarize`] with a caller-supplied capture time.
    pub async fn notarize_at(
        &self,
        timestamp: Timestamp,
        payload: impl Into<Bytes>,
    ) -> Result<(ReceiptHash, Receipt)> {
        let receipt = self.signer.sign_at(timestamp, text_payload(payload.into())?)?;
        self.persist(receipt).await
    }

    async fn persist(&self, receipt: Receipt) -> Result<(ReceiptHash, Receipt)> {
        let id = receipt.id();
        let entry = StorageEntry::new(id.storage_key(), to_wire(&receipt)?);
        self.store.store(&entry).await?;

        info!(
            hash = ?id,
            mode = ?receipt.mode(),
            bytes = receipt.payload().len(),
            "notarized payload"
        );
        Ok((id, receipt))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Retrieval
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the stored receipt named by `hash`.
    ///
    /// Decoding is syntactic; use [`Notary::verify`] to re-check integrity.
    pub async fn load(&self, hash: &str) -> Result<WireReceipt> {
        let id = parse_hash(hash)?;
        self.load_id(&id).await
    }

    /// Fetch every stored receipt, in no particular order.
    ///
    /// One undecodable entry fails the whole listing.
    pub async fn list(&self) -> Result<Vec<WireReceipt>> {
        let entries = self.store.list().await?;
        entries
            .iter()
            .map(|entry| {
                from_wire(&entry.body).map_err(|e| {
                    warn!(key = %entry.key, error = %e, "stored receipt failed to decode");
                    NotaryError::from(e)
                })
            })
            .collect()
    }

    async fn load_id(&self, id: &ReceiptHash) -> Result<WireReceipt> {
        let entry = self.store.load(&id.storage_key()).await?;
        from_wire(&entry.body).map_err(|e| {
            warn!(hash = ?id, error = %e, "stored receipt failed to decode");
            NotaryError::from(e)
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-check a stored receipt.
    ///
    /// Integrity means the timestamp and payload still hash to the stored
    /// value and the stored value is the one the receipt is filed under. The
    /// signature is checked only for signed receipts, and only if this
    /// notary holds a key.
    pub async fn verify(&self, hash: &str) -> Result<Verification> {
        let id = parse_hash(hash)?;
        let wire = self.load_id(&id).await?;
        let mode = wire.mode();
        let receipt = wire.into_receipt()?;

        let integrity_ok = receipt.id() == id && receipt.check_integrity().is_ok();
        let signature_ok = match &self.verifier {
            Some(verifier) if receipt.is_signed() => Some(verifier.verify(&receipt).is_ok()),
            _ => None,
        };

        if !integrity_ok || signature_ok == Some(false) {
            warn!(hash = ?id, integrity_ok, ?signature_ok, "stored receipt failed verification");
        }

        Ok(Verification {
            hash: id,
            mode,
            integrity_ok,
            signature_ok,
        })
    }
}

fn text_payload(payload: Bytes) -> Result<Bytes> {
    std::str::from_utf8(&payload).map_err(NotaryError::InvalidPayload)?;
    Ok(payload)
}

fn parse_hash(hash: &str) -> Result<ReceiptHash> {
    ReceiptHash::parse(hash).map_err(|_| NotaryError::InvalidHash(hash.to_string()))
}
