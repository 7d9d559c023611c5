//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. The RSA key under `fixtures/`
//! was generated once with `openssl genrsa 2048` and is public; never use it
//! for anything but tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use notary_core::{Receipt, RsaSigner, SignatureVerifier, Signer, Timestamp};
use notary_store::MemoryStore;

/// PKCS#1 private key (`RSA PRIVATE KEY`).
pub const RSA_PKCS1_PEM: &str = include_str!("../fixtures/rsa-2048-pkcs1.pem");
/// The same key as PKCS#8 (`PRIVATE KEY`).
pub const RSA_PKCS8_PEM: &str = include_str!("../fixtures/rsa-2048-pkcs8.pem");
/// Public half, PKCS#1 (`RSA PUBLIC KEY`).
pub const RSA_PKCS1_PUBLIC_PEM: &str = include_str!("../fixtures/rsa-2048-pkcs1-public.pem");
/// Public half, SubjectPublicKeyInfo (`PUBLIC KEY`).
pub const RSA_SPKI_PUBLIC_PEM: &str = include_str!("../fixtures/rsa-2048-spki-public.pem");

/// Capture time used by every golden vector.
pub const FIXED_TIMESTAMP: &str = "2024-01-15T10:30:00.123456789+00:00";

/// [`FIXED_TIMESTAMP`] as a typed timestamp.
pub fn fixed_timestamp() -> Timestamp {
    Timestamp::from_string(FIXED_TIMESTAMP)
}

/// Signer backed by the fixture key.
pub fn fixture_signer() -> RsaSigner {
    RsaSigner::from_pem(RSA_PKCS1_PEM).expect("fixture key parses")
}

/// Verifier for the fixture key.
pub fn fixture_verifier() -> SignatureVerifier {
    SignatureVerifier::from_public_pem(RSA_SPKI_PUBLIC_PEM).expect("fixture public key parses")
}

/// A test fixture with the fixture signer and a memory store.
pub struct TestFixture {
    pub signer: Arc<RsaSigner>,
    pub store: MemoryStore,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            signer: Arc::new(fixture_signer()),
            store: MemoryStore::new(),
        }
    }

    /// The signer as the trait object the service takes.
    pub fn dyn_signer(&self) -> Arc<dyn Signer> {
        self.signer.clone()
    }

    /// Sign `payload` at [`FIXED_TIMESTAMP`].
    pub fn sign_fixed(&self, payload: &[u8]) -> Receipt {
        self.signer
            .sign_at(fixed_timestamp(), Bytes::copy_from_slice(payload))
            .expect("fixture signing succeeds")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A PEM file in a temporary directory, removed on drop.
pub struct KeyFile {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl KeyFile {
    /// Write `pem` to a fresh temp file.
    pub fn write(pem: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("key.pem");
        std::fs::write(&path, pem).expect("write key file");
        Self { _dir: dir, path }
    }

    /// The fixture private key on disk.
    pub fn fixture() -> Self {
        Self::write(RSA_PKCS1_PEM)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
