//! Error types for the Notary Core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing an asymmetric signer or verifier.
///
/// These are fatal at startup: a signer that failed to load its key is
/// never handed out.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("cannot read key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no PEM block found: {0}")]
    Pem(String),

    #[error("unsupported PEM label: {0}")]
    UnsupportedLabel(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Per-request signing failures.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("RSA signing failed: {0}")]
    Rsa(String),
}

/// Failures while encoding a receipt to its stored form.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("payload is not valid UTF-8: {0}")]
    NonUtf8Payload(#[from] std::str::Utf8Error),

    #[error("cannot serialize receipt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Syntactic failures while decoding a stored receipt.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed receipt document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field {field} is not valid hex: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("field {field} has length {actual}, expected {expected}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("inconsistent receipt: {0}")]
    Inconsistent(String),
}

/// Verification failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("recomputed digest does not match the receipt")]
    DigestMismatch,

    #[error("signature verification failed")]
    SignatureInvalid,

    #[error("receipt carries an integrity stamp, not a signature")]
    NotSigned,
}
