//! Error types for the notary service.

use notary_core::{DecodeError, EncodeError, KeyLoadError, ReceiptHash, SigningError};
use notary_store::StoreError;
use thiserror::Error;

/// Errors that can occur during notary operations.
#[derive(Debug, Error)]
pub enum NotaryError {
    /// The signer failed to produce a receipt.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(StoreError),

    /// The payload cannot be stored as text.
    #[error("payload is not valid UTF-8: {0}")]
    InvalidPayload(#[source] std::str::Utf8Error),

    /// A receipt could not be encoded for storage.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// A stored document could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The caller supplied something that is not a receipt identifier.
    #[error("invalid receipt hash: {0}")]
    InvalidHash(String),

    /// No receipt is stored under the identifier.
    #[error("receipt not found: {0}")]
    NotFound(String),

    /// The signing key could not be loaded.
    #[error("key error: {0}")]
    KeyLoad(#[from] KeyLoadError),
}

impl NotaryError {
    /// Whether the request, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            NotaryError::InvalidHash(_)
            | NotaryError::InvalidPayload(_)
            | NotaryError::NotFound(_) => true,
            NotaryError::Store(e) => e.is_client_error(),
            _ => false,
        }
    }
}

impl From<StoreError> for NotaryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => {
                let id = ReceiptHash::from_storage_key(&key)
                    .map(|h| h.to_string())
                    .unwrap_or(key);
                NotaryError::NotFound(id)
            }
            other => NotaryError::Store(other),
        }
    }
}

/// Result type for notary operations.
pub type Result<T> = std::result::Result<T, NotaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_is_lifted() {
        let err = NotaryError::from(StoreError::NotFound("ab12.json".to_string()));
        assert!(matches!(&err, NotaryError::NotFound(id) if id == "ab12"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_classification() {
        assert!(NotaryError::InvalidHash("zz".into()).is_client_error());
        let utf8 = std::str::from_utf8(&[0xff]).unwrap_err();
        assert!(NotaryError::InvalidPayload(utf8).is_client_error());
        assert!(NotaryError::from(StoreError::InvalidKey("..".into())).is_client_error());
        assert!(!NotaryError::from(StoreError::Poisoned).is_client_error());
        assert!(!NotaryError::Signing(SigningError::Rsa("boom".into())).is_client_error());
        assert!(!NotaryError::Decode(DecodeError::Inconsistent("x".into())).is_client_error());
    }
}
