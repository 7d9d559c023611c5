//! Strong type definitions for the notary.
//!
//! Identifiers and captured times are newtypes to prevent misuse at compile time.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Suffix appended to a receipt identifier to form its storage key.
pub const RECEIPT_KEY_SUFFIX: &str = ".json";

/// Capture time of a receipt, as RFC 3339 text with nanosecond precision
/// and an explicit numeric offset.
///
/// The text is what gets hashed, so it is kept verbatim once captured.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Capture the current local time.
    pub fn now() -> Self {
        Self(Local::now().to_rfc3339_opts(SecondsFormat::Nanos, false))
    }

    /// Wrap previously captured text. No parsing is done.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The timestamp text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bytes bound into the digest.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Parse the text as an RFC 3339 date-time.
    pub fn parse(&self) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical external identifier of a receipt: the lowercase hex encoding
/// of its integrity value (signature or SHA-512 stamp).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptHash(String);

impl ReceiptHash {
    /// Derive the identifier from raw integrity bytes.
    pub fn from_integrity(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse an identifier supplied by a client.
    ///
    /// Must be non-empty, even-length hex. Uppercase digits are normalised.
    pub fn parse(s: &str) -> Result<Self, hex::FromHexError> {
        if s.is_empty() {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        if s.len() % 2 != 0 {
            return Err(hex::FromHexError::OddLength);
        }
        if let Some((index, c)) = s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(hex::FromHexError::InvalidHexCharacter { c, index });
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the integrity bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.0)
    }

    /// The key this receipt is stored under.
    pub fn storage_key(&self) -> String {
        format!("{}{}", self.0, RECEIPT_KEY_SUFFIX)
    }

    /// Recover an identifier from a storage key, if it has the expected shape.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_suffix(RECEIPT_KEY_SUFFIX)
            .and_then(|hex| Self::parse(hex).ok())
    }
}

impl fmt::Debug for ReceiptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReceiptHash({}...)", &self.0[..self.0.len().min(16)])
    }
}

impl fmt::Display for ReceiptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReceiptHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_timestamp_now_has_nanos_and_offset() {
        let ts = Timestamp::now();
        let parsed = ts.parse().expect("now() must be valid RFC 3339");

        // 2024-01-15T10:30:00.123456789+01:00
        let text = ts.as_str();
        let frac = text.split('.').nth(1).unwrap();
        assert_eq!(frac.len(), 9 + 6, "nine fractional digits then +HH:MM");
        assert!(!text.ends_with('Z'));
        assert_eq!(parsed.to_rfc3339_opts(SecondsFormat::Nanos, false), text);
    }

    #[test]
    fn test_timestamp_verbatim() {
        let ts = Timestamp::from_string("not a date");
        assert_eq!(ts.as_bytes(), b"not a date");
        assert!(ts.parse().is_err());
    }

    #[test]
    fn test_receipt_hash_parse() {
        let h = ReceiptHash::parse("ABcd01").unwrap();
        assert_eq!(h.as_str(), "abcd01");
        assert_eq!(h.to_bytes().unwrap(), vec![0xab, 0xcd, 0x01]);

        assert!(ReceiptHash::parse("").is_err());
        assert!(ReceiptHash::parse("abc").is_err());
        assert!(ReceiptHash::parse("../etc/passwd").is_err());
        assert!(ReceiptHash::parse("zz").is_err());
    }

    #[test]
    fn test_storage_key_roundtrip() {
        let h = ReceiptHash::from_integrity(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(h.storage_key(), "deadbeef.json");
        assert_eq!(ReceiptHash::from_storage_key("deadbeef.json"), Some(h));
        assert_eq!(ReceiptHash::from_storage_key("deadbeef.txt"), None);
        assert_eq!(ReceiptHash::from_storage_key(".json"), None);
    }

    proptest! {
        #[test]
        fn prop_identifier_parses_back(bytes in prop::collection::vec(any::<u8>(), 1..600)) {
            let id = ReceiptHash::from_integrity(&bytes);
            let upper = id.as_str().to_ascii_uppercase();
            prop_assert_eq!(ReceiptHash::parse(&upper).unwrap(), id.clone());
            prop_assert_eq!(id.to_bytes().unwrap(), bytes);
        }
    }
}
