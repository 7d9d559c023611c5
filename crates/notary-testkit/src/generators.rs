//! Proptest generators for property-based testing.

use bytes::Bytes;
use proptest::prelude::*;

use notary_core::{Receipt, Signer, SigningError, Timestamp};

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a UTF-8 payload, which survives the wire form unchanged.
pub fn text_payload() -> impl Strategy<Value = String> {
    ".{0,200}"
}

/// Generate an RFC 3339 timestamp with nanosecond precision and an offset.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    (
        1970u32..=2099,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
        0u32..1_000_000_000,
        -12i32..=14,
    )
        .prop_map(|(y, mo, d, h, mi, s, nanos, offset)| {
            let sign = if offset < 0 { '-' } else { '+' };
            Timestamp::from_string(format!(
                "{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}.{nanos:09}{sign}{:02}:00",
                offset.unsigned_abs()
            ))
        })
}

/// Parameters for generating a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptParams {
    pub timestamp: Timestamp,
    pub payload: Vec<u8>,
}

impl ReceiptParams {
    /// Sign these parameters with `signer`.
    pub fn sign_with(&self, signer: &dyn Signer) -> Result<Receipt, SigningError> {
        signer.sign_at(self.timestamp.clone(), Bytes::from(self.payload.clone()))
    }
}

impl Arbitrary for ReceiptParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (timestamp(), payload(1000))
            .prop_map(|(timestamp, payload)| ReceiptParams { timestamp, payload })
            .boxed()
    }
}
