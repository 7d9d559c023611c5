//! Golden test vectors for deterministic verification.
//!
//! Every expected value below was computed outside this codebase
//! (`sha256sum`, `sha512sum`, `openssl dgst -sha256 -sign`) over the exact
//! bytes `timestamp || payload`. If any of them drifts, the signed message
//! layout has changed and previously issued receipts no longer verify.

use bytes::Bytes;
use notary_core::{DigestSigner, Integrity, Receipt, Signer, Timestamp};

use crate::fixtures::{fixture_signer, fixture_verifier, FIXED_TIMESTAMP};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Capture time, as stored.
    pub timestamp: &'static str,
    /// Payload bytes.
    pub payload: &'static [u8],
    /// SHA-256 of `timestamp || payload` (hex).
    pub sha256: &'static str,
    /// SHA-512 of `timestamp || payload` (hex).
    pub sha512: &'static str,
    /// PKCS#1 v1.5 signature with the fixture key over the SHA-256 digest (hex).
    pub signature: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "hello",
            timestamp: FIXED_TIMESTAMP,
            payload: b"hello",
            sha256: "3f6020683dea3b7d42fd202bd23589432802a103636e7e1fbe1722ce0559c47d",
            sha512: "6b0affc79a65f3c487f8737aabeb41f110fe7033361d8dc8ee90cbb457a47b4f\
                     f22ff1e2fcc86a13dd1c5b289c185406c3fbb8ba41dd8daeef202e2aaf2c3e5b",
            signature: "536499e12b9628ebf4a92faefaf21fc377bb0860336d4a43f5021f800cde4bd1\
                        9577f2faf4be58269566081ec8d6818a2006a7f85421490d2368b1ecaf177033\
                        7ff9cbf6be87ddd6d8288af036d25a65735bcf69d76beb4b40c2a86dc3d0108d\
                        90b95570fa052c58a1b986d884f69043d634de580e67c2a53d38e15cba1761da\
                        cd07e660f0d8cec8d57f9041f7e4c2eb124836391a14f01b30f150dd70481fd9\
                        68598a0bf63c1c6cca0ad52e18d08ee0528d7b2ed9b8c10c1082b42501c403c7\
                        904f3b11985b0e3a579fea2109756bb0fc85f8a19a0222b15819aedacca51447\
                        552dc70520773acc06609c042baa112f03830dd7ab504ebc7ee4e03613efca41",
        },
        GoldenVector {
            name: "empty payload",
            timestamp: FIXED_TIMESTAMP,
            payload: b"",
            sha256: "7f5e65e8973cfd02790ac095a07ceda127d841219b62198113514a4737a99dfa",
            sha512: "222846cc4f4f81030397ad17357b0447d1868ea100f59e2526a5fe57be0a4696\
                     82be4e21e95cf59ef39483a8f17c59384fb21ec45bf5e1a63ac4786041fd3b48",
            signature: "067a1fcdf2352eead8e6c93f2e31a393f56e1d25ca2c2b79b376427cae2993df\
                        cf59cd14e1364e759f424770630d0e585ae1e84c4cead86ace161e2dbd9234d7\
                        b697760dd9c12d97a863a328838507b4315176cba916b67d1d898800902e4c9c\
                        a9fbcfb278562418e5fe576fb254087e3ccb9ba392e169a4b5339ce7e9e24452\
                        583a35185d65c05327eb35d83d876e0198ed54a99945e4224a726e29131c3291\
                        13489a9ea87a0fedbba329a8793718dda6c2c131da735e458fb732ce745e80f8\
                        6ab299eec62d3dbc9bcfb6a395baa648d913e1d0676fa7f3ad3181609ce9ac87\
                        2abcf57833b96a84184af0a9d9b9b5e9895b8b725cf9c2ff4e5bac8d85133390",
        },
        GoldenVector {
            name: "multi-byte UTF-8",
            timestamp: FIXED_TIMESTAMP,
            payload: "héllo wörld ✓".as_bytes(),
            sha256: "a8dc0dc4d1005d84284ed479131ebb94af6dc5529e308bfc84110ec687e8bdf9",
            sha512: "e9634bedb192d18f5f28656363bc417fb38b64ecdb4f14df9e567846e9b96271\
                     57f1513be8520faa0706d238af6852689f3b60b0fa972406c3ae858a45cb5f5c",
            signature: "326130da66a0483479ccbc2d5f669b11577f2e07516088dbf10ea9974fac7969\
                        98a5aff8db53e1b188e7e841c8f26b9a28954a6dede1ded05c3e8bf902e001f1\
                        47c66b5f19d2ce3c5e46414e52fc063ec6d91e687cc343da499a16e6e727feda\
                        4d8b72ae59d46a688afa9261171a233025ba1dd5b5f31fafd11e7d849c414b85\
                        5bdda3a1520b262aef8b988a13b163547c199dbd747f6c72e5f6b6eb52aca38b\
                        8930a1f8b4d148fd9b3eb9fa423073d75eb01eb6ad26c296ce1f10e5567998b0\
                        3265b3c4ce9e11f4abfecdfcf651300df0750dce12d8300dafc4ae7014e2dbc9\
                        fda166ffc5fc0e9fe2ab750f5967cf0b332774db66a2fd411b5e63bf5d3e11d3",
        },
    ]
}

/// Sign a vector with the fixture key.
pub fn signed_receipt(vector: &GoldenVector) -> Receipt {
    fixture_signer()
        .sign_at(
            Timestamp::from_string(vector.timestamp),
            Bytes::from_static(vector.payload),
        )
        .expect("fixture signing succeeds")
}

/// Stamp a vector with the keyless signer.
pub fn stamped_receipt(vector: &GoldenVector) -> Receipt {
    DigestSigner::new()
        .sign_at(
            Timestamp::from_string(vector.timestamp),
            Bytes::from_static(vector.payload),
        )
        .expect("digest signing is infallible")
}

/// Recompute every output of a vector and compare against the expected hex.
///
/// Returns a description of the first mismatch.
pub fn check_vector(vector: &GoldenVector) -> Result<(), String> {
    let signed = signed_receipt(vector);
    let Integrity::Signed { digest, signature } = signed.integrity() else {
        return Err(format!("{}: fixture signer did not sign", vector.name));
    };
    expect_hex(vector.name, "sha256", &digest.to_hex(), vector.sha256)?;
    expect_hex(vector.name, "signature", &signature.to_hex(), vector.signature)?;
    fixture_verifier()
        .verify(&signed)
        .map_err(|e| format!("{}: {e}", vector.name))?;

    let stamped = stamped_receipt(vector);
    let Integrity::Stamped { hash } = stamped.integrity() else {
        return Err(format!("{}: digest signer did not stamp", vector.name));
    };
    expect_hex(vector.name, "sha512", &hash.to_hex(), vector.sha512)
}

fn expect_hex(name: &str, what: &str, actual: &str, expected: &str) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{name}: {what} mismatch\n  expected {expected}\n  actual   {actual}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notary_core::{from_wire, to_wire, SignerMode};

    #[test]
    fn test_all_vectors_match() {
        for vector in all_vectors() {
            if let Err(msg) = check_vector(&vector) {
                panic!("{msg}");
            }
        }
    }

    #[test]
    fn test_identifier_is_signature_hex() {
        for vector in all_vectors() {
            assert_eq!(signed_receipt(&vector).id().as_str(), vector.signature);
            assert_eq!(stamped_receipt(&vector).id().as_str(), vector.sha512);
        }
    }

    #[test]
    fn test_hello_wire_form() {
        let vector = &all_vectors()[0];
        let wire = to_wire(&signed_receipt(vector)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&wire).unwrap();

        assert_eq!(json["Timestamp"], FIXED_TIMESTAMP);
        assert_eq!(json["Payload"], "hello");
        assert_eq!(json["Hash"], vector.sha256);
        assert_eq!(json["Signature"], vector.signature);
    }

    #[test]
    fn test_stamp_wire_form_has_no_hash() {
        let vector = &all_vectors()[0];
        let wire = to_wire(&stamped_receipt(vector)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&wire).unwrap();
        assert_eq!(json["Signature"], vector.sha512);
        assert!(json.get("Hash").is_none());

        let decoded = from_wire(&wire).unwrap();
        assert_eq!(decoded.mode(), SignerMode::DigestOnly);
        assert_eq!(decoded.hash, None);
        assert_eq!(decoded.signature, vector.sha512);
    }

    #[test]
    fn test_one_byte_change_breaks_vector() {
        let vector = GoldenVector {
            payload: b"hellp",
            ..all_vectors()[0].clone()
        };
        let err = check_vector(&vector).unwrap_err();
        assert!(err.contains("sha256 mismatch"), "{err}");
        assert_eq!(
            signed_receipt(&vector).digest().unwrap().to_hex(),
            "c62a2b3f6bc60c05c33fe903cf321f296a41ba1bda7bf2acc87f65b4a06fb310"
        );
    }
}
