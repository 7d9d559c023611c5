//! # Notary Testkit
//!
//! Testing utilities for the notary.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with digests and signatures computed
//!   independently (openssl), pinning the exact signed message layout
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A checked-in RSA key and helpers for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use notary_testkit::vectors::{all_vectors, check_vector};
//!
//! for vector in all_vectors() {
//!     check_vector(&vector).unwrap();
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use notary_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let receipt = fixture.sign_fixed(b"hello");
//! assert!(receipt.is_signed());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    fixed_timestamp, fixture_signer, fixture_verifier, KeyFile, TestFixture, FIXED_TIMESTAMP,
};
pub use generators::{payload, timestamp, ReceiptParams};
pub use vectors::{all_vectors, check_vector, GoldenVector};
