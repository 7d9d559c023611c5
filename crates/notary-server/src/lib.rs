//! # Notary Server
//!
//! HTTPS front end for the notary. Handlers delegate every decision to
//! [`notary::Notary`]; this crate only adapts HTTP to it.
//!
//! ## Routes
//!
//! - `GET /` - banner
//! - `GET /sign` - submission form
//! - `POST /sign` - notarize the `payload` form field, `303` to `/view`
//! - `GET /view?hash=` - the stored receipt as JSON
//! - `GET /list` - every stored receipt
//! - `GET /verify?hash=` - re-check a stored receipt
//! - `GET /health` - liveness
//!
//! All errors map to structured JSON responses via [`AppError`].

pub mod config;
pub mod error;
pub mod routes;

pub use config::Cli;
pub use error::AppError;
pub use routes::{router, SharedNotary};
