//! Envelope types and errors shared across `symbox` crates.

pub mod error;
pub mod protocol;

pub use error::CryptoError;
pub use protocol::{AuthenticatedEnvelope, CipherEnvelope};
