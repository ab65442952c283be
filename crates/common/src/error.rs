//! Error taxonomy shared by every symbox layer.

use thiserror::Error;

/// Errors produced by the MAC, cipher and AEAD layers.
///
/// Every variant is terminal: retrying the same operation with the same inputs
/// cannot change the outcome. Variants map to process exit codes used by the
/// `symbox` binary:
/// - [`CryptoError::InvalidKeyLength`], [`CryptoError::UnsupportedAlgorithm`] → 2
/// - [`CryptoError::AuthenticationFailure`] → 3
/// - [`CryptoError::InvalidPadding`], [`CryptoError::Decoding`] → 4
/// - [`CryptoError::RandomSource`] → 5
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The supplied key is shorter than the cipher requires.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Key length required by the configured cipher.
        expected: usize,
        /// Length of the key material actually supplied.
        actual: usize,
    },

    /// An algorithm tag or envelope id is not one this build recognises.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// MAC verification failed.
    ///
    /// Deliberately carries no detail: a wrong key, a tampered envelope and
    /// mismatched additional data are indistinguishable to the caller.
    #[error("authentication failed: data was tampered with or the key is wrong")]
    AuthenticationFailure,

    /// PKCS#7 padding was invalid after decryption.
    #[error("invalid padding")]
    InvalidPadding,

    /// A serialised envelope could not be parsed.
    #[error("malformed envelope: {0}")]
    Decoding(String),

    /// The secure random source could not supply bytes.
    #[error("secure random source unavailable")]
    RandomSource,
}

impl CryptoError {
    /// Returns the process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CryptoError::InvalidKeyLength { .. } | CryptoError::UnsupportedAlgorithm(_) => 2,
            CryptoError::AuthenticationFailure => 3,
            CryptoError::InvalidPadding | CryptoError::Decoding(_) => 4,
            CryptoError::RandomSource => 5,
        }
    }
}
