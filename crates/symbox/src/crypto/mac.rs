//! HMAC-SHA-256 message authentication with fail-closed, constant-time verification.
//!
//! The digest is computed over `tag ∥ additional_data ∥ message` with no
//! delimiters between operands. This matches envelopes already issued; see
//! `DESIGN.md` for why the framing was not changed.

use std::fmt;
use std::str::FromStr;

use common::{AuthenticatedEnvelope, CryptoError};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::MacAlgorithm;

type HmacSha256 = Hmac<Sha256>;

/// Produces and verifies [`AuthenticatedEnvelope`]s under one key.
///
/// The keyed HMAC state is computed once at construction and cloned for each
/// message, so the raw key is not retained.
#[derive(Clone)]
pub struct MessageAuthenticator {
    algorithm: MacAlgorithm,
    keyed: HmacSha256,
}

impl MessageAuthenticator {
    /// Create an authenticator for `key` using HMAC-SHA-256.
    pub fn new(key: &[u8]) -> Self {
        Self::build(key, MacAlgorithm::HmacSha2)
    }

    /// Create an authenticator for `key` with the algorithm named by `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] unless `algorithm` is
    /// `"HMAC_SHA2"`.
    pub fn with_algorithm(key: &[u8], algorithm: &str) -> Result<Self, CryptoError> {
        let algorithm = MacAlgorithm::from_str(algorithm)?;
        Ok(Self::build(key, algorithm))
    }

    fn build(key: &[u8], algorithm: MacAlgorithm) -> Self {
        let keyed = match algorithm {
            MacAlgorithm::HmacSha2 => {
                let Ok(keyed) = HmacSha256::new_from_slice(key) else {
                    unreachable!("HMAC accepts keys of any length");
                };
                keyed
            }
        };
        Self { algorithm, keyed }
    }

    /// The configured MAC algorithm.
    pub fn algorithm(&self) -> MacAlgorithm {
        self.algorithm
    }

    /// Authenticate `message`, binding `additional_data` into the digest.
    ///
    /// The returned envelope carries `message` verbatim; `additional_data` is
    /// not stored and must be supplied again to [`verify`](Self::verify).
    pub fn mac(&self, message: &str, additional_data: &[u8]) -> AuthenticatedEnvelope {
        AuthenticatedEnvelope {
            alg: self.algorithm.tag().to_owned(),
            msg: message.to_owned(),
            digest: self.digest(message, additional_data),
        }
    }

    /// Check `envelope.digest` against a digest recomputed over `envelope.msg`
    /// and `additional_data`.
    ///
    /// The comparison runs in constant time with respect to where the digests
    /// first differ.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] if `envelope.alg` is not
    /// this authenticator's tag.
    pub fn verify(
        &self,
        envelope: &AuthenticatedEnvelope,
        additional_data: &[u8],
    ) -> Result<bool, CryptoError> {
        if envelope.alg != self.algorithm.tag() {
            return Err(CryptoError::UnsupportedAlgorithm(envelope.alg.clone()));
        }
        let expected = self.digest(&envelope.msg, additional_data);
        Ok(expected.as_bytes().ct_eq(envelope.digest.as_bytes()).into())
    }

    fn digest(&self, message: &str, additional_data: &[u8]) -> String {
        let mut mac = self.keyed.clone();
        mac.update(self.algorithm.tag().as_bytes());
        mac.update(additional_data);
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for MessageAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageAuthenticator")
            .field("algorithm", &self.algorithm)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
