//! Key material held by the boxes, and MAC-key derivation.
//!
//! # Invariants
//!
//! - Key bytes are never logged; `Debug` prints `[REDACTED]`.
//! - Key bytes are overwritten with zeroes when dropped.
//! - A MAC key is always derived from, and never equal to, the encryption key.
//! - The AEAD MAC key and the standalone MAC key use different domains, so an
//!   envelope authenticated by one is never accepted by the other.

use std::fmt;

use common::CryptoError;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Domain-separation prefix hashed in front of the encryption key to obtain
/// the MAC key. Changing it breaks every envelope already issued.
pub const MAC_KEY_DOMAIN: &[u8] = b"Poor Mans Key Extractor";

/// Domain-separation prefix for authenticators used on their own, outside an
/// [`AeadBox`](crate::AeadBox).
pub const STANDALONE_MAC_DOMAIN: &[u8] = b"symbox standalone MAC";

/// Length of a derived [`MacKey`] (one SHA-256 output).
pub const MAC_KEY_LEN: usize = 32;

/// Encryption key for a [`SymmetricCipherBox`](crate::SymmetricCipherBox).
///
/// Callers supply already high-entropy material (typically a hash of some
/// secret); this type only fixes its length.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey(Vec<u8>);

impl SymmetricKey {
    /// Take the first `len` bytes of `bytes` as the key.
    ///
    /// Longer input is truncated. Because the input is assumed to be uniformly
    /// random, truncation keeps `len` bytes of entropy.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `bytes` is shorter than `len`.
    pub fn from_slice(bytes: &[u8], len: usize) -> Result<Self, CryptoError> {
        if bytes.len() < len {
            return Err(CryptoError::InvalidKeyLength {
                expected: len,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes[..len].to_vec()))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero-length key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// HMAC key derived from a [`SymmetricKey`] by [`derive_mac_key`] or
/// [`derive_standalone_mac_key`].
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MacKey([u8; MAC_KEY_LEN]);

impl MacKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for MacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MacKey([REDACTED])")
    }
}

/// Derive the MAC key as `SHA-256(MAC_KEY_DOMAIN ∥ key)`.
///
/// Sound only under the random-oracle model for SHA-256, which is the same
/// assumption that lets callers hash a secret into `key` in the first place.
pub fn derive_mac_key(key: &SymmetricKey) -> MacKey {
    derive(MAC_KEY_DOMAIN, key)
}

/// Derive a key for a bare [`MessageAuthenticator`](crate::MessageAuthenticator)
/// as `SHA-256(STANDALONE_MAC_DOMAIN ∥ key)`.
///
/// Digests made under this key never verify inside an `AeadBox` built from
/// the same `key`.
pub fn derive_standalone_mac_key(key: &SymmetricKey) -> MacKey {
    derive(STANDALONE_MAC_DOMAIN, key)
}

fn derive(domain: &[u8], key: &SymmetricKey) -> MacKey {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(key.as_bytes());
    MacKey(hasher.finalize().into())
}
