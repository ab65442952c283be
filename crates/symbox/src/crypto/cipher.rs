//! Block-cipher encryption into a canonical, self-describing [`CipherEnvelope`].
//!
//! **Not authenticated.** CBC ciphertext is malleable and its padding check is
//! an oracle. Anything that crosses a trust boundary must go through
//! [`AeadBox`](crate::AeadBox), which verifies a MAC before this layer ever
//! sees the ciphertext.
//!
//! Every call builds a fresh cipher instance bound to exactly one IV; no
//! cipher state survives between calls.

use aes::Aes128;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use common::{CipherEnvelope, CryptoError};
use tracing::debug;

use super::random::{OsRandom, SecureRandom};
use crate::config::{BlockMode, CipherAlgorithm, CipherConfig};
use crate::key::SymmetricKey;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Encrypts and decrypts under one key with one cipher configuration.
///
/// `R` supplies IVs; it defaults to the OS CSPRNG.
#[derive(Debug, Clone)]
pub struct SymmetricCipherBox<R: SecureRandom = OsRandom> {
    config: CipherConfig,
    key: SymmetricKey,
    rng: R,
}

impl SymmetricCipherBox<OsRandom> {
    /// Create an AES-128-CBC box.
    ///
    /// Only the first 16 bytes of `key` are used.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `key` is shorter than 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        Self::with_config(key, CipherConfig::default())
    }

    /// Create a box for `config`, drawing IVs from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `key` is shorter than the
    /// configured cipher's key length.
    pub fn with_config(key: &[u8], config: CipherConfig) -> Result<Self, CryptoError> {
        Self::with_rng(key, config, OsRandom)
    }
}

impl<R: SecureRandom> SymmetricCipherBox<R> {
    /// Create a box for `config` drawing IVs from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `key` is shorter than the
    /// configured cipher's key length.
    pub fn with_rng(key: &[u8], config: CipherConfig, rng: R) -> Result<Self, CryptoError> {
        let key = SymmetricKey::from_slice(key, config.cipher.key_len())?;
        Ok(Self { config, key, rng })
    }

    /// The cipher configuration this box encrypts with.
    pub fn config(&self) -> CipherConfig {
        self.config
    }

    pub(crate) fn key(&self) -> &SymmetricKey {
        &self.key
    }

    /// Encrypt `plaintext` and return the canonical envelope string.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomSource`] if no IV could be drawn.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CryptoError> {
        Ok(self.seal(plaintext)?.to_canonical_string())
    }

    /// Parse a canonical envelope string and decrypt it.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Decoding`] for a malformed envelope,
    /// [`CryptoError::UnsupportedAlgorithm`] if its ids do not match this box,
    /// and [`CryptoError::InvalidPadding`] if padding is invalid after decryption.
    pub fn decrypt(&self, envelope: &str) -> Result<Vec<u8>, CryptoError> {
        self.open(&CipherEnvelope::parse(envelope)?)
    }

    /// Encrypt `plaintext` under a fresh random IV.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomSource`] if no IV could be drawn.
    pub fn seal(&self, plaintext: &[u8]) -> Result<CipherEnvelope, CryptoError> {
        let mut iv = vec![0u8; self.config.cipher.block_size()];
        self.rng.fill_bytes(&mut iv)?;

        let ciphertext = match (self.config.cipher, self.config.mode) {
            (CipherAlgorithm::Aes128, BlockMode::Cbc) => {
                Aes128CbcEnc::new_from_slices(self.key.as_bytes(), &iv)
                    .map_err(|_| self.key_length_error())?
                    .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
            }
        };

        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "sealed cipher envelope"
        );

        Ok(CipherEnvelope {
            alg: self.config.cipher.wire_id(),
            mode: self.config.mode.wire_id(),
            iv,
            ciphertext,
        })
    }

    /// Decrypt an already-parsed envelope.
    ///
    /// # Errors
    ///
    /// Same as [`decrypt`](Self::decrypt), minus JSON parsing failures.
    pub fn open(&self, envelope: &CipherEnvelope) -> Result<Vec<u8>, CryptoError> {
        self.config.check_ids(envelope.alg, envelope.mode)?;

        let block = self.config.cipher.block_size();
        if envelope.iv.len() != block {
            return Err(CryptoError::Decoding(format!(
                "IV must be {block} bytes, got {}",
                envelope.iv.len()
            )));
        }
        if envelope.ciphertext.is_empty() || envelope.ciphertext.len() % block != 0 {
            return Err(CryptoError::Decoding(format!(
                "CipherText must be a non-zero multiple of {block} bytes, got {}",
                envelope.ciphertext.len()
            )));
        }

        let plaintext = match (self.config.cipher, self.config.mode) {
            (CipherAlgorithm::Aes128, BlockMode::Cbc) => {
                Aes128CbcDec::new_from_slices(self.key.as_bytes(), &envelope.iv)
                    .map_err(|_| self.key_length_error())?
                    .decrypt_padded_vec_mut::<Pkcs7>(&envelope.ciphertext)
                    .map_err(|_| CryptoError::InvalidPadding)?
            }
        };

        debug!(
            ciphertext_len = envelope.ciphertext.len(),
            plaintext_len = plaintext.len(),
            "opened cipher envelope"
        );
        Ok(plaintext)
    }

    fn key_length_error(&self) -> CryptoError {
        CryptoError::InvalidKeyLength {
            expected: self.config.cipher.key_len(),
            actual: self.key.len(),
        }
    }
}
