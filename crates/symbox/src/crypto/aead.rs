//! Encrypt-then-MAC authenticated encryption with additional data.
//!
//! # Construction
//!
//! ```text
//! encrypt: m  ──SymmetricCipherBox──▶ env ──MAC(alg ∥ ad ∥ env)──▶ {alg, msg: env, digest}
//! decrypt: verify(digest) ──ok──▶ SymmetricCipherBox.decrypt(msg) ──▶ m
//!                         └─fail─▶ AuthenticationFailure (ciphertext never touched)
//! ```
//!
//! The MAC key is `SHA-256("Poor Mans Key Extractor" ∥ key)`, so the two
//! layers never share a key. Because the serialised envelope carries the
//! algorithm ids and IV, all cipher parameters are covered by the MAC.

use common::{AuthenticatedEnvelope, CryptoError};
use tracing::warn;

use super::cipher::SymmetricCipherBox;
use super::mac::MessageAuthenticator;
use super::random::{OsRandom, SecureRandom};
use crate::config::CipherConfig;
use crate::key::derive_mac_key;

/// AEAD box composing a [`SymmetricCipherBox`] with a [`MessageAuthenticator`].
#[derive(Debug, Clone)]
pub struct AeadBox<R: SecureRandom = OsRandom> {
    cipher: SymmetricCipherBox<R>,
    authenticator: MessageAuthenticator,
}

impl AeadBox<OsRandom> {
    /// Create an AES-128-CBC + HMAC-SHA-256 box.
    ///
    /// `key` is typically a hash of some secret; only its first 16 bytes are
    /// used for encryption.
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
    /// Returns [`CryptoError::InvalidKeyLength`] if `key` is too short for the
    /// configured cipher.
    pub fn with_config(key: &[u8], config: CipherConfig) -> Result<Self, CryptoError> {
        Self::with_rng(key, config, OsRandom)
    }
}

impl<R: SecureRandom> AeadBox<R> {
    /// Create a box for `config` drawing IVs from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `key` is too short for the
    /// configured cipher.
    pub fn with_rng(key: &[u8], config: CipherConfig, rng: R) -> Result<Self, CryptoError> {
        let cipher = SymmetricCipherBox::with_rng(key, config, rng)?;
        let mac_key = derive_mac_key(cipher.key());
        let authenticator = MessageAuthenticator::new(mac_key.as_bytes());
        Ok(Self {
            cipher,
            authenticator,
        })
    }

    /// Encrypt `message` and authenticate the result together with
    /// `additional_data`.
    ///
    /// `additional_data` is neither encrypted nor stored in the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomSource`] if no IV could be drawn.
    pub fn encrypt(
        &self,
        message: &[u8],
        additional_data: &[u8],
    ) -> Result<AuthenticatedEnvelope, CryptoError> {
        let sealed = self.cipher.encrypt(message)?;
        Ok(self.authenticator.mac(&sealed, additional_data))
    }

    /// Verify `envelope` against `additional_data` and, only if that succeeds,
    /// decrypt it.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::AuthenticationFailure`] if the digest does not match.
    ///   Wrong key, tampering and mismatched additional data all look the same.
    /// - [`CryptoError::UnsupportedAlgorithm`] if the envelope names another
    ///   MAC algorithm or its cipher ids do not match this box.
    /// - [`CryptoError::Decoding`] / [`CryptoError::InvalidPadding`] if an
    ///   authentic envelope still fails to decrypt, which means the key holder
    ///   produced it incorrectly.
    pub fn decrypt(
        &self,
        envelope: &AuthenticatedEnvelope,
        additional_data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if !self.authenticator.verify(envelope, additional_data)? {
            warn!("authenticated envelope rejected; ciphertext left undecrypted");
            return Err(CryptoError::AuthenticationFailure);
        }
        self.cipher.decrypt(&envelope.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{derive_standalone_mac_key, SymmetricKey};
    use sha2::{Digest, Sha256};

    fn shameful_key() -> [u8; 32] {
        Sha256::digest(b"shameful secret key").into()
    }

    /// A previously issued envelope for `"My age is 42."`.
    fn legacy_envelope() -> AuthenticatedEnvelope {
        AuthenticatedEnvelope {
            alg: "HMAC_SHA2".into(),
            msg: r#"{"MODE": 2, "IV": "TW3agHgZJIMUWjb+9D1hwg==", "CipherText": "fdL9hbr0kHk+kazhr8i1Ng==", "ALG": 0}"#.into(),
            digest: "0af403e93aa86cd75b0d08818b6f13deb82c1ae4bb4fb878c3d2c85ad26e4ec9".into(),
        }
    }

    #[test]
    fn round_trip() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let env = aead.encrypt(b"My age is 42.", b"").unwrap();
        assert_eq!(aead.decrypt(&env, b"").unwrap(), b"My age is 42.");
    }

    #[test]
    fn decrypts_legacy_envelope() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        assert_eq!(aead.decrypt(&legacy_envelope(), b"").unwrap(), b"My age is 42.");
    }

    #[test]
    fn decrypts_legacy_envelope_with_additional_data() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let env = AuthenticatedEnvelope {
            alg: "HMAC_SHA2".into(),
            msg: r#"{"MODE": 2, "IV": "pgg2Ik6ale5SjinjSpQejw==", "CipherText": "SsdRdwoX5yzdZNZnbbYbpUKlmCVbGVJPQl4/Bn9MBWo=", "ALG": 0}"#.into(),
            digest: "d781dbe8906b20a1d91f4bd28b57a84b93b0a520e08502a40208fd153bfb3206".into(),
        };
        assert_eq!(
            aead.decrypt(&env, b""),
            Err(CryptoError::AuthenticationFailure)
        );
        assert_eq!(
            aead.decrypt(&env, b"\x10\x11\x0a\x0b").unwrap(),
            b"Some network PDU."
        );
    }

    #[test]
    fn additional_data_binding() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let ad = [0x10, 0x11, 0x0a, 0x0b];
        let env = aead.encrypt(b"Some network PDU.", &ad).unwrap();

        assert_eq!(
            aead.decrypt(&env, b"wrong"),
            Err(CryptoError::AuthenticationFailure)
        );
        assert_eq!(aead.decrypt(&env, b""), Err(CryptoError::AuthenticationFailure));
        assert_eq!(aead.decrypt(&env, &ad).unwrap(), b"Some network PDU.");
    }

    #[test]
    fn additional_data_is_not_stored() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let env = aead.encrypt(b"payload", b"very-distinctive-context").unwrap();
        assert!(!env.msg.contains("very-distinctive-context"));
        assert!(!env.digest.contains("very-distinctive-context"));
    }

    #[test]
    fn wrong_key_is_authentication_failure() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let other = AeadBox::new(&[0x5Au8; 32]).unwrap();
        let env = aead.encrypt(b"secret", b"").unwrap();
        assert_eq!(other.decrypt(&env, b""), Err(CryptoError::AuthenticationFailure));
    }

    #[test]
    fn tampered_msg_is_never_decrypted() {
        // Replacing msg with a well-formed envelope whose padding is broken
        // must still yield AuthenticationFailure, never InvalidPadding.
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let mut env = aead.encrypt(b"secret", b"").unwrap();
        env.msg = r#"{"ALG":0,"MODE":2,"IV":"AAAAAAAAAAAAAAAAAAAAAA==","CipherText":"AAAAAAAAAAAAAAAAAAAAAA=="}"#.into();
        assert_eq!(aead.decrypt(&env, b""), Err(CryptoError::AuthenticationFailure));

        env.msg = "garbage".into();
        assert_eq!(aead.decrypt(&env, b""), Err(CryptoError::AuthenticationFailure));
    }

    #[test]
    fn standalone_mac_is_not_accepted_as_ciphertext() {
        // A bare MAC over a well-formed but never-encrypted envelope string
        // must not reach CBC decryption.
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let key = SymmetricKey::from_slice(&shameful_key(), 16).unwrap();
        let standalone = MessageAuthenticator::new(derive_standalone_mac_key(&key).as_bytes());
        let forged = standalone.mac(
            r#"{"ALG":0,"MODE":2,"IV":"AAAAAAAAAAAAAAAAAAAAAA==","CipherText":"AAAAAAAAAAAAAAAAAAAAAA=="}"#,
            b"",
        );
        assert_eq!(aead.decrypt(&forged, b""), Err(CryptoError::AuthenticationFailure));
    }

    #[test]
    fn foreign_mac_algorithm_rejected() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let mut env = aead.encrypt(b"secret", b"").unwrap();
        env.alg = "HMAC_SHA512".into();
        assert!(matches!(
            aead.decrypt(&env, b""),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn msg_is_canonical_cipher_envelope() {
        let aead = AeadBox::new(&shameful_key()).unwrap();
        let env = aead.encrypt(b"x", b"").unwrap();
        assert_eq!(env.alg, "HMAC_SHA2");
        assert!(env.msg.starts_with(r#"{"ALG":0,"MODE":2,"IV":""#));
        let parsed = common::CipherEnvelope::parse(&env.msg).unwrap();
        assert_eq!(parsed.to_canonical_string(), env.msg);
    }

    #[test]
    fn short_key_rejected() {
        assert!(matches!(
            AeadBox::new(b"short"),
            Err(CryptoError::InvalidKeyLength { .. })
        ));
    }
}
