//! Cipher configuration: the enumerated algorithm choices a box can be built with.
//!
//! Wire ids are the integers written into the `ALG` and `MODE` envelope fields.
//! They match the ids used by envelopes already in circulation, so existing
//! ciphertext keeps decrypting.

use std::fmt;
use std::str::FromStr;

use common::CryptoError;

/// Block ciphers recognised by [`SymmetricCipherBox`](crate::SymmetricCipherBox).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CipherAlgorithm {
    /// AES with a 128-bit key.
    #[default]
    Aes128,
}

impl CipherAlgorithm {
    /// Integer written into the envelope `ALG` field.
    pub const fn wire_id(self) -> u8 {
        match self {
            CipherAlgorithm::Aes128 => 0,
        }
    }

    /// Required key length in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            CipherAlgorithm::Aes128 => 16,
        }
    }

    /// Cipher block size in bytes; also the IV length.
    pub const fn block_size(self) -> usize {
        match self {
            CipherAlgorithm::Aes128 => 16,
        }
    }
}

/// Block-cipher modes recognised by [`SymmetricCipherBox`](crate::SymmetricCipherBox).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockMode {
    /// Cipher-block chaining with a random IV and PKCS#7 padding.
    #[default]
    Cbc,
}

impl BlockMode {
    /// Integer written into the envelope `MODE` field.
    pub const fn wire_id(self) -> u8 {
        match self {
            BlockMode::Cbc => 2,
        }
    }
}

/// The cipher and mode a [`SymmetricCipherBox`](crate::SymmetricCipherBox) encrypts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CipherConfig {
    /// Block cipher.
    pub cipher: CipherAlgorithm,
    /// Mode of operation.
    pub mode: BlockMode,
}

impl CipherConfig {
    /// Check that an envelope's `ALG`/`MODE` ids match this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] naming the first id that
    /// does not match.
    pub fn check_ids(&self, alg: u8, mode: u8) -> Result<(), CryptoError> {
        if alg != self.cipher.wire_id() {
            return Err(CryptoError::UnsupportedAlgorithm(format!("cipher id {alg}")));
        }
        if mode != self.mode.wire_id() {
            return Err(CryptoError::UnsupportedAlgorithm(format!("mode id {mode}")));
        }
        Ok(())
    }
}

/// MAC algorithms recognised by [`MessageAuthenticator`](crate::MessageAuthenticator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MacAlgorithm {
    /// HMAC over SHA-256.
    #[default]
    HmacSha2,
}

impl MacAlgorithm {
    /// Tag written into the envelope `alg` field and prefixed to the MAC input.
    pub const fn tag(self) -> &'static str {
        match self {
            MacAlgorithm::HmacSha2 => "HMAC_SHA2",
        }
    }
}

impl fmt::Display for MacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MacAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HMAC_SHA2" => Ok(MacAlgorithm::HmacSha2),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_aes128_cbc() {
        let cfg = CipherConfig::default();
        assert_eq!(cfg.cipher, CipherAlgorithm::Aes128);
        assert_eq!(cfg.mode, BlockMode::Cbc);
        assert_eq!(cfg.cipher.key_len(), 16);
        assert_eq!(cfg.cipher.block_size(), 16);
    }

    #[test]
    fn wire_ids() {
        assert_eq!(CipherAlgorithm::Aes128.wire_id(), 0);
        assert_eq!(BlockMode::Cbc.wire_id(), 2);
    }

    #[test]
    fn check_ids_rejects_foreign_cipher_and_mode() {
        let cfg = CipherConfig::default();
        assert!(cfg.check_ids(0, 2).is_ok());
        assert!(matches!(
            cfg.check_ids(1, 2),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            cfg.check_ids(0, 1),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn mac_algorithm_parses_only_hmac_sha2() {
        assert_eq!("HMAC_SHA2".parse::<MacAlgorithm>().unwrap(), MacAlgorithm::HmacSha2);
        assert!("HMAC_MD5".parse::<MacAlgorithm>().is_err());
        assert!("hmac_sha2".parse::<MacAlgorithm>().is_err());
        assert_eq!(MacAlgorithm::HmacSha2.to_string(), "HMAC_SHA2");
    }
}
