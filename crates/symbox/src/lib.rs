//! Authenticated encryption for symmetric keys that come from hashing a secret.
//!
//! Schemes that can only encrypt group elements hash a random element into a
//! symmetric key instead of encrypting a key directly. This crate turns such a
//! key into an encrypt-then-MAC AEAD:
//!
//! ```no_run
//! use sha2::{Digest, Sha256};
//! use symbox::AeadBox;
//!
//! # fn main() -> Result<(), symbox::CryptoError> {
//! let key = Sha256::digest(b"shameful secret key");
//! let aead = AeadBox::new(&key)?;
//! let envelope = aead.encrypt(b"Some network PDU.", b"\x10\x11\x0a\x0b")?;
//! let plaintext = aead.decrypt(&envelope, b"\x10\x11\x0a\x0b")?;
//! assert_eq!(plaintext, b"Some network PDU.");
//! # Ok(())
//! # }
//! ```
//!
//! # Logging invariant
//!
//! No key material, plaintext, digest or additional data is ever passed to a
//! `tracing` event; only lengths are.

pub mod config;
pub mod crypto;
pub mod key;

pub use common::{AuthenticatedEnvelope, CipherEnvelope, CryptoError};
pub use config::{BlockMode, CipherAlgorithm, CipherConfig, MacAlgorithm};
pub use crypto::aead::AeadBox;
pub use crypto::cipher::SymmetricCipherBox;
pub use crypto::mac::MessageAuthenticator;
pub use crypto::random::{OsRandom, SecureRandom};
pub use key::{derive_mac_key, derive_standalone_mac_key, MacKey, SymmetricKey};
