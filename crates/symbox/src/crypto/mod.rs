//! The three cryptographic layers, leaf first.
//!
//! - [`mac`]: HMAC-SHA-256 over `tag ∥ additional data ∥ message`.
//! - [`cipher`]: AES-128-CBC with PKCS#7 into a canonical envelope string.
//! - [`aead`]: encrypt-then-MAC composition of the two, with key separation.
//!
//! This module performs no I/O. The only external resource consumed is the
//! [`random::SecureRandom`] source, once per encryption.

pub mod aead;
pub mod cipher;
pub mod mac;
pub mod random;
