//! Source of IV bytes.

use common::CryptoError;

/// A cryptographically secure byte source.
///
/// Implementations must be safe to call from several threads if the owning box
/// is shared across threads; the boxes add no locking of their own.
pub trait SecureRandom {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomSource`] if the source cannot supply bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::fill(dest).map_err(|_| CryptoError::RandomSource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsRandom.fill_bytes(&mut a).unwrap();
        OsRandom.fill_bytes(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn os_random_accepts_empty_buffer() {
        assert!(OsRandom.fill_bytes(&mut []).is_ok());
    }
}
