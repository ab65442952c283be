//! Envelope types and their canonical text forms.
//!
//! ```text
//! CipherEnvelope        {"ALG":<int>,"MODE":<int>,"IV":"<base64>","CipherText":"<base64>"}
//! AuthenticatedEnvelope {"alg":"<tag>","msg":"<serialised CipherEnvelope>","digest":"<hex>"}
//! ```
//!
//! The MAC is computed over the serialised `CipherEnvelope` string, so its
//! encoding must be byte-stable: fixed field order, no whitespace, standard
//! padded base64.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Cipher envelope
// ---------------------------------------------------------------------------

/// One encryption result: algorithm and mode ids, IV and padded ciphertext.
///
/// Built fresh by every encrypt call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherEnvelope {
    /// Wire id of the block cipher.
    pub alg: u8,
    /// Wire id of the block-cipher mode.
    pub mode: u8,
    /// Raw IV bytes, one cipher block long.
    pub iv: Vec<u8>,
    /// Raw padded ciphertext bytes.
    pub ciphertext: Vec<u8>,
}

/// Serde mirror of the text form; accepts any field order and whitespace.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CipherEnvelopeWire {
    #[serde(rename = "ALG")]
    alg: u8,
    #[serde(rename = "MODE")]
    mode: u8,
    #[serde(rename = "IV")]
    iv: String,
    #[serde(rename = "CipherText")]
    ciphertext: String,
}

impl CipherEnvelope {
    /// Encode this envelope to its canonical string.
    ///
    /// Base64 output never needs JSON escaping, so the form is written
    /// directly rather than left to a serializer's field ordering.
    pub fn to_canonical_string(&self) -> String {
        format!(
            r#"{{"ALG":{},"MODE":{},"IV":"{}","CipherText":"{}"}}"#,
            self.alg,
            self.mode,
            STANDARD.encode(&self.iv),
            STANDARD.encode(&self.ciphertext),
        )
    }

    /// Parse a serialised envelope.
    ///
    /// Any JSON object with exactly the four envelope fields is accepted,
    /// regardless of field order or whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Decoding`] if the string is not valid JSON, a
    /// field is missing or mistyped, or `IV`/`CipherText` is not base64.
    pub fn parse(s: &str) -> Result<Self, CryptoError> {
        let wire: CipherEnvelopeWire =
            serde_json::from_str(s).map_err(|e| CryptoError::Decoding(e.to_string()))?;
        let iv = STANDARD
            .decode(wire.iv.as_bytes())
            .map_err(|_| CryptoError::Decoding("IV is not valid base64".into()))?;
        let ciphertext = STANDARD
            .decode(wire.ciphertext.as_bytes())
            .map_err(|_| CryptoError::Decoding("CipherText is not valid base64".into()))?;
        Ok(Self {
            alg: wire.alg,
            mode: wire.mode,
            iv,
            ciphertext,
        })
    }
}

// ---------------------------------------------------------------------------
// Authenticated envelope
// ---------------------------------------------------------------------------

/// A message together with its MAC digest.
///
/// Additional data is bound into `digest` but never stored here; callers must
/// supply the same bytes again at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedEnvelope {
    /// MAC algorithm tag (e.g. `"HMAC_SHA2"`).
    pub alg: String,
    /// The authenticated message, verbatim.
    pub msg: String,
    /// Lower-case hex MAC digest over `alg ∥ additional data ∥ msg`.
    pub digest: String,
}

impl AuthenticatedEnvelope {
    /// Parse an [`AuthenticatedEnvelope`] from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Decoding`] if the text is not a JSON object with
    /// string fields `alg`, `msg` and `digest`.
    pub fn from_json(s: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(s).map_err(|e| CryptoError::Decoding(e.to_string()))
    }
}
