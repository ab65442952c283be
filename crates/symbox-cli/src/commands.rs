//! Execution of each subcommand against a [`Keyring`].

use std::io::Write;

use anyhow::{Context, Result};
use symbox::{
    derive_standalone_mac_key, AeadBox, AuthenticatedEnvelope, CryptoError, MessageAuthenticator,
    OsRandom, SecureRandom, SymmetricKey,
};
use tracing::{debug, info};

use crate::cli::Command;

/// Boxes keyed from one secret.
///
/// `mac` / `verify` use their own derived key, so nothing they authenticate
/// is ever accepted by `decrypt`.
#[derive(Debug)]
pub struct Keyring<R: SecureRandom = OsRandom> {
    aead: AeadBox<R>,
    authenticator: MessageAuthenticator,
}

impl Keyring<OsRandom> {
    /// Build both boxes from `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if `key` is shorter than 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let aead = AeadBox::new(key)?;
        let mac_key = derive_standalone_mac_key(&SymmetricKey::from_slice(key, key.len())?);
        Ok(Self {
            aead,
            authenticator: MessageAuthenticator::new(mac_key.as_bytes()),
        })
    }
}

/// Run `command` over `input`, writing the result to `out`.
///
/// # Errors
///
/// Crypto failures are returned as [`CryptoError`] (reachable through
/// `downcast_ref`) so the caller can pick an exit code.
pub fn run<R: SecureRandom>(
    command: &Command,
    keys: &Keyring<R>,
    input: &[u8],
    out: &mut impl Write,
) -> Result<()> {
    let ad = command.ad_args().bytes()?;
    debug!(
        command = command.name(),
        input_len = input.len(),
        ad_len = ad.len(),
        "running command"
    );

    match command {
        Command::Encrypt(_) => {
            let envelope = keys.aead.encrypt(input, &ad)?;
            write_envelope(out, &envelope)
        }
        Command::Decrypt(_) => {
            let envelope = read_envelope(input)?;
            let plaintext = keys.aead.decrypt(&envelope, &ad)?;
            out.write_all(&plaintext).context("failed to write plaintext")
        }
        Command::Mac(_) => {
            let message = std::str::from_utf8(input).context("message must be UTF-8 text")?;
            let envelope = keys.authenticator.mac(message, &ad);
            write_envelope(out, &envelope)
        }
        Command::Verify(_) => {
            let envelope = read_envelope(input)?;
            if !keys.authenticator.verify(&envelope, &ad)? {
                return Err(CryptoError::AuthenticationFailure.into());
            }
            info!("envelope verified");
            writeln!(out, "OK").context("failed to write verification result")
        }
    }
}

fn read_envelope(input: &[u8]) -> Result<AuthenticatedEnvelope> {
    let text = std::str::from_utf8(input)
        .map_err(|_| CryptoError::Decoding("envelope is not UTF-8".into()))?;
    Ok(AuthenticatedEnvelope::from_json(text.trim())?)
}

fn write_envelope(out: &mut impl Write, envelope: &AuthenticatedEnvelope) -> Result<()> {
    serde_json::to_writer(&mut *out, envelope).context("failed to write envelope")?;
    writeln!(out).context("failed to write envelope")
}
