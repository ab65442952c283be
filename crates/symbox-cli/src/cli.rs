//! Command-line argument definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

/// Authenticated encryption of stdin under a key hashed from `SYMBOX_SECRET`.
#[derive(Debug, Parser)]
#[command(name = "symbox")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations. All read stdin and write stdout.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt stdin into an authenticated envelope (JSON)
    Encrypt(AdArgs),
    /// Verify and decrypt an authenticated envelope read from stdin
    Decrypt(AdArgs),
    /// Authenticate stdin as a UTF-8 message without encrypting it
    Mac(AdArgs),
    /// Verify an authenticated envelope read from stdin without decrypting it
    Verify(AdArgs),
}

impl Command {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Encrypt(_) => "encrypt",
            Command::Decrypt(_) => "decrypt",
            Command::Mac(_) => "mac",
            Command::Verify(_) => "verify",
        }
    }

    /// Additional-data arguments of the command.
    pub fn ad_args(&self) -> &AdArgs {
        match self {
            Command::Encrypt(a) | Command::Decrypt(a) | Command::Mac(a) | Command::Verify(a) => a,
        }
    }
}

/// Additional data bound into the MAC. Must match between the two ends.
#[derive(Debug, Default, Args)]
pub struct AdArgs {
    /// Additional data as UTF-8 text
    #[arg(long, conflicts_with = "ad_hex")]
    pub ad: Option<String>,

    /// Additional data as hex (e.g. 10110a0b)
    #[arg(long)]
    pub ad_hex: Option<String>,
}

impl AdArgs {
    /// Decode the additional data to bytes; empty when neither flag is given.
    ///
    /// # Errors
    ///
    /// Returns an error if `--ad-hex` is not valid hex.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        match (&self.ad, &self.ad_hex) {
            (Some(text), _) => Ok(text.as_bytes().to_vec()),
            (None, Some(h)) => hex::decode(h.trim()).context("--ad-hex is not valid hex"),
            (None, None) => Ok(Vec::new()),
        }
    }
}
