//! Configuration loading and validation for the `symbox` binary.
//!
//! Values come from `SYMBOX_*` environment variables so the secret never has
//! to appear on the command line.

use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Validated `symbox` configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Secret the symmetric key is hashed from (`SYMBOX_SECRET`). **Required.**
    pub secret: String,

    /// Tracing log level used when `RUST_LOG` is unset (`SYMBOX_LOG_LEVEL`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SYMBOX_SECRET` is absent or blank.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SYMBOX"))
            .build()
            .context("failed to build symbox configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise symbox configuration (is SYMBOX_SECRET set?)")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.secret.trim().is_empty() {
            anyhow::bail!("SYMBOX_SECRET is required and must not be empty");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("SYMBOX_LOG_LEVEL must not be empty when set");
        }
        Ok(())
    }

    /// The symmetric key: `SHA-256(secret)`.
    pub fn key(&self) -> [u8; 32] {
        Sha256::digest(self.secret.as_bytes()).into()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}
