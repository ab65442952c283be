//! Logging for the `symbox` binary.
//!
//! stdout carries envelopes and plaintext, so every event is a JSON line on
//! stderr. Events may carry sizes and command names; never key material,
//! plaintext or additional data.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `log_level`.
///
/// # Errors
///
/// Fails if `log_level` is not a valid filter directive or a subscriber is
/// already installed.
pub fn init(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(log_level)?,
    };

    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("symbox logging already initialised: {e}"))
}

fn level_filter(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_level)
        .with_context(|| format!("SYMBOX_LOG_LEVEL {log_level:?} is not a valid filter"))
}
