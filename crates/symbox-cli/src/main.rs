//! `symbox` — command-line entry point.
//!
//! `main` parses the arguments, then [`run`] goes through:
//! 1. Configuration: load and validate [`Config`](config::Config) from
//!    `SYMBOX_*` environment variables.
//! 2. Telemetry: structured JSON logging on stderr.
//! 3. Key: hash `SYMBOX_SECRET` and build the [`Keyring`].
//! 4. Command: read stdin, run the subcommand, write stdout.
//!
//! Exit codes: 0 success (including `--help` / `--version`), 1 usage,
//! configuration or I/O failure, otherwise [`CryptoError::exit_code`].

mod cli;
mod commands;
mod config;
mod telemetry;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use symbox::CryptoError;
use tracing::debug;

use cli::Cli;
use commands::Keyring;

/// Exit code for anything that is not a [`CryptoError`].
const FAILURE_EXIT: u8 = 1;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are reported through clap errors too.
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Telemetry may not be up; report on stderr directly.
            eprintln!("ERROR: {e:#}");
            let code = e
                .downcast_ref::<CryptoError>()
                .map_or(FAILURE_EXIT, CryptoError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        FAILURE_EXIT
    } else {
        0
    }
}

fn run(cli: &Cli) -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env()?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        command = cli.command.name(),
        "symbox starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key
    // -----------------------------------------------------------------------
    let keys = Keyring::new(&cfg.key())?;

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    let mut input = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut input)
        .context("failed to read stdin")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &keys, &input, &mut out)?;
    out.flush().context("failed to flush stdout")
}
