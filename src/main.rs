//! QuickSSH - Entry point
//!
//! Sets up logging on stderr, runs one command and exits with its code.

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::anyhow;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use quickssh::config::{DEFAULT_LOG_FILTER, LOG_ENV};
use quickssh::CommandDispatcher;

fn init_tracing() -> anyhow::Result<()> {
    // stdout carries user-facing output only
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("{e:#}");
    }

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let dispatcher = CommandDispatcher::system();

    let mut stdout = std::io::stdout().lock();
    ExitCode::from(dispatcher.run(&args, &mut stdout))
}
