//! Client process launch
//!
//! The client runs in the foreground with the terminal handed straight
//! through, so password prompts and host-key confirmations reach the user.

use std::ffi::OsString;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::probe::verify_executable;
use crate::error::{QuickSshError, Result};

/// How a client process ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Exit code of the client (None if it was killed by a signal)
    pub exit_code: Option<i32>,
}

impl SessionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Launch `program address extra_args...` and wait for it
///
/// Arguments are passed as separate argv entries; nothing goes through a
/// shell. The exit status is reported back but not acted on.
pub fn invoke(program: &str, address: &str, extra_args: &[OsString]) -> Result<SessionOutcome> {
    info!("Launching {} {} {:?}", program, address, extra_args);

    let status = Command::new(program)
        .arg(address)
        .args(extra_args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| QuickSshError::invalid_client(program, e.to_string()))?;

    let outcome = SessionOutcome {
        exit_code: status.code(),
    };
    debug!("{} exited with {:?}", program, outcome.exit_code);
    Ok(outcome)
}

/// Seam between dispatch and real processes
pub trait ClientLauncher {
    /// Fail with `InvalidClient` if `program` cannot be started
    fn verify(&self, program: &str) -> Result<()>;

    /// Run `program` against `address`, blocking until it exits
    fn launch(&self, program: &str, address: &str, extra_args: &[OsString])
        -> Result<SessionOutcome>;
}

/// Launcher backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ClientLauncher for SystemLauncher {
    fn verify(&self, program: &str) -> Result<()> {
        verify_executable(program).map(|_| ())
    }

    fn launch(
        &self,
        program: &str,
        address: &str,
        extra_args: &[OsString],
    ) -> Result<SessionOutcome> {
        invoke(program, address, extra_args)
    }
}
