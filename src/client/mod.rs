//! External client invocation
//!
//! Verifies that configured `ssh`/`sftp`/`scp` executables exist and runs
//! them as foreground child processes.

pub mod launch;
pub mod probe;

// Re-exports
pub use launch::{invoke, ClientLauncher, SessionOutcome, SystemLauncher};
pub use probe::{search_path, verify_executable};
