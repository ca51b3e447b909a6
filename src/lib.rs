//! QuickSSH - named shortcuts for ssh, sftp and scp
//!
//! Stores alias -> address pairs in a JSON file under the per-user
//! application-data directory and launches the system `ssh`, `sftp` or `scp`
//! client against a stored address.
//!
//! # Example Usage (CLI)
//!
//! ```bash
//! quickssh create admin@192.168.1.10 nas
//! quickssh ssh nas -p 2222
//! quickssh config scp /usr/local/bin/scp
//! quickssh list
//! ```

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod platform;
pub mod store;

// Re-exports for convenience
pub use client::{ClientLauncher, SessionOutcome, SystemLauncher};
pub use config::{Cli, Command, ConnectArgs};
pub use dispatcher::{CommandDispatcher, EXIT_FAILURE, EXIT_SUCCESS};
pub use error::{QuickSshError, Result};
pub use store::{ClientKind, ConfigStore, Configuration};
