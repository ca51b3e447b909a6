//! Command-line grammar and environment settings for QuickSSH
//!
//! The surface is positional only: there are no flags, and `help`/`version`
//! are plain subcommands. clap's generated help and version flags are turned
//! off so `-h`, `--help` and `--version` are rejected like any other
//! unrecognized token. Every token after the subcommand is a plain value,
//! including `--` and tokens starting with `-`.

use std::ffi::{OsStr, OsString};

use clap::{Args, Parser, Subcommand};

use crate::error::{QuickSshError, Result};
use crate::store::ClientKind;

/// Directory name under the per-user application-data directory
pub const APP_DIR_NAME: &str = "QuickSSH";

/// Config file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "quickssh_config.json";

/// Overrides the config directory when set to a non-empty value
pub const CONFIG_DIR_ENV: &str = "QUICKSSH_CONFIG_DIR";

/// `tracing` filter directives (same syntax as `RUST_LOG`)
pub const LOG_ENV: &str = "QUICKSSH_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Binary name used as argv[0] when parsing
pub const BIN_NAME: &str = "quickssh";

/// QuickSSH command line
#[derive(Parser, Debug)]
#[command(name = "quickssh")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per invocation
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store `name -> address`, replacing any existing entry
    #[command(disable_help_flag = true)]
    Create { address: String, name: String },

    /// Remove a stored connection
    #[command(disable_help_flag = true)]
    Delete { name: String },

    /// Open an SSH session to a stored connection
    #[command(disable_help_flag = true)]
    Ssh(ConnectArgs),

    /// Open an SFTP session to a stored connection
    #[command(disable_help_flag = true)]
    Sftp(ConnectArgs),

    /// Run SCP against a stored connection
    #[command(disable_help_flag = true)]
    Scp(ConnectArgs),

    /// Print or set a client executable path
    #[command(disable_help_flag = true)]
    Config { kind: String, path: Option<String> },

    /// List stored connections
    #[command(disable_help_flag = true)]
    List,

    /// Print version and platform
    #[command(disable_help_flag = true)]
    Version,

    /// Print usage
    #[command(disable_help_flag = true)]
    Help,
}

impl Command {
    /// Client targeted by `ssh`, `sftp` and `scp`
    pub fn client_kind(&self) -> Option<ClientKind> {
        match self {
            Command::Ssh(_) => Some(ClientKind::Ssh),
            Command::Sftp(_) => Some(ClientKind::Sftp),
            Command::Scp(_) => Some(ClientKind::Scp),
            _ => None,
        }
    }
}

/// Alias plus arguments handed to the client untouched
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConnectArgs {
    /// Stored connection alias
    pub name: String,

    /// Extra arguments for the client, in order; need not be UTF-8
    pub args: Vec<OsString>,
}

/// Parse the argument vector (without argv[0]) into a [`Command`]
///
/// A `--` is inserted right after the subcommand token so clap treats the
/// rest of the line as values only. Any later `--` then reaches the command
/// as an ordinary token.
pub fn parse_command<S: AsRef<OsStr>>(args: &[S]) -> Result<Command> {
    let mut tokens = args.iter().map(|arg| arg.as_ref().to_os_string());
    let mut argv = vec![OsString::from(BIN_NAME)];
    if let Some(subcommand) = tokens.next() {
        argv.push(subcommand);
        argv.push(OsString::from("--"));
        argv.extend(tokens);
    }

    Cli::try_parse_from(argv)
        .map(|cli| cli.command)
        .map_err(|e| QuickSshError::invalid_argument(format!("{:?}", e.kind())))
}
