//! Command dispatch
//!
//! One invocation runs one command: ensure the config file exists, load it,
//! parse the arguments, then perform at most one mutation or one client
//! launch. The first error ends the run with exit code 1 and a one-line
//! message on the output stream.

use std::ffi::OsStr;
use std::io::Write;

use tracing::{debug, warn};

use crate::client::{ClientLauncher, SystemLauncher};
use crate::config::{parse_command, Command, ConnectArgs};
use crate::error::{QuickSshError, Result};
use crate::platform;
use crate::store::{ClientKind, ConfigStore, Configuration};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

const MSG_NO_ARGUMENTS: &str = "No arguments provided. Run 'quickssh help' for usage.";
const MSG_INVALID_ARGUMENTS: &str = "Invalid arguments provided. Run 'quickssh help' for usage.";
const MSG_INIT_FAILED: &str = "Failed to create configuration file. Please ensure the application has the necessary permissions.";
const MSG_CONFIG_MISSING: &str = "Configuration file not found. Please ensure the application has been initialized correctly.";
const MSG_CONFIG_CORRUPT: &str = "Configuration file is corrupted. Please delete the configuration file and restart the application.";
const MSG_CONNECT_NOT_FOUND: &str =
    "Connection not found. Cannot connect to non-existent connection.";
const MSG_DELETE_NOT_FOUND: &str =
    "Connection not found. Cannot delete non-existent connection.";
const MSG_INVALID_KIND: &str = "Invalid client specified. Use 'ssh', 'sftp', or 'scp'.";

pub const USAGE: &str = "\
QuickSSH Help:
create <address> <name> - Create a new SSH connection with the given name and address.
delete <name> - Delete the SSH connection with the given name.
ssh <name> [additional ssh args] - Connect to the SSH server with the given name, passing any additional arguments to SSH.
sftp <name> [additional sftp args] - Connect to the SSH server via SFTP with the given name, passing any additional arguments to SFTP.
scp <name> [additional scp args] - Connect to the SSH server via SCP with the given name, passing any additional arguments to SCP.
config ssh - Print the currently set path to the SSH client.
config ssh <path> - Set the path to the SSH client.
config sftp - Print the currently set path to the SFTP client.
config sftp <path> - Set the path to the SFTP client.
config scp - Print the currently set path to the SCP client.
config scp <path> - Set the path to the SCP client.
list - List all saved SSH connections.
version - Display the current version of QuickSSH.
help - Display this help message.
";

/// Routes a parsed command to the store and the client launcher
pub struct CommandDispatcher<L = SystemLauncher> {
    store: ConfigStore,
    launcher: L,
}

impl CommandDispatcher<SystemLauncher> {
    /// Dispatcher over the default config location and real client processes
    pub fn system() -> Self {
        Self::new(ConfigStore::open_default(), SystemLauncher)
    }
}

impl<L: ClientLauncher> CommandDispatcher<L> {
    pub fn new(store: ConfigStore, launcher: L) -> Self {
        Self { store, launcher }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run one invocation; `args` excludes the program name
    ///
    /// User-facing text, including error messages, goes to `out`. Returns
    /// the process exit code. Only the arguments handed to the client may be
    /// non-UTF-8.
    pub fn run<S, W>(&self, args: &[S], out: &mut W) -> u8
    where
        S: AsRef<OsStr>,
        W: Write,
    {
        if let Err(e) = self.store.ensure_config_file() {
            warn!("Initialization failed: {}", e);
            return fail(out, MSG_INIT_FAILED);
        }

        let config = match self.store.load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Loading configuration failed: {}", e);
                return fail(out, &failure_message(&e, None));
            }
        };

        if args.is_empty() {
            return fail(out, MSG_NO_ARGUMENTS);
        }

        let command = match parse_command(args) {
            Ok(command) => command,
            Err(e) => {
                debug!("{}", e);
                return fail(out, MSG_INVALID_ARGUMENTS);
            }
        };
        debug!("Dispatching {:?}", command);

        match self.dispatch(&command, &config, out) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                warn!("{}", e);
                fail(out, &failure_message(&e, Some(&command)))
            }
        }
    }

    fn dispatch<W: Write>(
        &self,
        command: &Command,
        config: &Configuration,
        out: &mut W,
    ) -> Result<()> {
        match command {
            Command::Create { address, name } => {
                self.store.add_connection(name, address)?;
                writeln!(out, "Connection created successfully.")?;
            }
            Command::Delete { name } => {
                self.store.remove_connection(name)?;
                writeln!(out, "Connection deleted successfully.")?;
            }
            Command::Ssh(args) => self.connect(ClientKind::Ssh, args, config)?,
            Command::Sftp(args) => self.connect(ClientKind::Sftp, args, config)?,
            Command::Scp(args) => self.connect(ClientKind::Scp, args, config)?,
            Command::Config { kind, path } => {
                let kind: ClientKind = kind.parse()?;
                match path {
                    Some(path) => {
                        self.store.set_client_path(kind, path)?;
                        writeln!(out, "{} client path updated successfully.", kind.label())?;
                    }
                    None => {
                        let path = self.store.client_path(kind)?;
                        writeln!(out, "{} client path: {}", kind.label(), path)?;
                    }
                }
            }
            Command::List => {
                writeln!(out, "Saved SSH connections:")?;
                for (alias, address) in &config.connections {
                    writeln!(out, "{}: {}", alias, address)?;
                }
            }
            Command::Version => writeln!(out, "{}", platform::version_line())?,
            Command::Help => out.write_all(USAGE.as_bytes())?,
        }

        Ok(())
    }

    /// Resolve the alias, check the client, then hand the terminal over
    fn connect(
        &self,
        kind: ClientKind,
        args: &ConnectArgs,
        config: &Configuration,
    ) -> Result<()> {
        let address = config.connection(&args.name)?;
        let program = config.client_path(kind);

        self.launcher.verify(program)?;

        let outcome = self.launcher.launch(program, address, &args.args)?;
        if !outcome.success() {
            debug!(
                "{} session to {} ended with {:?}",
                kind.label(),
                args.name,
                outcome.exit_code
            );
        }
        Ok(())
    }
}

fn fail<W: Write>(out: &mut W, message: &str) -> u8 {
    // Nothing left to report to if the output stream itself is gone
    let _ = writeln!(out, "{}", message);
    EXIT_FAILURE
}

/// One-line message for `err`, worded for the command that raised it
fn failure_message(err: &QuickSshError, command: Option<&Command>) -> String {
    match err {
        QuickSshError::ConfigNotFound(_) => MSG_CONFIG_MISSING.to_string(),
        QuickSshError::Corrupt { .. } => MSG_CONFIG_CORRUPT.to_string(),
        QuickSshError::ConnectionNotFound(_) => match command {
            Some(Command::Delete { .. }) => MSG_DELETE_NOT_FOUND.to_string(),
            _ => MSG_CONNECT_NOT_FOUND.to_string(),
        },
        QuickSshError::InvalidClient { program, .. } => {
            match command.and_then(Command::client_kind) {
                Some(kind) => format!(
                    "Invalid {} client path. Please update the configuration.",
                    kind.label()
                ),
                None => format!(
                    "Invalid client path '{program}'. Please update the configuration."
                ),
            }
        }
        QuickSshError::UnknownClientKind(_) => MSG_INVALID_KIND.to_string(),
        QuickSshError::InvalidArgument(_) => MSG_INVALID_ARGUMENTS.to_string(),
        QuickSshError::Persistence { source, .. } => {
            format!("Failed to read or write configuration file: {source}")
        }
        QuickSshError::Io(e) => format!("An unexpected error occurred: {e}"),
    }
}
