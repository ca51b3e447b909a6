//! Error types for QuickSSH

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for QuickSSH
#[derive(Debug, Error)]
pub enum QuickSshError {
    /// The configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// No connection is stored under the given alias
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// The configuration file exists but does not have the expected shape
    #[error("Configuration file {} is corrupted: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// The configuration directory or file could not be created, read or written
    #[error("Configuration I/O failed for {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured client executable cannot be started
    #[error("Invalid client '{program}': {reason}")]
    InvalidClient { program: String, reason: String },

    /// Unknown client kind token (anything other than ssh, sftp, scp)
    #[error("Invalid client kind: {0}")]
    UnknownClientKind(String),

    /// Argument vector does not match any subcommand
    #[error("Invalid arguments: {0}")]
    InvalidArgument(String),

    /// IO error (terminal output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using QuickSshError
pub type Result<T> = std::result::Result<T, QuickSshError>;

impl QuickSshError {
    /// Create a corrupt-config error
    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        QuickSshError::Corrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a persistence error for the given path
    pub fn persistence(path: &Path, source: std::io::Error) -> Self {
        QuickSshError::Persistence {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an invalid client error
    pub fn invalid_client(program: impl Into<String>, reason: impl Into<String>) -> Self {
        QuickSshError::InvalidClient {
            program: program.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error from a string
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        QuickSshError::InvalidArgument(msg.into())
    }

    /// True for both missing-file and missing-alias errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QuickSshError::ConfigNotFound(_) | QuickSshError::ConnectionNotFound(_)
        )
    }
}
