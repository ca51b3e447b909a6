//! Persisted configuration record and client kinds

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuickSshError;

/// Which external client a command or setting targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    Ssh,
    Sftp,
    Scp,
}

impl ClientKind {
    pub const ALL: [ClientKind; 3] = [ClientKind::Ssh, ClientKind::Sftp, ClientKind::Scp];

    /// Lowercase token used on the command line
    pub fn token(self) -> &'static str {
        match self {
            ClientKind::Ssh => "ssh",
            ClientKind::Sftp => "sftp",
            ClientKind::Scp => "scp",
        }
    }

    /// Uppercase label used in user-facing messages
    pub fn label(self) -> &'static str {
        match self {
            ClientKind::Ssh => "SSH",
            ClientKind::Sftp => "SFTP",
            ClientKind::Scp => "SCP",
        }
    }

    /// Executable name used until the user configures another one
    pub fn default_program(self) -> &'static str {
        self.token()
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ClientKind {
    type Err = QuickSshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientKind::ALL
            .into_iter()
            .find(|kind| kind.token() == s)
            .ok_or_else(|| QuickSshError::UnknownClientKind(s.to_string()))
    }
}

/// Contents of `quickssh_config.json`
///
/// Missing fields deserialize to their defaults; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Executable for `ssh` sessions
    pub ssh_path: String,

    /// Executable for `sftp` sessions
    pub sftp_path: String,

    /// Executable for `scp` transfers
    pub scp_path: String,

    /// Alias -> address
    pub connections: BTreeMap<String, String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            ssh_path: ClientKind::Ssh.default_program().to_string(),
            sftp_path: ClientKind::Sftp.default_program().to_string(),
            scp_path: ClientKind::Scp.default_program().to_string(),
            connections: BTreeMap::new(),
        }
    }
}

impl Configuration {
    pub fn client_path(&self, kind: ClientKind) -> &str {
        match kind {
            ClientKind::Ssh => &self.ssh_path,
            ClientKind::Sftp => &self.sftp_path,
            ClientKind::Scp => &self.scp_path,
        }
    }

    pub fn set_client_path(&mut self, kind: ClientKind, path: impl Into<String>) {
        let slot = match kind {
            ClientKind::Ssh => &mut self.ssh_path,
            ClientKind::Sftp => &mut self.sftp_path,
            ClientKind::Scp => &mut self.scp_path,
        };
        *slot = path.into();
    }

    /// Look up the address stored for `alias`
    pub fn connection(&self, alias: &str) -> Result<&str, QuickSshError> {
        self.connections
            .get(alias)
            .map(String::as_str)
            .ok_or_else(|| QuickSshError::ConnectionNotFound(alias.to_string()))
    }

    /// Insert or overwrite; returns the previous address if there was one
    pub fn upsert_connection(
        &mut self,
        alias: impl Into<String>,
        address: impl Into<String>,
    ) -> Option<String> {
        self.connections.insert(alias.into(), address.into())
    }

    /// Remove `alias`, returning its address
    pub fn remove_connection(&mut self, alias: &str) -> Result<String, QuickSshError> {
        self.connections
            .remove(alias)
            .ok_or_else(|| QuickSshError::ConnectionNotFound(alias.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_kind_parse() {
        assert_eq!("ssh".parse::<ClientKind>().unwrap(), ClientKind::Ssh);
        assert_eq!("sftp".parse::<ClientKind>().unwrap(), ClientKind::Sftp);
        assert_eq!("scp".parse::<ClientKind>().unwrap(), ClientKind::Scp);
    }

    #[test]
    fn test_client_kind_parse_is_exact() {
        for token in ["SSH", "rsync", "", " ssh"] {
            let err = token.parse::<ClientKind>().unwrap_err();
            assert!(matches!(err, QuickSshError::UnknownClientKind(_)));
        }
    }

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.ssh_path, "ssh");
        assert_eq!(config.sftp_path, "sftp");
        assert_eq!(config.scp_path, "scp");
        assert!(config.connections.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let json = r#"{"scp_path": "/usr/local/bin/scp"}"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.ssh_path, "ssh");
        assert_eq!(config.sftp_path, "sftp");
        assert_eq!(config.scp_path, "/usr/local/bin/scp");
        assert!(config.connections.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"connections": {"web": "10.0.0.2"}, "theme": "dark"}"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.connection("web").unwrap(), "10.0.0.2");
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(Configuration::default()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["connections", "scp_path", "sftp_path", "ssh_path"]);
    }

    #[test]
    fn test_set_client_path_touches_one_field() {
        let mut config = Configuration::default();
        config.set_client_path(ClientKind::Sftp, "/opt/sftp");
        assert_eq!(config.client_path(ClientKind::Sftp), "/opt/sftp");
        assert_eq!(config.client_path(ClientKind::Ssh), "ssh");
        assert_eq!(config.client_path(ClientKind::Scp), "scp");
    }

    #[test]
    fn test_upsert_overwrites() {
        let mut config = Configuration::default();
        assert_eq!(config.upsert_connection("db", "10.0.0.5"), None);
        assert_eq!(
            config.upsert_connection("db", "admin@10.0.0.6"),
            Some("10.0.0.5".to_string())
        );
        assert_eq!(config.connections.len(), 1);
        assert_eq!(config.connection("db").unwrap(), "admin@10.0.0.6");
    }

    #[test]
    fn test_remove_missing_connection() {
        let mut config = Configuration::default();
        config.upsert_connection("db", "10.0.0.5");
        let err = config.remove_connection("web").unwrap_err();
        assert!(matches!(err, QuickSshError::ConnectionNotFound(ref a) if a == "web"));
        assert_eq!(config.connections.len(), 1);
    }
}
