//! File-backed configuration repository
//!
//! Every read re-parses the file and every write replaces it, so the file on
//! disk stays the only copy of the configuration. There is no locking: two
//! processes saving at the same time resolve as last-writer-wins.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::model::{ClientKind, Configuration};
use crate::config::{APP_DIR_NAME, CONFIG_DIR_ENV, CONFIG_FILE_NAME};
use crate::error::{QuickSshError, Result};

/// Per-user directory holding `quickssh_config.json`
///
/// `QUICKSSH_CONFIG_DIR` wins when set; otherwise the platform config
/// directory (`%APPDATA%`, `~/Library/Application Support`, `~/.config`)
/// joined with `QuickSSH`.
pub fn resolve_config_directory() -> PathBuf {
    resolve_from(std::env::var_os(CONFIG_DIR_ENV), dirs::config_dir())
}

fn resolve_from(override_dir: Option<OsString>, base: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Repository over a single JSON config file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at an explicit directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at [`resolve_config_directory`]
    pub fn open_default() -> Self {
        Self::new(resolve_config_directory())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Create the directory and a default config file if they are missing
    ///
    /// Never overwrites an existing file. Returns `true` when a new file was
    /// written.
    pub fn ensure_config_file(&self) -> Result<bool> {
        fs::create_dir_all(&self.dir).map_err(|e| QuickSshError::persistence(&self.dir, e))?;

        let path = self.file_path();
        if path.exists() {
            return Ok(false);
        }

        self.write(&path, &Configuration::default())?;
        info!("Created configuration file at {}", path.display());
        Ok(true)
    }

    /// Read and parse the config file
    pub fn load(&self) -> Result<Configuration> {
        let path = self.file_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(QuickSshError::ConfigNotFound(path));
            }
            Err(e) => return Err(QuickSshError::persistence(&path, e)),
        };

        // `null` is valid JSON but not a configuration
        let parsed: Option<Configuration> = serde_json::from_str(&content)
            .map_err(|e| QuickSshError::corrupt(&path, e.to_string()))?;
        let config = parsed.ok_or_else(|| QuickSshError::corrupt(&path, "document is null"))?;

        debug!(
            "Loaded {} connection(s) from {}",
            config.connections.len(),
            path.display()
        );
        Ok(config)
    }

    /// Replace the config file with `config`
    pub fn save(&self, config: &Configuration) -> Result<()> {
        self.write(&self.file_path(), config)
    }

    fn write(&self, path: &Path, config: &Configuration) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| QuickSshError::persistence(path, e.into()))?;
        fs::write(path, json).map_err(|e| QuickSshError::persistence(path, e))?;
        debug!("Wrote configuration to {}", path.display());
        Ok(())
    }

    pub fn connections(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.load()?.connections)
    }

    pub fn connection(&self, alias: &str) -> Result<String> {
        self.load()?.connection(alias).map(str::to_string)
    }

    pub fn client_path(&self, kind: ClientKind) -> Result<String> {
        Ok(self.load()?.client_path(kind).to_string())
    }

    pub fn set_client_path(&self, kind: ClientKind, path: &str) -> Result<()> {
        let mut config = self.load()?;
        config.set_client_path(kind, path);
        self.save(&config)?;
        info!("{} client path set to {}", kind.label(), path);
        Ok(())
    }

    /// Insert or overwrite `alias`; client paths are kept as they are
    pub fn add_connection(&self, alias: &str, address: &str) -> Result<()> {
        let mut config = self.load()?;
        if let Some(previous) = config.upsert_connection(alias, address) {
            debug!("Replacing connection {} (was {})", alias, previous);
        }
        self.save(&config)?;
        info!("Saved connection {} -> {}", alias, address);
        Ok(())
    }

    /// Remove `alias`; the file is not rewritten when the alias is absent
    pub fn remove_connection(&self, alias: &str) -> Result<()> {
        let mut config = self.load()?;
        config.remove_connection(alias)?;
        self.save(&config)?;
        info!("Removed connection {}", alias);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, ConfigStore) {
        let tmp = TempDir::new().unwrap();
        let store = ConfigStore::new(tmp.path().join(APP_DIR_NAME));
        (tmp, store)
    }

    #[test]
    fn test_resolve_override_wins() {
        let dir = resolve_from(
            Some(OsString::from("/tmp/qs")),
            Some(PathBuf::from("/home/u/.config")),
        );
        assert_eq!(dir, PathBuf::from("/tmp/qs"));
    }

    #[test]
    fn test_resolve_empty_override_ignored() {
        let dir = resolve_from(Some(OsString::new()), Some(PathBuf::from("/home/u/.config")));
        assert_eq!(dir, PathBuf::from("/home/u/.config").join("QuickSSH"));
    }

    #[test]
    fn test_resolve_without_base() {
        assert_eq!(resolve_from(None, None), PathBuf::from(".").join("QuickSSH"));
    }

    #[test]
    fn test_ensure_creates_directory_and_defaults() {
        let (_tmp, store) = temp_store();
        assert!(!store.dir().exists());

        assert!(store.ensure_config_file().unwrap());
        assert!(store.file_path().is_file());
        assert_eq!(store.load().unwrap(), Configuration::default());
    }

    #[test]
    fn test_ensure_never_overwrites() {
        let (_tmp, store) = temp_store();
        store.ensure_config_file().unwrap();
        store.add_connection("web", "10.0.0.2").unwrap();

        assert!(!store.ensure_config_file().unwrap());
        assert_eq!(store.connection("web").unwrap(), "10.0.0.2");
    }

    #[test]
    fn test_ensure_fails_when_directory_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("QuickSSH");
        fs::write(&blocker, "not a directory").unwrap();

        let err = ConfigStore::new(&blocker).ensure_config_file().unwrap_err();
        assert!(matches!(err, QuickSshError::Persistence { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let (_tmp, store) = temp_store();
        let err = store.load().unwrap_err();
        assert!(matches!(err, QuickSshError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_corrupt_file() {
        let (_tmp, store) = temp_store();
        fs::create_dir_all(store.dir()).unwrap();

        for content in ["{not json", "null", "[1, 2]", r#"{"connections": 5}"#] {
            fs::write(store.file_path(), content).unwrap();
            let err = store.load().unwrap_err();
            assert!(
                matches!(err, QuickSshError::Corrupt { .. }),
                "expected corrupt for {content:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_tmp, store) = temp_store();
        store.ensure_config_file().unwrap();

        let mut config = Configuration::default();
        config.set_client_path(ClientKind::Ssh, "/usr/bin/ssh");
        config.upsert_connection("web", "deploy@10.0.0.2");
        config.upsert_connection("db", "10.0.0.5");
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_add_connection_upserts() {
        let (_tmp, store) = temp_store();
        store.ensure_config_file().unwrap();

        store.add_connection("web", "10.0.0.2").unwrap();
        store.add_connection("web", "10.0.0.3").unwrap();

        let connections = store.connections().unwrap();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections["web"], "10.0.0.3");
    }

    #[test]
    fn test_connection_edits_keep_client_paths() {
        let (_tmp, store) = temp_store();
        store.ensure_config_file().unwrap();
        store.set_client_path(ClientKind::Scp, "/opt/bin/scp").unwrap();

        store.add_connection("web", "10.0.0.2").unwrap();
        assert_eq!(store.client_path(ClientKind::Scp).unwrap(), "/opt/bin/scp");

        store.remove_connection("web").unwrap();
        assert_eq!(store.client_path(ClientKind::Scp).unwrap(), "/opt/bin/scp");
    }

    #[test]
    fn test_remove_missing_leaves_file_untouched() {
        let (_tmp, store) = temp_store();
        store.ensure_config_file().unwrap();
        store.add_connection("web", "10.0.0.2").unwrap();
        let before = fs::read_to_string(store.file_path()).unwrap();

        let err = store.remove_connection("db").unwrap_err();
        assert!(matches!(err, QuickSshError::ConnectionNotFound(_)));
        assert_eq!(fs::read_to_string(store.file_path()).unwrap(), before);
    }

    #[test]
    fn test_remove_present_keeps_others() {
        let (_tmp, store) = temp_store();
        store.ensure_config_file().unwrap();
        store.add_connection("web", "10.0.0.2").unwrap();
        store.add_connection("db", "10.0.0.5").unwrap();

        store.remove_connection("web").unwrap();

        let connections = store.connections().unwrap();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections["db"], "10.0.0.5");
        assert!(store.connection("web").unwrap_err().is_not_found());
    }
}
