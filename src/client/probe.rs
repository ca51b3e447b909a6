//! Executable lookup
//!
//! Checks that a configured client can be started without starting it. A
//! value containing a path separator is checked as a file; a bare name is
//! looked up in `PATH` (plus `PATHEXT` on Windows), the same way the OS would
//! resolve it at spawn time.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{QuickSshError, Result};

/// Resolve `program` to an executable file, or fail with `InvalidClient`
///
/// # Examples
/// ```
/// use quickssh::client::probe::verify_executable;
///
/// assert!(verify_executable("").is_err());
/// assert!(verify_executable("/definitely/not/here/ssh").is_err());
/// ```
pub fn verify_executable(program: &str) -> Result<PathBuf> {
    if program.trim().is_empty() {
        return Err(QuickSshError::invalid_client(program, "client path is empty"));
    }

    let candidate = Path::new(program);
    let resolved = if has_directory_part(candidate) {
        is_executable(candidate).then(|| candidate.to_path_buf())
    } else {
        search_path(program, env::var_os("PATH").as_deref())
    };

    match resolved {
        Some(path) => {
            debug!("Client {} resolved to {}", program, path.display());
            Ok(path)
        }
        None => Err(QuickSshError::invalid_client(
            program,
            "no executable file at that path or on PATH",
        )),
    }
}

/// Find `program` in the directories of a `PATH`-style value
pub fn search_path(program: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    let names = candidate_names(program);

    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|path| is_executable(path))
}

fn has_directory_part(path: &Path) -> bool {
    path.is_absolute() || path.components().count() > 1
}

#[cfg(windows)]
fn candidate_names(program: &str) -> Vec<OsString> {
    let mut names = vec![OsString::from(program)];
    if Path::new(program).extension().is_some() {
        return names;
    }

    let pathext = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    names.extend(
        pathext
            .split(';')
            .filter(|ext| !ext.is_empty())
            .map(|ext| OsString::from(format!("{program}{ext}"))),
    );
    names
}

#[cfg(not(windows))]
fn candidate_names(program: &str) -> Vec<OsString> {
    vec![OsString::from(program)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
