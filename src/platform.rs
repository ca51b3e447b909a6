//! Version line: crate version, OS description and architecture

use sysinfo::System;

/// Crate version reported by `quickssh version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `QuickSSH <version> on <os> <arch>`
pub fn version_line() -> String {
    format!(
        "QuickSSH {} on {} {}",
        VERSION,
        os_description(),
        std::env::consts::ARCH
    )
}

fn os_description() -> String {
    let os = System::long_os_version().unwrap_or_else(|| std::env::consts::OS.to_string());

    if cfg!(windows) {
        let wine = !winlogon_running();
        tag_wine(os, wine)
    } else {
        os
    }
}

/// A Windows host always runs winlogon; Wine reports Windows without it.
fn winlogon_running() -> bool {
    let mut sys = System::new();
    sys.refresh_processes();
    sys.processes().values().any(|p| is_winlogon(p.name()))
}

fn is_winlogon(process_name: &str) -> bool {
    let lower = process_name.to_lowercase();
    lower == "winlogon" || lower == "winlogon.exe"
}

fn tag_wine(os: String, wine: bool) -> String {
    if wine {
        format!("{os} on Wine")
    } else {
        os
    }
}
