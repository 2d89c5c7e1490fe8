//! Configuration and subject lookup paths

use std::path::PathBuf;

/// Name used for the configuration directory
const APP_NAME: &str = "excflow";

/// File name of the bundled reference subject
pub const REFERENCE_SUBJECT: &str = "excflow-subject";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/excflow/`
/// - macOS: `~/Library/Application Support/excflow/`
/// - Windows: `%APPDATA%\excflow\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Human-readable config location for error messages
pub fn config_path_display() -> String {
    config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "config.toml".to_string())
}

/// Path of the reference subject installed next to the running binary
pub fn reference_subject_beside_exe() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let candidate = exe
        .parent()?
        .join(format!("{}{}", REFERENCE_SUBJECT, std::env::consts::EXE_SUFFIX));
    candidate.is_file().then_some(candidate)
}
