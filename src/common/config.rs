//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::{self, config_path};
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Subject program settings
    #[serde(default)]
    pub subject: SubjectConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Configuration for the program under test
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SubjectConfig {
    /// Path to the subject executable
    pub path: Option<PathBuf>,

    /// Arguments placed before the scenario index
    #[serde(default)]
    pub args: Vec<String>,
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Default)]
pub struct Timeouts {
    /// Bound on a single subject invocation, 0 waits forever
    #[serde(default)]
    pub subject_secs: u64,
}

impl Timeouts {
    /// Per-invocation limit, `None` when unbounded
    pub fn subject_limit(&self) -> Option<Duration> {
        (self.subject_secs > 0).then(|| Duration::from_secs(self.subject_secs))
    }
}

/// Report settings
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Colorize the human-readable report
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve the subject executable
    ///
    /// An explicit path wins, then `[subject] path`, then the reference
    /// subject found in PATH, then the one installed beside this binary.
    pub fn resolve_subject(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit.or_else(|| self.subject.path.clone()) {
            return Ok(resolve_bare_name(path));
        }

        if let Ok(found) = which::which(paths::REFERENCE_SUBJECT) {
            tracing::debug!("Using reference subject from PATH: {}", found.display());
            return Ok(found);
        }

        paths::reference_subject_beside_exe().ok_or_else(|| Error::SubjectNotFound {
            config: paths::config_path_display(),
        })
    }
}

/// Make a bare program name launchable
///
/// `Command::new` searches PATH for names without a separator, so a file in
/// the current directory is rewritten to `./name`. Other bare names go
/// through `which`; anything else is used as given and a missing file
/// surfaces later as a spawn failure.
fn resolve_bare_name(path: PathBuf) -> PathBuf {
    if path.components().count() != 1 {
        return path;
    }
    if path.is_file() {
        return Path::new(".").join(path);
    }
    which::which(&path).unwrap_or(path)
}
