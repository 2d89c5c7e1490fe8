//! Error types for the excflow CLI
//!
//! Only harness-level problems live here. A subject that prints the wrong
//! transcript is not an error: it is a failed verdict in the report.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the excflow CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Subject Errors ===
    #[error("Subject program not found. Pass it as 'excflow verify <subject>' or set [subject] path in {config}")]
    SubjectNotFound { config: String },

    #[error("Failed to launch subject '{}': {source}", .path.display())]
    SubjectSpawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to capture output of subject '{}' for scenario {index}: {source}", .path.display())]
    SubjectCapture {
        path: PathBuf,
        index: usize,
        #[source]
        source: io::Error,
    },

    // === Scenario Errors ===
    #[error("Scenario {index} does not exist (table has {count} scenarios, valid indices are 0..{count})")]
    ScenarioIndex { index: usize, count: usize },

    #[error("Invalid scenario file '{}': {reason}", .path.display())]
    ScenarioFile { path: PathBuf, reason: String },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a scenario file error
    pub fn scenario_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ScenarioFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error comes from the environment the subject runs in
    /// (missing or unlaunchable executable, broken pipe) rather than from
    /// how the harness was configured.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Error::SubjectNotFound { .. }
                | Error::SubjectSpawn { .. }
                | Error::SubjectCapture { .. }
                | Error::Io(_)
        )
    }

    /// Process exit code for this error
    ///
    /// Infrastructure failures exit with 2, everything else with 3 so that
    /// both stay distinct from an assertion failure (1).
    pub fn exit_code(&self) -> i32 {
        if self.is_infrastructure() {
            2
        } else {
            3
        }
    }
}
