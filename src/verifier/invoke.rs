//! Subject invocation
//!
//! Spawns the subject once, drains its stdout to EOF and reaps it. stdin is
//! closed from the start and stderr is never read.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::common::{Error, Result};

/// How to launch the subject
#[derive(Debug, Clone)]
pub struct SubjectCommand {
    /// Executable path
    pub program: PathBuf,
    /// Arguments placed before the scenario index
    pub leading_args: Vec<String>,
    /// Pass the subject's stderr through instead of discarding it
    pub show_stderr: bool,
    /// Bound on a single invocation, `None` waits forever
    pub timeout: Option<Duration>,
}

impl SubjectCommand {
    /// Launch `program <index>` with no extra arguments and no timeout
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            show_stderr: false,
            timeout: None,
        }
    }

    pub fn with_leading_args(mut self, args: Vec<String>) -> Self {
        self.leading_args = args;
        self
    }

    pub fn with_stderr(mut self, show: bool) -> Self {
        self.show_stderr = show;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// What one subject run produced
#[derive(Debug)]
pub enum Invocation {
    /// The subject exited and closed stdout
    Completed {
        stdout: Vec<u8>,
        status: ExitStatus,
        elapsed: Duration,
    },
    /// The bounded wait expired; the subject was killed and reaped
    TimedOut { limit: Duration },
}

/// Run the subject with `argument` as its final argument
pub async fn invoke(subject: &SubjectCommand, argument: &str) -> Result<Invocation> {
    let started = Instant::now();

    let mut child = Command::new(&subject.program)
        .args(&subject.leading_args)
        .arg(argument)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(if subject.show_stderr {
            Stdio::inherit()
        } else {
            Stdio::null()
        })
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::SubjectSpawn {
            path: subject.program.clone(),
            source,
        })?;

    tracing::debug!(
        "Spawned {} {} (pid {:?})",
        subject.program.display(),
        argument,
        child.id()
    );

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::Internal("subject stdout was not piped".to_string()))?;

    let capture = async {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await?;
        let status = child.wait().await?;
        Ok::<_, std::io::Error>((buf, status))
    };

    let waited = match subject.timeout {
        Some(limit) => tokio::time::timeout(limit, capture).await.ok(),
        None => Some(capture.await),
    };

    let capture_error = |source| Error::SubjectCapture {
        path: subject.program.clone(),
        index: argument.parse().unwrap_or_default(),
        source,
    };

    match waited {
        Some(result) => {
            let (stdout, status) = result.map_err(capture_error)?;
            let elapsed = started.elapsed();
            tracing::debug!(
                "Subject exited with {:?} after {:?}, {} bytes on stdout",
                status.code(),
                elapsed,
                stdout.len()
            );
            Ok(Invocation::Completed {
                stdout,
                status,
                elapsed,
            })
        }
        None => {
            let limit = subject.timeout.unwrap_or_default();
            tracing::warn!(
                "Subject {} {} did not finish within {:?}, killing it",
                subject.program.display(),
                argument,
                limit
            );
            // kill() also waits, so the process is reaped before we move on
            child.kill().await.map_err(capture_error)?;
            Ok(Invocation::TimedOut { limit })
        }
    }
}
