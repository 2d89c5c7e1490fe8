//! Verification loop
//!
//! Runs scenarios strictly one after another. A scenario that prints the
//! wrong transcript or times out is recorded and the loop moves on; only
//! harness errors (e.g. the subject cannot be launched) stop the run.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::Result;
use crate::scenario::Scenario;

use super::diff;
use super::invoke::{invoke, Invocation, SubjectCommand};

/// Verdict for one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Every repetition matched byte for byte
    Passed,
    /// A repetition produced different bytes
    Mismatch {
        /// 1-based repetition that failed
        attempt: u32,
        /// Captured stdout, lossily decoded for display
        actual: String,
        /// Line diff of expected vs. actual
        diff: String,
    },
    /// The bounded wait expired
    TimedOut { attempt: u32, limit_ms: u64 },
}

/// Result of checking one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub index: usize,
    pub name: String,
    #[serde(flatten)]
    pub verdict: Verdict,
    /// Exit code of the last completed run, informational only
    pub exit_code: Option<i32>,
    /// Wall time of all repetitions
    pub elapsed_ms: u64,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }
}

/// Outcomes for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub subject: PathBuf,
    pub repeat: u32,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl VerificationReport {
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    /// True when every scenario passed
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Indices of the failed scenarios
    pub fn failed_indices(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed())
            .map(|o| o.index)
            .collect()
    }
}

/// Spawns the subject per scenario and compares its stdout
#[derive(Debug, Clone)]
pub struct Verifier {
    subject: SubjectCommand,
    repeat: u32,
}

impl Verifier {
    pub fn new(subject: SubjectCommand) -> Self {
        Self { subject, repeat: 1 }
    }

    /// Invoke each scenario `repeat` times (at least once)
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat.max(1);
        self
    }

    pub fn subject(&self) -> &SubjectCommand {
        &self.subject
    }

    /// Check a single scenario
    pub async fn check(&self, scenario: &Scenario) -> Result<ScenarioOutcome> {
        let argument = scenario.argument();
        let mut exit_code = None;
        let mut elapsed = Duration::ZERO;
        let mut verdict = Verdict::Passed;

        for attempt in 1..=self.repeat {
            match invoke(&self.subject, &argument).await? {
                Invocation::Completed {
                    stdout,
                    status,
                    elapsed: run_time,
                } => {
                    exit_code = status.code();
                    elapsed += run_time;

                    if stdout.as_slice() != scenario.expected_bytes() {
                        let actual = String::from_utf8_lossy(&stdout).into_owned();
                        let diff = diff::render(&scenario.expected, &actual);
                        tracing::debug!(
                            "Scenario {} attempt {} mismatched ({} bytes captured)",
                            scenario.index,
                            attempt,
                            stdout.len()
                        );
                        verdict = Verdict::Mismatch {
                            attempt,
                            actual,
                            diff,
                        };
                        break;
                    }
                }
                Invocation::TimedOut { limit } => {
                    elapsed += limit;
                    verdict = Verdict::TimedOut {
                        attempt,
                        limit_ms: millis(limit),
                    };
                    break;
                }
            }
        }

        Ok(ScenarioOutcome {
            index: scenario.index,
            name: scenario.name.clone(),
            verdict,
            exit_code,
            elapsed_ms: millis(elapsed),
        })
    }

    /// Check scenarios in order, reporting each outcome as it lands
    pub async fn run<'a, I, F>(&self, scenarios: I, mut on_outcome: F) -> Result<VerificationReport>
    where
        I: IntoIterator<Item = &'a Scenario>,
        F: FnMut(&ScenarioOutcome),
    {
        let mut outcomes = Vec::new();
        for scenario in scenarios {
            let outcome = self.check(scenario).await?;
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        Ok(VerificationReport {
            subject: self.subject.program.clone(),
            repeat: self.repeat,
            outcomes,
        })
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
