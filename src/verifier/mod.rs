//! Verifier
//!
//! Treats the subject as a black box: spawn it with a scenario index,
//! capture stdout to EOF, compare bytes, release the process.

pub mod diff;
mod invoke;
mod report;
mod runner;

pub use invoke::{invoke, Invocation, SubjectCommand};
pub use report::{print_json, print_outcome, print_summary};
pub use runner::{ScenarioOutcome, Verdict, VerificationReport, Verifier};
