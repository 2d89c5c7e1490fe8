//! excflow - black-box verifier for exception-handling control flow
//!
//! This library provides the scenario table, the process-per-scenario
//! verifier and a reference subject that satisfies every transcript.

pub mod cli;
pub mod commands;
pub mod common;
pub mod scenario;
pub mod subject;
pub mod verifier;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use scenario::{Scenario, ScenarioTable};
pub use verifier::{Verdict, VerificationReport, Verifier};
