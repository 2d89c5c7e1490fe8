//! Reference subject
//!
//! A conforming implementation of the five control-flow transcripts, used
//! by the `excflow-subject` binary so the verifier can be checked against
//! something known to be correct. Faults travel as `Result` values; a
//! [`Guarded`] block gives them try/except/else/finally shape.

use thiserror::Error;

use crate::scenario::{INTERNAL_ERROR_MESSAGE, INVALID_ARGUMENT_MESSAGE};

/// Fault code raised when a handler gives up on a recognized fault
pub const UNHANDLED_FAULT_CODE: u32 = 9;

/// A fault raised inside a guarded block
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The one category handlers recognize
    #[error("invalid argument")]
    InvalidArgument,
    /// Anything else
    #[error("fault code {0}")]
    Other(u32),
}

impl Fault {
    /// Message a handler prints for this fault
    pub fn describe(&self) -> &'static str {
        match self {
            Fault::InvalidArgument => INVALID_ARGUMENT_MESSAGE,
            Fault::Other(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

pub type Outcome = std::result::Result<(), Fault>;

/// Line buffer for the transcript
#[derive(Debug, Default)]
pub struct Trace {
    out: String,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

type Body<'a> = Box<dyn FnOnce(&mut Trace) -> Outcome + 'a>;
type Handler<'a> = Box<dyn FnOnce(&mut Trace, Fault) -> Outcome + 'a>;
type Cleanup<'a> = Box<dyn FnOnce(&mut Trace) + 'a>;

/// A try block with optional except, else and finally clauses
///
/// - `except` runs only when the body faults; it may recover (`Ok`) or
///   raise (`Err`, the same fault or a new one).
/// - `otherwise` (else) runs only when the body succeeds; its faults are not
///   seen by `except`.
/// - `finally` runs exactly once after whichever of those ran, and the
///   outcome they produced is returned unchanged.
pub struct Guarded<'a> {
    body: Body<'a>,
    except: Option<Handler<'a>>,
    otherwise: Option<Body<'a>>,
    finally: Option<Cleanup<'a>>,
}

impl<'a> Guarded<'a> {
    pub fn new(body: impl FnOnce(&mut Trace) -> Outcome + 'a) -> Self {
        Self {
            body: Box::new(body),
            except: None,
            otherwise: None,
            finally: None,
        }
    }

    pub fn except(mut self, handler: impl FnOnce(&mut Trace, Fault) -> Outcome + 'a) -> Self {
        self.except = Some(Box::new(handler));
        self
    }

    pub fn otherwise(mut self, body: impl FnOnce(&mut Trace) -> Outcome + 'a) -> Self {
        self.otherwise = Some(Box::new(body));
        self
    }

    pub fn finally(mut self, cleanup: impl FnOnce(&mut Trace) + 'a) -> Self {
        self.finally = Some(Box::new(cleanup));
        self
    }

    /// Run the block against `trace`
    pub fn run(self, trace: &mut Trace) -> Outcome {
        let outcome = match (self.body)(trace) {
            Ok(()) => match self.otherwise {
                Some(otherwise) => otherwise(trace),
                None => Ok(()),
            },
            Err(fault) => match self.except {
                Some(handler) => handler(trace, fault),
                None => Err(fault),
            },
        };

        if let Some(cleanup) = self.finally {
            cleanup(trace);
        }

        outcome
    }
}

/// Top-level runner: reports whatever fault escapes `scenario`
pub fn runner(trace: &mut Trace, scenario: impl FnOnce(&mut Trace) -> Outcome) {
    trace.line("runner: before");
    match scenario(trace) {
        Ok(()) => trace.line("runner: after"),
        Err(fault) => trace.line(format!("runner: except: {}", fault.describe())),
    }
}

/// Handler that logs the fault and recovers
fn log_and_recover(trace: &mut Trace, fault: Fault) -> Outcome {
    trace.line(format!("except: {}", fault.describe()));
    Ok(())
}

fn plain_try(trace: &mut Trace) {
    let outcome = Guarded::new(|t| {
        t.line("try");
        Ok(())
    })
    .run(trace);
    debug_assert!(outcome.is_ok());
    trace.line("after try");
}

fn try_else_finally(trace: &mut Trace) {
    let outcome = Guarded::new(|t| {
        t.line("try");
        Ok(())
    })
    .except(log_and_recover)
    .otherwise(|t| {
        t.line("else");
        Ok(())
    })
    .finally(|t| t.line("finally"))
    .run(trace);
    debug_assert!(outcome.is_ok());
}

fn try_except_finally(trace: &mut Trace) {
    let outcome = Guarded::new(|t| {
        t.line("try");
        Err(Fault::InvalidArgument)
    })
    .except(log_and_recover)
    .otherwise(|t| {
        t.line("else");
        Ok(())
    })
    .finally(|t| t.line("finally"))
    .run(trace);
    debug_assert!(outcome.is_ok());
}

fn nested_propagation(trace: &mut Trace) {
    runner(trace, |trace| {
        Guarded::new(|t| {
            Guarded::new(|t| {
                t.line("inner try");
                Err(Fault::InvalidArgument)
            })
            .finally(|t| t.line("inner finally"))
            .run(t)
        })
        .except(|t, fault| {
            t.line(format!("except: {}", fault.describe()));
            Err(fault)
        })
        .finally(|t| t.line("finally"))
        .run(trace)
    });
}

fn reraised_unrecognized(trace: &mut Trace) {
    runner(trace, |trace| {
        Guarded::new(|_| Err(Fault::InvalidArgument))
            .except(|t, fault| {
                t.line(format!("except: {}", fault.describe()));
                Err(Fault::Other(UNHANDLED_FAULT_CODE))
            })
            .finally(|t| t.line("finally"))
            .run(trace)
    });
}

/// Number of scenarios the reference subject knows
pub const SCENARIO_COUNT: usize = 5;

/// Produce the transcript for a scenario index, `None` if unknown
pub fn transcript(index: usize) -> Option<String> {
    let scenario: fn(&mut Trace) = match index {
        0 => plain_try,
        1 => try_else_finally,
        2 => try_except_finally,
        3 => nested_propagation,
        4 => reraised_unrecognized,
        _ => return None,
    };
    let mut trace = Trace::new();
    scenario(&mut trace);
    Some(trace.into_string())
}
