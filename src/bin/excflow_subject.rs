//! Reference subject binary
//!
//! `excflow-subject <index>` prints the control-flow transcript for one
//! scenario on stdout. Usage errors go to stderr with exit code 2 and leave
//! stdout empty.

use std::io::Write;
use std::process::ExitCode;

use excflow::subject::{self, SCENARIO_COUNT};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let index = match (args.next(), args.next()) {
        (Some(arg), None) => arg.parse::<usize>().ok(),
        _ => None,
    };

    let Some(transcript) = index.and_then(subject::transcript) else {
        eprintln!(
            "usage: excflow-subject <index>  (index is 0..{})",
            SCENARIO_COUNT - 1
        );
        return ExitCode::from(2);
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if out
        .write_all(transcript.as_bytes())
        .and_then(|()| out.flush())
        .is_err()
    {
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
