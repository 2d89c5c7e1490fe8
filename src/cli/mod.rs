//! CLI command handling
//!
//! Dispatches CLI commands to the verifier and formats output.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::Result;
use crate::scenario::ScenarioTable;
use crate::verifier::{self, SubjectCommand, Verifier};

/// Dispatch a CLI command
///
/// Returns `Ok(false)` when the command ran but some scenario failed.
pub async fn dispatch(command: Commands) -> Result<bool> {
    match command {
        Commands::Verify {
            subject,
            scenarios,
            scenario_file,
            repeat,
            timeout,
            json,
            verbose,
        } => {
            let config = Config::load()?;
            if !config.report.color {
                colored::control::set_override(false);
            }

            let table = load_table(scenario_file.as_deref())?;
            let selected = table.select(&scenarios)?;

            let program = config.resolve_subject(subject)?;
            let limit = match timeout {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => config.timeouts.subject_limit(),
            };

            let subject_cmd = SubjectCommand::new(program)
                .with_leading_args(config.subject.args.clone())
                .with_stderr(verbose && !json)
                .with_timeout(limit);

            tracing::info!(
                "Verifying {} scenario(s) against {}",
                selected.len(),
                subject_cmd.program().display()
            );

            let runner = Verifier::new(subject_cmd).with_repeat(repeat);

            if !json {
                println!(
                    "\n{} {}",
                    "Verifying:".blue().bold(),
                    runner.subject().program().display().to_string().white().bold()
                );
                if verbose {
                    let wait = match limit {
                        Some(limit) => format!("{:?} per run", limit),
                        None => "unbounded".to_string(),
                    };
                    println!("  {}", format!("timeout: {}, repeat: {}", wait, repeat).dimmed());
                }
                println!("\n{}", "Scenarios:".cyan());
            }

            let report = runner
                .run(selected, |outcome| {
                    if !json {
                        verifier::print_outcome(outcome, verbose);
                    }
                })
                .await?;

            if json {
                verifier::print_json(&report)?;
            } else {
                verifier::print_summary(&report);
            }

            Ok(report.all_passed())
        }

        Commands::List {
            scenario_file,
            json,
        } => {
            let table = load_table(scenario_file.as_deref())?;

            if json {
                let scenarios: Vec<_> = table.iter().collect();
                println!("{}", serde_json::to_string_pretty(&scenarios)?);
                return Ok(true);
            }

            for scenario in table.iter() {
                println!(
                    "{} {}",
                    format!("[{}]", scenario.index).cyan(),
                    scenario.name.bold()
                );
                if let Some(desc) = &scenario.description {
                    println!("    {}", desc.dimmed());
                }
                for line in scenario.expected.lines() {
                    println!("    | {}", line);
                }
            }
            Ok(true)
        }

        Commands::Show {
            index,
            scenario_file,
        } => {
            let table = load_table(scenario_file.as_deref())?;
            let scenario = table.get(index)?;

            // Raw bytes, no trailing newline added
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(scenario.expected_bytes())?;
            out.flush()?;
            Ok(true)
        }
    }
}

fn load_table(path: Option<&Path>) -> Result<ScenarioTable> {
    match path {
        Some(path) => {
            tracing::debug!("Loading scenarios from {}", path.display());
            ScenarioTable::load(path)
        }
        None => Ok(ScenarioTable::builtin()),
    }
}
