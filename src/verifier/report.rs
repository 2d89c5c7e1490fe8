//! Report formatting

use colored::Colorize;

use crate::common::Result;

use super::diff;
use super::runner::{ScenarioOutcome, Verdict, VerificationReport};

/// Print one outcome as soon as it is known
pub fn print_outcome(outcome: &ScenarioOutcome, verbose: bool) {
    match &outcome.verdict {
        Verdict::Passed => {
            println!(
                "  {} Scenario {}: {}{}",
                "✓".green(),
                outcome.index,
                outcome.name,
                if verbose {
                    format!(" ({} ms)", outcome.elapsed_ms).dimmed().to_string()
                } else {
                    String::new()
                }
            );
        }
        Verdict::Mismatch {
            attempt,
            diff: rendered,
            ..
        } => {
            println!(
                "  {} Scenario {}: {} {}",
                "✗".red(),
                outcome.index,
                outcome.name,
                format!("(output mismatch on run {})", attempt).red()
            );
            println!("{}", indent(&diff::colorize(rendered)));
        }
        Verdict::TimedOut { attempt, limit_ms } => {
            println!(
                "  {} Scenario {}: {} {}",
                "✗".red(),
                outcome.index,
                outcome.name,
                format!("(timed out after {} ms on run {})", limit_ms, attempt).red()
            );
        }
    }

    if verbose {
        if let Some(code) = outcome.exit_code {
            println!("      {}", format!("exit code {}", code).dimmed());
        }
    }
}

/// Print the closing summary line
pub fn print_summary(report: &VerificationReport) {
    let total = report.outcomes.len();
    if report.all_passed() {
        println!(
            "\n{} {}\n",
            "✓".green().bold(),
            format!("{}/{} scenarios passed", total, total).green().bold()
        );
    } else {
        let failed = report
            .failed_indices()
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "\n{} {} {}\n",
            "✗".red().bold(),
            format!("{}/{} scenarios passed", report.passed_count(), total)
                .red()
                .bold(),
            format!("(failed: {})", failed).red()
        );
    }
}

/// Print the report as pretty JSON
pub fn print_json(report: &VerificationReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("      {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
