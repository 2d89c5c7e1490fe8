//! Line diff between an expected transcript and captured stdout

use colored::Colorize;
use similar::{ChangeTag, TextDiff};

/// Unified-style line diff, `-` for expected lines and `+` for actual ones
///
/// Lines without a trailing newline are flagged so that a missing final
/// `\n` is visible.
pub fn render(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(sign);
        out.push_str(change.as_str().unwrap_or_default());
        if change.missing_newline() {
            out.push_str("\n\\ No newline at end of output\n");
        }
    }
    out
}

/// Colorize a diff produced by [`render`] for terminal output
pub fn colorize(diff: &str) -> String {
    diff.lines()
        .map(|line| {
            if line.starts_with('-') {
                line.red().to_string()
            } else if line.starts_with('+') {
                line.green().to_string()
            } else {
                line.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
