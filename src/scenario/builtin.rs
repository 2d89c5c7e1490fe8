//! The built-in try/except/finally transcripts

use super::Scenario;

/// Message for the recognized error category
pub const INVALID_ARGUMENT_MESSAGE: &str = "Invalid argument value.";

/// Message for everything the handlers do not recognize
pub const INTERNAL_ERROR_MESSAGE: &str = "Unexpected or internal error.";

const PLAIN_TRY: &str = "\
try
after try
";

const TRY_ELSE_FINALLY: &str = "\
try
else
finally
";

const TRY_EXCEPT_FINALLY: &str = "\
try
except: Invalid argument value.
finally
";

const NESTED_PROPAGATION: &str = "\
runner: before
inner try
inner finally
except: Invalid argument value.
finally
runner: except: Invalid argument value.
";

const RERAISED_UNRECOGNIZED: &str = "\
runner: before
except: Invalid argument value.
finally
runner: except: Unexpected or internal error.
";

const ENTRIES: [(&str, &str, &str); 5] = [
    (
        "plain-try",
        "no fault: only the try body and the code after it run",
        PLAIN_TRY,
    ),
    (
        "try-else-finally",
        "no fault: else runs, then finally",
        TRY_ELSE_FINALLY,
    ),
    (
        "try-except-finally",
        "recognized fault: except runs, else is skipped, finally runs",
        TRY_EXCEPT_FINALLY,
    ),
    (
        "nested-propagation",
        "inner finally runs before the fault reaches the outer handler and the runner",
        NESTED_PROPAGATION,
    ),
    (
        "reraised-unrecognized",
        "handler logs the recognized fault, then an unrecognized one reaches the runner",
        RERAISED_UNRECOGNIZED,
    ),
];

pub(super) fn scenarios() -> Vec<Scenario> {
    ENTRIES
        .iter()
        .enumerate()
        .map(|(index, (name, description, expected))| Scenario {
            index,
            name: name.to_string(),
            description: Some(description.to_string()),
            expected: expected.to_string(),
        })
        .collect()
}
