//! End-to-end tests for the excflow CLI
//!
//! These tests drive the built binaries:
//! 1. `excflow-subject` must print each transcript exactly
//! 2. `excflow verify` must pass it, flag broken subjects per scenario and
//!    keep going, and report launch problems as infrastructure failures

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

const TRANSCRIPTS: [&str; 5] = [
    "try\nafter try\n",
    "try\nelse\nfinally\n",
    "try\nexcept: Invalid argument value.\nfinally\n",
    "runner: before\ninner try\ninner finally\nexcept: Invalid argument value.\nfinally\nrunner: except: Invalid argument value.\n",
    "runner: before\nexcept: Invalid argument value.\nfinally\nrunner: except: Unexpected or internal error.\n",
];

/// Test context with an isolated config directory
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    fn config_home(&self) -> PathBuf {
        self.path("config")
    }

    /// Write the excflow config file
    fn write_config(&self, content: &str) {
        let path = self.config_home().join("excflow").join("config.toml");
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config dir");
        fs::write(&path, content).expect("Failed to write config");
    }

    /// Configure a shell script as the subject; it receives the index as $1
    fn use_script_subject(&self, script: &str) {
        let script_path = self.path("subject.sh");
        fs::write(&script_path, script).expect("Failed to write script");
        self.write_config(&format!(
            "[subject]\npath = \"/bin/sh\"\nargs = [\"{}\"]\n",
            script_path.display()
        ));
    }

    fn run_excflow(&self, args: &[&str]) -> CliOutput {
        self.run_excflow_in(Path::new("."), args)
    }

    /// Run excflow with `dir` as its working directory
    fn run_excflow_in(&self, dir: &Path, args: &[&str]) -> CliOutput {
        let output = Command::new(excflow_bin())
            .current_dir(dir)
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run excflow");

        CliOutput {
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        }
    }
}

#[derive(Debug)]
struct CliOutput {
    stdout: Vec<u8>,
    stderr: String,
    code: Option<i32>,
}

impl CliOutput {
    fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.stdout).unwrap_or_else(|e| {
            panic!("stdout should be JSON ({e}):\n{}", self.stdout_text())
        })
    }
}

fn excflow_bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_excflow"))
}

fn subject_bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_excflow-subject"))
}

fn run_subject(args: &[&str]) -> std::process::Output {
    Command::new(subject_bin())
        .args(args)
        .output()
        .expect("Failed to run excflow-subject")
}

fn subject_arg() -> &'static str {
    subject_bin().to_str().unwrap()
}

// ============== Reference subject ==============

#[test]
fn test_subject_prints_every_transcript() {
    for (i, expected) in TRANSCRIPTS.iter().enumerate() {
        let output = run_subject(&[&i.to_string()]);
        assert!(output.status.success(), "scenario {i} exited with {:?}", output.status);
        assert_eq!(
            output.stdout,
            expected.as_bytes(),
            "scenario {i} printed:\n{}",
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

#[test]
fn test_subject_is_idempotent() {
    for i in 0..TRANSCRIPTS.len() {
        let first = run_subject(&[&i.to_string()]).stdout;
        let second = run_subject(&[&i.to_string()]).stdout;
        assert_eq!(first, second, "scenario {i}");
    }
}

#[test]
fn test_subject_rejects_bad_arguments() {
    for args in [vec![], vec!["5"], vec!["x"], vec!["0", "1"]] {
        let output = run_subject(&args);
        assert_eq!(output.status.code(), Some(2), "args {:?}", args);
        assert!(output.stdout.is_empty(), "args {:?}", args);
    }
}

// ============== Verifier ==============

#[test]
fn test_verify_reference_subject_passes() {
    let ctx = TestContext::new();
    let output = ctx.run_excflow(&["verify", subject_arg()]);

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let stdout = output.stdout_text();
    assert!(stdout.contains("5/5 scenarios passed"), "stdout: {stdout}");
    for name in ["plain-try", "nested-propagation", "reraised-unrecognized"] {
        assert!(stdout.contains(name), "missing {name} in: {stdout}");
    }
}

#[test]
fn test_verify_json_report() {
    let ctx = TestContext::new();
    let output = ctx.run_excflow(&["verify", subject_arg(), "--json", "--repeat", "2"]);

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let report = output.json();
    assert_eq!(report["repeat"], 2);
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 5);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome["index"], i);
        assert_eq!(outcome["verdict"], "passed");
        assert_eq!(outcome["exit_code"], 0);
    }
}

#[test]
fn test_mismatch_is_reported_and_run_continues() {
    let ctx = TestContext::new();
    // Always prints the first transcript, whatever the index
    ctx.use_script_subject("printf 'try\\nafter try\\n'\n");

    let output = ctx.run_excflow(&["verify", "--json"]);
    assert_eq!(output.code, Some(1), "stderr: {}", output.stderr);

    let report = output.json();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcomes[0]["verdict"], "passed");
    for outcome in &outcomes[1..] {
        assert_eq!(outcome["verdict"], "mismatch");
        assert_eq!(outcome["actual"], "try\nafter try\n");
    }

    let diff = outcomes[4]["diff"].as_str().unwrap();
    assert!(diff.contains("-runner: except: Unexpected or internal error.\n"));
    assert!(diff.contains("+after try\n"));
}

#[test]
fn test_swapped_classification_fails_only_that_scenario() {
    let ctx = TestContext::new();
    // Correct for 0..=3, but reports the recognized message for scenario 4
    ctx.use_script_subject(&format!(
        "case \"$1\" in\n\
         0) printf '%s' '{}' ;;\n\
         1) printf '%s' '{}' ;;\n\
         2) printf '%s' '{}' ;;\n\
         3) printf '%s' '{}' ;;\n\
         4) printf '%s' '{}' ;;\n\
         esac\n",
        TRANSCRIPTS[0],
        TRANSCRIPTS[1],
        TRANSCRIPTS[2],
        TRANSCRIPTS[3],
        TRANSCRIPTS[4].replace("Unexpected or internal error.", "Invalid argument value."),
    ));

    let output = ctx.run_excflow(&["verify"]);
    assert_eq!(output.code, Some(1), "stderr: {}", output.stderr);
    let stdout = output.stdout_text();
    assert!(stdout.contains("4/5 scenarios passed"), "stdout: {stdout}");
    assert!(stdout.contains("(failed: 4)"), "stdout: {stdout}");
}

#[test]
fn test_missing_trailing_newline_fails() {
    let ctx = TestContext::new();
    ctx.use_script_subject("printf 'try\\nafter try'\n");

    let output = ctx.run_excflow(&["verify", "--scenario", "0", "--json"]);
    assert_eq!(output.code, Some(1));
    let report = output.json();
    assert_eq!(report["outcomes"][0]["verdict"], "mismatch");
}

#[test]
fn test_missing_subject_is_infrastructure_failure() {
    let ctx = TestContext::new();
    let missing = ctx.path("no_such_test_exception");
    let output = ctx.run_excflow(&["verify", missing.to_str().unwrap()]);

    assert_eq!(output.code, Some(2));
    assert!(
        output.stderr.contains("Failed to launch subject"),
        "stderr: {}",
        output.stderr
    );
    assert!(!output.stdout_text().contains("scenarios passed"));
}

#[test]
fn test_unknown_scenario_index_is_config_error() {
    let ctx = TestContext::new();
    let output = ctx.run_excflow(&["verify", subject_arg(), "--scenario", "7"]);

    assert_eq!(output.code, Some(3));
    assert!(output.stderr.contains("Scenario 7 does not exist"), "stderr: {}", output.stderr);
}

#[test]
fn test_timeout_marks_scenario_and_continues() {
    let ctx = TestContext::new();
    // Hang on scenario 1 only, delegate the rest to the reference subject
    let script = format!(
        "if [ \"$1\" = 1 ]; then exec sleep 30; fi\nexec '{}' \"$1\"\n",
        subject_arg()
    );
    ctx.use_script_subject(&script);

    let output = ctx.run_excflow(&["verify", "--timeout", "1", "--json"]);
    assert_eq!(output.code, Some(1), "stderr: {}", output.stderr);

    let report = output.json();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcomes[1]["verdict"], "timed_out");
    assert_eq!(outcomes[1]["limit_ms"], 1000);
    for i in [0, 2, 3, 4] {
        assert_eq!(outcomes[i]["verdict"], "passed", "scenario {i}");
    }
}

#[test]
fn test_subject_in_working_directory_by_bare_name() {
    let ctx = TestContext::new();
    let work_dir = ctx.path("work");
    fs::create_dir_all(&work_dir).unwrap();
    fs::copy(subject_bin(), work_dir.join("test_exception")).unwrap();

    let output = ctx.run_excflow_in(&work_dir, &["verify", "test_exception", "--json"]);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);

    let report = output.json();
    assert_eq!(report["subject"], "./test_exception");
    for outcome in report["outcomes"].as_array().unwrap() {
        assert_eq!(outcome["verdict"], "passed");
    }
}

#[test]
fn test_exit_code_and_stderr_do_not_affect_verdict() {
    let ctx = TestContext::new();
    ctx.use_script_subject(&format!(
        "'{}' \"$1\"\necho 'subject complaining on stderr' >&2\nexit 7\n",
        subject_arg()
    ));

    let output = ctx.run_excflow(&["verify", "--json"]);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);

    let report = output.json();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 5);
    for outcome in outcomes {
        assert_eq!(outcome["verdict"], "passed");
        assert_eq!(outcome["exit_code"], 7);
    }
    assert!(!output.stderr.contains("subject complaining"));
}

#[test]
fn test_config_subject_is_used() {
    let ctx = TestContext::new();
    ctx.write_config(&format!("[subject]\npath = \"{}\"\n", subject_arg()));

    let output = ctx.run_excflow(&["verify", "--scenario", "3", "--scenario", "4"]);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout_text().contains("2/2 scenarios passed"));
}

// ============== Scenario table ==============

#[test]
fn test_show_prints_transcript_verbatim() {
    let ctx = TestContext::new();
    for (i, expected) in TRANSCRIPTS.iter().enumerate() {
        let output = ctx.run_excflow(&["show", &i.to_string()]);
        assert_eq!(output.code, Some(0));
        assert_eq!(output.stdout, expected.as_bytes(), "scenario {i}");
    }
}

#[test]
fn test_list_json() {
    let ctx = TestContext::new();
    let output = ctx.run_excflow(&["list", "--json"]);
    assert_eq!(output.code, Some(0));

    let scenarios = output.json();
    let scenarios = scenarios.as_array().unwrap();
    assert_eq!(scenarios.len(), 5);
    assert_eq!(scenarios[2]["name"], "try-except-finally");
    assert_eq!(scenarios[2]["expected"], TRANSCRIPTS[2]);
}

#[test]
fn test_custom_scenario_file() {
    let ctx = TestContext::new();
    let file = ctx.path("scenarios.yaml");
    fs::write(
        &file,
        "scenarios:\n\
         \x20 - name: first\n\
         \x20   expected: |\n\
         \x20     try\n\
         \x20     after try\n\
         \x20 - name: wrong\n\
         \x20   expected: |\n\
         \x20     nothing\n",
    )
    .unwrap();

    let output = ctx.run_excflow(&[
        "verify",
        subject_arg(),
        "--scenarios",
        file.to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(output.code, Some(1), "stderr: {}", output.stderr);

    let report = output.json();
    assert_eq!(report["outcomes"][0]["verdict"], "passed");
    assert_eq!(report["outcomes"][1]["verdict"], "mismatch");
}
