//! CLI command definitions
//!
//! Defines the clap commands for the excflow CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the subject once per scenario and compare its stdout
    Verify {
        /// Subject executable (default: [subject] path from config, then excflow-subject)
        subject: Option<PathBuf>,

        /// Only run this scenario index; can be given multiple times
        #[arg(long = "scenario", short = 's')]
        scenarios: Vec<usize>,

        /// Load the scenario table from a YAML file instead of the built-in one
        #[arg(long = "scenarios", value_name = "FILE")]
        scenario_file: Option<PathBuf>,

        /// Invoke each scenario this many times; every run must match
        #[arg(long, default_value_t = 1)]
        repeat: u32,

        /// Kill the subject after this many seconds (default: wait forever)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output (timings, exit codes, subject stderr)
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the scenarios in the table
    #[command(alias = "ls")]
    List {
        /// Load the scenario table from a YAML file instead of the built-in one
        #[arg(long = "scenarios", value_name = "FILE")]
        scenario_file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the expected transcript for one scenario, byte for byte
    Show {
        /// Scenario index
        index: usize,

        /// Load the scenario table from a YAML file instead of the built-in one
        #[arg(long = "scenarios", value_name = "FILE")]
        scenario_file: Option<PathBuf>,
    },
}

impl Commands {
    /// Whether debug logging was requested
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Verify { verbose: true, .. })
    }
}
