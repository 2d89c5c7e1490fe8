//! excflow - verify try/except/finally control-flow transcripts
//!
//! Runs a subject program once per scenario index and compares its stdout,
//! byte for byte, with the expected transcript for that scenario.

use std::process::ExitCode;

use clap::Parser;
use excflow::{cli, commands, common};
use commands::Commands;

#[derive(Parser)]
#[command(name = "excflow", about = "Verify exception-handling control-flow transcripts")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    common::logging::init_cli(cli.command.verbose());

    match cli::dispatch(cli.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
