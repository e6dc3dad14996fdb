//! Sparse-Decay CLI
//!
//! # Usage
//!
//! ```bash
//! # Print the rate curve of a schedule
//! sparse-decay curve decay.yaml --every 100 --format json
//!
//! # Validate config
//! sparse-decay validate decay.yaml --detailed
//!
//! # Restore the schedule from the latest checkpoint
//! sparse-decay resume decay.yaml ./checkpoints
//!
//! # Drive the schedule through a model-free loop, then continue it
//! sparse-decay simulate decay.yaml --epochs 2
//! sparse-decay simulate decay.yaml --epochs 4 --resume
//! ```

use clap::Parser;
use sparse_decay::cli::{init_tracing, run_command, Cli, LogLevel};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.quiet, cli.verbose));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
