//! CLI command implementations

mod curve;
mod resume;
mod simulate;
mod validate;

#[cfg(test)]
mod tests;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Curve(args) => curve::run_curve(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Resume(args) => resume::run_resume(args, log_level),
        Command::Simulate(args) => simulate::run_simulate(args, log_level),
    }
}
