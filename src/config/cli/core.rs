//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Pruning-rate decay schedules for sparse training
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "sparse-decay")]
#[command(version)]
#[command(about = "Inspect, validate and resume pruning-rate decay schedules")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the rate curve of a configured schedule
    Curve(CurveArgs),

    /// Validate a configuration file and report the schedule it builds
    Validate(ValidateArgs),

    /// Restore the schedule from the latest checkpoint and report it
    Resume(ResumeArgs),

    /// Drive the schedule through a model-free training loop
    Simulate(SimulateArgs),
}

/// Arguments for the curve command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CurveArgs {
    /// Path to YAML or JSON configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Sample every N schedule steps (defaults to the event frequency)
    #[arg(long, value_name = "N")]
    pub every: Option<usize>,

    /// Last step to sample (defaults to T_max)
    #[arg(long, value_name = "T")]
    pub until: Option<usize>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML or JSON configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the resume command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ResumeArgs {
    /// Path to YAML or JSON configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Directory holding `epoch_{E}` checkpoints
    #[arg(value_name = "CHECKPOINT_DIR")]
    pub checkpoint_dir: PathBuf,

    /// Restore from the best checkpoint instead of the latest
    #[arg(long)]
    pub best: bool,
}

/// Arguments for the simulate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    /// Path to YAML or JSON configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Number of epochs to run
    #[arg(short, long, default_value_t = 1)]
    pub epochs: usize,

    /// Steps per epoch
    #[arg(short, long, default_value_t = 1000)]
    pub steps_per_epoch: usize,

    /// Continue from the latest checkpoint in the configured directory
    #[arg(short, long)]
    pub resume: bool,

    /// Override the checkpoint directory
    #[arg(long, value_name = "DIR")]
    pub checkpoint_dir: Option<PathBuf>,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
