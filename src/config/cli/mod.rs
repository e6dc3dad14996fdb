//! CLI argument definitions
//!
//! Parsed with `clap` derive; handlers live in `crate::cli`.

mod core;
mod types;


pub use self::core::{parse_args, Cli, Command, CurveArgs, ResumeArgs, SimulateArgs, ValidateArgs};
pub use types::OutputFormat;
