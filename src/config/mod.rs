//! Decay configuration module
//!
//! Provides the configuration surface consumed by the schedules:
//! the selected schedule with its hyperparameters, when pruning events
//! fire, and where checkpoints are written.

mod cli;
mod decay_config;
mod events;
mod loader;
pub(crate) mod params;


pub use cli::{
    parse_args, Cli, Command, CurveArgs, OutputFormat, ResumeArgs, SimulateArgs, ValidateArgs,
};
pub use decay_config::DecayConfig;
pub use events::{PruneEventConfig, StepClock};
pub use loader::{load_config, CheckpointConfig, DecayRunConfig};
pub use params::DecayParams;
