//! Checkpoint bridge for decay schedules
//!
//! Persists the schedule state inside the enclosing training checkpoint and
//! restores it on resume:
//! - `DecayCheckpoint`: the schedule record (`step_index`, `T_max`, `mode`
//!   and the variant's hyperparameters)
//! - `TrainingCheckpoint`: the enclosing per-epoch record
//! - `CheckpointStore`: `epoch_{E}` / `best` files in a directory
//!
//! Restoring builds a fresh schedule from the recorded hyperparameters and
//! seeks it to the recorded step, which reproduces the saved rate exactly.

mod record;
mod store;
mod training;


pub use record::{DecayCheckpoint, VariantState};
pub use store::{CheckpointFormat, CheckpointStore};
pub use training::TrainingCheckpoint;
