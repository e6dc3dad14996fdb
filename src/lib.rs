//! Sparse-Decay: pruning-rate decay schedules for sparse training
//!
//! Schedules decide how aggressively a sparse-training mask update prunes
//! (and regrows) weights at each step:
//!
//! - [`decay`]: cosine, linear and cubic magnitude-prune schedules behind the
//!   [`decay::PruneRateDecay`] contract, plus a name-keyed registry
//! - [`config`]: YAML/JSON configuration and CLI argument definitions
//! - [`checkpoint`]: schedule state records that resume bit-for-bit
//! - [`train`]: callback adapter feeding rates to a mask updater
//! - [`cli`]: command handlers for the `sparse-decay` binary
//!
//! # Example
//!
//! ```
//! use sparse_decay::checkpoint::DecayCheckpoint;
//! use sparse_decay::config::DecayConfig;
//! use sparse_decay::decay::PruneRateDecay;
//!
//! let mut schedule = DecayConfig::default().build().unwrap();
//! schedule.step(Some(250));
//!
//! let restored = DecayCheckpoint::capture(&schedule).restore().unwrap();
//! assert_eq!(restored.get_dr().to_bits(), schedule.get_dr().to_bits());
//! ```

pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod decay;
pub mod error;
pub mod train;

pub use error::{DecayError, Result};
