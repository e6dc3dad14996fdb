//! Pruning-rate decay schedules
//!
//! Controls how much of the network is pruned (and regrown) at each mask
//! update during dynamic sparse training:
//! - `CosineDecay`: cosine annealing from an initial rate to a floor
//! - `LinearDecay`: constant decrement down to zero
//! - `MagnitudePruneDecay`: finite difference of a cubic sparsity ramp
//!   (Zhu & Gupta, 2017)
//!
//! All variants share the [`PruneRateDecay`] contract and are wrapped by the
//! closed [`DecaySchedule`] sum type that the registry, the checkpoint bridge
//! and the training callback work with.
//!
//! # Example
//!
//! ```
//! use sparse_decay::decay::{LinearDecay, PruneRateDecay};
//!
//! let mut decay = LinearDecay::new(0.3, 1000).unwrap();
//! decay.step(Some(500));
//! assert!((decay.get_dr() - 0.15).abs() < 1e-9);
//! ```
//!
//! # References
//! - Loshchilov, I., & Hutter, F. (2017). SGDR: Stochastic gradient descent
//!   with warm restarts. ICLR.
//! - Zhu, M., & Gupta, S. (2017). To prune, or not to prune: exploring the
//!   efficacy of pruning for model compression. arXiv:1710.01878.

mod cosine;
mod linear;
mod magnitude;
mod registry;
mod types;

#[cfg(test)]
mod proptests;

pub use cosine::CosineDecay;
pub use linear::LinearDecay;
pub use magnitude::MagnitudePruneDecay;
pub use registry::{ScheduleConstructor, ScheduleRegistry};
pub use types::{DecayMode, DecaySchedule, PruneAmount};

use crate::error::{DecayError, Result};

/// Common contract of every pruning-rate decay schedule.
///
/// The training loop calls [`step`](PruneRateDecay::step) once per pruning
/// event and then reads [`get_dr`](PruneRateDecay::get_dr).
pub trait PruneRateDecay {
    /// Advance the schedule.
    ///
    /// `None` advances by one from the internal counter. `Some(k)` positions
    /// the schedule exactly where `k` consecutive steps from a fresh instance
    /// would leave it. Either way the counter saturates at `t_max`.
    fn step(&mut self, step_index: Option<usize>);

    /// Current pruning rate. Pure read of the cached value.
    fn get_dr(&self) -> f64;

    /// How consumers must interpret [`get_dr`](PruneRateDecay::get_dr).
    fn mode(&self) -> DecayMode;

    /// Number of schedule steps consumed so far.
    fn step_index(&self) -> usize;

    /// Schedule horizon.
    fn t_max(&self) -> usize;

    /// Whether the counter has reached the horizon.
    fn is_saturated(&self) -> bool {
        self.step_index() >= self.t_max()
    }
}

/// Resolve the counter after a `step` call, saturating at `t_max`.
pub(crate) fn advance_index(current: usize, requested: Option<usize>, t_max: usize) -> usize {
    match requested {
        Some(index) => index.min(t_max),
        None => current.saturating_add(1).min(t_max),
    }
}

pub(crate) fn validate_t_max(t_max: usize) -> Result<()> {
    if t_max == 0 {
        return Err(DecayError::config(
            "T_max",
            "must be greater than 0",
            "Set T_max to the number of scheduled pruning steps",
        ));
    }
    Ok(())
}

pub(crate) fn validate_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DecayError::config(
            field,
            format!("must be a finite number, got {value}"),
            "Use a plain decimal value",
        ));
    }
    Ok(())
}

pub(crate) fn validate_fraction(field: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DecayError::config(
            field,
            format!("must be between 0.0 and 1.0, got {value}"),
            "Sparsity is the fraction of weights pruned",
        ));
    }
    Ok(())
}
