//! Linear decay schedule

use super::{advance_index, validate_finite, validate_t_max, DecayMode, PruneRateDecay};
use crate::error::Result;

/// Anneals the pruning rate linearly with each step.
///
/// Formula: rate_t = prune_rate - (prune_rate / T_max) * t
///
/// The rate is recomputed from the counter on every step, so seeking to an
/// index and stepping there one at a time produce identical values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDecay {
    initial_prune_rate: f64,
    decrement: f64,
    t_max: usize,
    step_index: usize,
    current_prune_rate: f64,
}

impl LinearDecay {
    /// Registry name.
    pub const NAME: &'static str = "linear";

    /// Create a linear schedule decaying `prune_rate` to zero over `t_max` steps.
    pub fn new(prune_rate: f64, t_max: usize) -> Result<Self> {
        validate_t_max(t_max)?;
        validate_finite("prune_rate", prune_rate)?;
        Ok(Self {
            initial_prune_rate: prune_rate,
            decrement: prune_rate / t_max as f64,
            t_max,
            step_index: 0,
            current_prune_rate: prune_rate,
        })
    }

    /// Initial pruning rate.
    pub fn prune_rate(&self) -> f64 {
        self.initial_prune_rate
    }

    /// Amount subtracted per step.
    pub fn decrement(&self) -> f64 {
        self.decrement
    }
}

impl PruneRateDecay for LinearDecay {
    fn step(&mut self, step_index: Option<usize>) {
        self.step_index = advance_index(self.step_index, step_index, self.t_max);
        self.current_prune_rate =
            self.initial_prune_rate - self.decrement * self.step_index as f64;
    }

    fn get_dr(&self) -> f64 {
        self.current_prune_rate
    }

    fn mode(&self) -> DecayMode {
        DecayMode::Current
    }

    fn step_index(&self) -> usize {
        self.step_index
    }

    fn t_max(&self) -> usize {
        self.t_max
    }
}
