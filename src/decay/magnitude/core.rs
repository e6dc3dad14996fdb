//! Core magnitude-prune schedule implementation.

use crate::decay::{
    advance_index, validate_fraction, validate_t_max, DecayMode, PruneRateDecay,
};
use crate::error::{DecayError, Result};

/// Cumulative sparsity schedule (Zhu & Gupta, 2017).
///
/// `get_dr` returns `sparsity(t) - sparsity(t - interval)`: a sparsity
/// delta rather than an absolute rate, signalled by [`DecayMode::Cumulative`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudePruneDecay {
    initial_sparsity: f64,
    final_sparsity: f64,
    t_max: usize,
    t_start: usize,
    interval: usize,
    step_index: usize,
    current_prune_rate: f64,
}

impl Default for MagnitudePruneDecay {
    fn default() -> Self {
        Self {
            initial_sparsity: 0.0,
            final_sparsity: 0.3,
            t_max: 30_000,
            t_start: 350,
            interval: 100,
            step_index: 0,
            current_prune_rate: 0.0,
        }
    }
}

impl MagnitudePruneDecay {
    /// Registry name.
    pub const NAME: &'static str = "magnitude-prune";

    /// Create a magnitude-prune schedule.
    ///
    /// # Arguments
    /// * `initial_sparsity` - Sparsity held before `t_start`
    /// * `final_sparsity` - Sparsity reached at `t_max`
    /// * `t_max` - Step at which the ramp ends
    /// * `t_start` - Step at which the ramp begins
    /// * `interval` - Width of the finite difference
    pub fn new(
        initial_sparsity: f64,
        final_sparsity: f64,
        t_max: usize,
        t_start: usize,
        interval: usize,
    ) -> Result<Self> {
        validate_t_max(t_max)?;
        validate_fraction("initial_sparsity", initial_sparsity)?;
        validate_fraction("final_sparsity", final_sparsity)?;
        if t_start > t_max {
            return Err(DecayError::config(
                "T_start",
                format!("({t_start}) must not exceed T_max ({t_max})"),
                "Start the sparsity ramp before the schedule horizon",
            ));
        }
        if interval == 0 {
            return Err(DecayError::config(
                "interval",
                "must be greater than 0",
                "Set interval to the number of steps between mask updates",
            ));
        }

        let mut decay = Self {
            initial_sparsity,
            final_sparsity,
            t_max,
            t_start,
            interval,
            step_index: 0,
            current_prune_rate: 0.0,
        };
        decay.step(Some(0));
        Ok(decay)
    }

    /// Target sparsity at step `t`.
    pub fn cumulative_sparsity(&self, t: usize) -> f64 {
        if t < self.t_start {
            self.initial_sparsity
        } else if t < self.t_max {
            let progress = (t - self.t_start) as f64 / (self.t_max - self.t_start) as f64;
            let mul = (1.0 - progress).powi(3);
            self.final_sparsity + (self.initial_sparsity - self.final_sparsity) * mul
        } else {
            self.final_sparsity
        }
    }

    /// Target sparsity one interval before `t`. Arguments below zero fall on
    /// the initial plateau.
    pub fn sparsity_before(&self, t: usize) -> f64 {
        match t.checked_sub(self.interval) {
            Some(previous) => self.cumulative_sparsity(previous),
            None => self.initial_sparsity,
        }
    }

    /// Advance the schedule, optionally supplying `sparsity(t - interval)`.
    ///
    /// When `current_sparsity` is `None` the previous sparsity is computed
    /// from the ramp.
    pub fn step_with_sparsity(&mut self, step_index: Option<usize>, current_sparsity: Option<f64>) {
        self.step_index = advance_index(self.step_index, step_index, self.t_max);
        let t = self.step_index;
        let previous = current_sparsity.unwrap_or_else(|| self.sparsity_before(t));
        self.current_prune_rate = self.cumulative_sparsity(t) - previous;
    }

    /// Sparsity held before the ramp.
    pub fn initial_sparsity(&self) -> f64 {
        self.initial_sparsity
    }

    /// Sparsity reached at the horizon.
    pub fn final_sparsity(&self) -> f64 {
        self.final_sparsity
    }

    /// Step at which the ramp begins.
    pub fn t_start(&self) -> usize {
        self.t_start
    }

    /// Width of the finite difference.
    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl PruneRateDecay for MagnitudePruneDecay {
    fn step(&mut self, step_index: Option<usize>) {
        self.step_with_sparsity(step_index, None);
    }

    fn get_dr(&self) -> f64 {
        self.current_prune_rate
    }

    fn mode(&self) -> DecayMode {
        DecayMode::Cumulative
    }

    fn step_index(&self) -> usize {
        self.step_index
    }

    fn t_max(&self) -> usize {
        self.t_max
    }
}
