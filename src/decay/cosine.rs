//! Cosine annealing decay schedule

use std::f64::consts::PI;

use super::{advance_index, validate_finite, validate_t_max, DecayMode, PruneRateDecay};
use crate::error::{DecayError, Result};

/// Cosine annealing of the pruning rate.
///
/// Formula: rate_t = eta_min + 0.5 * (prune_rate - eta_min) * (1 + cos(pi * t / T_max))
///
/// Single decay with no warm restarts: once `t` reaches `T_max` the rate
/// stays at `eta_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosineDecay {
    prune_rate: f64,
    eta_min: f64,
    t_max: usize,
    last_epoch: i64,
    step_index: usize,
    current_prune_rate: f64,
}

impl CosineDecay {
    /// Registry name.
    pub const NAME: &'static str = "cosine";

    /// Create a fresh cosine schedule.
    ///
    /// # Arguments
    /// * `prune_rate` - Initial (maximum) pruning rate
    /// * `t_max` - Number of steps until the floor is reached
    /// * `eta_min` - Floor rate
    pub fn new(prune_rate: f64, t_max: usize, eta_min: f64) -> Result<Self> {
        Self::with_last_epoch(prune_rate, t_max, eta_min, -1)
    }

    /// Create a schedule positioned after `last_epoch`.
    ///
    /// `-1` means a fresh schedule; `k >= 0` starts at step `k + 1`.
    pub fn with_last_epoch(
        prune_rate: f64,
        t_max: usize,
        eta_min: f64,
        last_epoch: i64,
    ) -> Result<Self> {
        validate_t_max(t_max)?;
        validate_finite("prune_rate", prune_rate)?;
        validate_finite("eta_min", eta_min)?;
        if last_epoch < -1 {
            return Err(DecayError::config(
                "last_epoch",
                format!("must be -1 or a completed epoch index, got {last_epoch}"),
                "Use -1 to start a fresh schedule",
            ));
        }

        let mut decay = Self {
            prune_rate,
            eta_min,
            t_max,
            last_epoch,
            step_index: 0,
            current_prune_rate: prune_rate,
        };
        let start = usize::try_from(last_epoch.saturating_add(1)).unwrap_or(usize::MAX);
        decay.step(Some(start));
        Ok(decay)
    }

    /// Closed-form rate at step `t`.
    pub fn rate_at(&self, t: usize) -> f64 {
        if t >= self.t_max {
            return self.eta_min;
        }
        let progress = t as f64 / self.t_max as f64;
        let cosine_decay = 0.5 * (1.0 + (PI * progress).cos());
        self.eta_min + (self.prune_rate - self.eta_min) * cosine_decay
    }

    /// Initial pruning rate.
    pub fn prune_rate(&self) -> f64 {
        self.prune_rate
    }

    /// Floor rate.
    pub fn eta_min(&self) -> f64 {
        self.eta_min
    }

    /// The epoch this schedule was constructed after.
    pub fn last_epoch(&self) -> i64 {
        self.last_epoch
    }
}

impl PruneRateDecay for CosineDecay {
    fn step(&mut self, step_index: Option<usize>) {
        self.step_index = advance_index(self.step_index, step_index, self.t_max);
        self.current_prune_rate = self.rate_at(self.step_index);
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
