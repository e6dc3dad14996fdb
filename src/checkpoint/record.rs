//! Serialized schedule state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DecayConfig, DecayParams};
use crate::decay::{DecayMode, DecaySchedule, PruneRateDecay, ScheduleRegistry};
use crate::error::{DecayError, Result};

/// Variant-specific hyperparameters of a checkpointed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum VariantState {
    /// Cosine annealing.
    Cosine { prune_rate: f64, eta_min: f64, last_epoch: i64 },
    /// Linear annealing.
    Linear { prune_rate: f64 },
    /// Cumulative cubic sparsity ramp.
    MagnitudePrune {
        initial_sparsity: f64,
        final_sparsity: f64,
        #[serde(rename = "T_start")]
        t_start: usize,
        interval: usize,
    },
}

impl VariantState {
    /// Hyperparameters of `schedule`.
    pub fn of(schedule: &DecaySchedule) -> Self {
        match schedule {
            DecaySchedule::Cosine(decay) => VariantState::Cosine {
                prune_rate: decay.prune_rate(),
                eta_min: decay.eta_min(),
                last_epoch: decay.last_epoch(),
            },
            DecaySchedule::Linear(decay) => VariantState::Linear { prune_rate: decay.prune_rate() },
            DecaySchedule::MagnitudePrune(decay) => VariantState::MagnitudePrune {
                initial_sparsity: decay.initial_sparsity(),
                final_sparsity: decay.final_sparsity(),
                t_start: decay.t_start(),
                interval: decay.interval(),
            },
        }
    }

    /// Registry name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            VariantState::Cosine { .. } => "cosine",
            VariantState::Linear { .. } => "linear",
            VariantState::MagnitudePrune { .. } => "magnitude-prune",
        }
    }

    fn to_params(self, t_max: usize) -> Result<DecayParams> {
        let t_max = i64::try_from(t_max)
            .map_err(|_| DecayError::config("T_max", "does not fit in a step counter", "Check the checkpoint"))?;
        let params = DecayParams::new().with_t_max(t_max);
        Ok(match self {
            VariantState::Cosine { prune_rate, eta_min, last_epoch } => params
                .with_prune_rate(prune_rate)
                .with_eta_min(eta_min)
                .with_last_epoch(last_epoch),
            VariantState::Linear { prune_rate } => params.with_prune_rate(prune_rate),
            VariantState::MagnitudePrune { initial_sparsity, final_sparsity, t_start, interval } => {
                let t_start = i64::try_from(t_start).map_err(|_| {
                    DecayError::config("T_start", "does not fit in a step counter", "Check the checkpoint")
                })?;
                let interval = i64::try_from(interval).map_err(|_| {
                    DecayError::config("interval", "does not fit in a step counter", "Check the checkpoint")
                })?;
                params
                    .with_initial_sparsity(initial_sparsity)
                    .with_final_sparsity(final_sparsity)
                    .with_t_start(t_start)
                    .with_interval(interval)
            }
        })
    }
}

/// Schedule state embedded in a training checkpoint.
///
/// # Example
///
/// ```
/// use sparse_decay::checkpoint::DecayCheckpoint;
/// use sparse_decay::decay::{DecaySchedule, LinearDecay, PruneRateDecay};
///
/// let mut schedule = DecaySchedule::from(LinearDecay::new(0.3, 1000).unwrap());
/// for _ in 0..250 {
///     schedule.step(None);
/// }
///
/// let record = DecayCheckpoint::capture(&schedule);
/// let restored = record.restore().unwrap();
/// assert_eq!(restored.get_dr(), schedule.get_dr());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayCheckpoint {
    /// Schedule steps consumed when the checkpoint was taken.
    pub step_index: usize,
    /// Schedule horizon.
    #[serde(rename = "T_max")]
    pub t_max: usize,
    /// Interpretation of the rate.
    pub mode: DecayMode,
    /// Variant name and hyperparameters.
    #[serde(flatten)]
    pub variant: VariantState,
}

impl DecayCheckpoint {
    /// Record the state of `schedule`.
    pub fn capture(schedule: &DecaySchedule) -> Self {
        Self {
            step_index: schedule.step_index(),
            t_max: schedule.t_max(),
            mode: schedule.mode(),
            variant: VariantState::of(schedule),
        }
    }

    /// Configuration that rebuilds the checkpointed schedule from scratch.
    pub fn to_config(&self) -> Result<DecayConfig> {
        Ok(DecayConfig::new(self.variant.name()).with_params(self.variant.to_params(self.t_max)?))
    }

    /// Rebuild the schedule from the recorded hyperparameters and seek it to
    /// the recorded step.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the record is internally
    /// inconsistent (mode does not match the variant, counter past the
    /// horizon) or its hyperparameters are invalid.
    pub fn restore(&self) -> Result<DecaySchedule> {
        let config = self.to_config()?;
        let schedule = ScheduleRegistry::build(&config.name, &config.params)?;
        self.fast_forward(schedule)
    }

    /// Rebuild the schedule from the run's own configuration and seek it to
    /// the recorded step.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the checkpoint was written by a
    /// schedule with a different variant, horizon, mode or hyperparameters.
    pub fn restore_into(&self, config: &DecayConfig) -> Result<DecaySchedule> {
        let schedule = config.build()?;
        let configured = VariantState::of(&schedule);
        if configured != self.variant {
            return Err(DecayError::config(
                "checkpoint",
                format!(
                    "checkpoint holds {:?} but the configuration builds {:?}",
                    self.variant, configured
                ),
                "Resume with the configuration the checkpoint was written with",
            ));
        }
        self.fast_forward(schedule)
    }

    fn fast_forward(&self, mut schedule: DecaySchedule) -> Result<DecaySchedule> {
        if schedule.t_max() != self.t_max {
            return Err(DecayError::config(
                "T_max",
                format!("checkpoint has {} but the schedule has {}", self.t_max, schedule.t_max()),
                "Resume with the configuration the checkpoint was written with",
            ));
        }
        if schedule.mode() != self.mode {
            return Err(DecayError::config(
                "mode",
                format!(
                    "checkpoint has '{}' but {} schedules are '{}'",
                    self.mode.as_str(),
                    schedule.name(),
                    schedule.mode().as_str()
                ),
                "The checkpoint record is corrupt",
            ));
        }
        if self.step_index > self.t_max {
            return Err(DecayError::config(
                "step_index",
                format!("({}) exceeds T_max ({})", self.step_index, self.t_max),
                "The checkpoint record is corrupt",
            ));
        }

        schedule.step(Some(self.step_index));
        debug!(
            schedule = schedule.name(),
            step_index = self.step_index,
            rate = schedule.get_dr(),
            "fast-forwarded decay schedule"
        );
        Ok(schedule)
    }
}
