//! When pruning events fire during training.

use serde::{Deserialize, Serialize};

use crate::error::{DecayError, Result};

/// Which counter drives the schedule on each pruning event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepClock {
    /// Advance the schedule by one per pruning event.
    #[default]
    Events,
    /// Seek the schedule to the global training step of the event.
    GlobalStep,
}

/// Window and frequency of pruning events.
///
/// Events fire at `start_step`, then every `frequency` steps up to and
/// including `end_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PruneEventConfig {
    /// First global step at which an event may fire.
    #[serde(default)]
    pub start_step: usize,
    /// Last global step at which an event may fire (`None` = unbounded).
    #[serde(default)]
    pub end_step: Option<usize>,
    /// Fire every N global steps.
    pub frequency: usize,
    /// Counter fed to the schedule.
    #[serde(default)]
    pub clock: StepClock,
}

impl Default for PruneEventConfig {
    fn default() -> Self {
        Self { start_step: 0, end_step: None, frequency: 100, clock: StepClock::Events }
    }
}

impl PruneEventConfig {
    /// Create an event configuration firing every `frequency` steps.
    pub fn every(frequency: usize) -> Self {
        Self { frequency, ..Self::default() }
    }

    /// Set the first step of the event window.
    pub fn with_start_step(mut self, step: usize) -> Self {
        self.start_step = step;
        self
    }

    /// Set the last step of the event window.
    pub fn with_end_step(mut self, step: usize) -> Self {
        self.end_step = Some(step);
        self
    }

    /// Set the counter fed to the schedule.
    pub fn with_clock(mut self, clock: StepClock) -> Self {
        self.clock = clock;
        self
    }

    /// Check if a pruning event fires at `step`.
    pub fn is_event(&self, step: usize) -> bool {
        if step < self.start_step {
            return false;
        }
        if self.end_step.is_some_and(|end| step > end) {
            return false;
        }
        if self.frequency == 0 {
            return step == self.start_step;
        }
        (step - self.start_step).is_multiple_of(self.frequency)
    }

    /// Validate the event window.
    pub fn validate(&self) -> Result<()> {
        if self.frequency == 0 {
            return Err(DecayError::config(
                "frequency",
                "must be greater than 0",
                "Set frequency to the number of steps between mask updates",
            ));
        }
        if let Some(end) = self.end_step {
            if end < self.start_step {
                return Err(DecayError::config(
                    "end_step",
                    format!("({end}) must not be before start_step ({})", self.start_step),
                    "Widen the pruning window",
                ));
            }
        }
        Ok(())
    }
}
