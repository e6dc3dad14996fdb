//! Enclosing training checkpoint record.

use serde::{Deserialize, Serialize};

use super::DecayCheckpoint;
use crate::decay::DecaySchedule;

/// Per-epoch training checkpoint carrying the decay schedule state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCheckpoint {
    /// Global training step.
    pub step: usize,
    /// Number of completed epochs.
    pub epoch: usize,
    /// Validation loss at save time, if evaluated.
    #[serde(default)]
    pub val_loss: Option<f64>,
    /// Lowest loss seen by the best-checkpoint policy up to this record.
    #[serde(default)]
    pub best_loss: Option<f64>,
    /// Pruning-rate schedule state.
    pub decay: DecayCheckpoint,
}

impl TrainingCheckpoint {
    /// Capture a checkpoint at `epoch` / `step`.
    pub fn new(epoch: usize, step: usize, schedule: &DecaySchedule) -> Self {
        Self { step, epoch, val_loss: None, best_loss: None, decay: DecayCheckpoint::capture(schedule) }
    }

    /// Attach the validation loss.
    pub fn with_val_loss(mut self, loss: f64) -> Self {
        self.val_loss = Some(loss);
        self
    }

    /// Attach the best loss tracked so far.
    pub fn with_best_loss(mut self, loss: f64) -> Self {
        self.best_loss = Some(loss);
        self
    }
}
