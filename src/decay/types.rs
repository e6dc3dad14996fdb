//! Shared types for decay schedules.

use serde::{Deserialize, Serialize};

use super::{CosineDecay, LinearDecay, MagnitudePruneDecay, PruneRateDecay};

/// Interpretation of the value returned by `get_dr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayMode {
    /// The value is the rate to apply at the next mask update.
    Current,
    /// The value is a sparsity delta: the change in target sparsity since
    /// the previous interval.
    Cumulative,
}

impl DecayMode {
    /// Get the display name for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecayMode::Current => "current",
            DecayMode::Cumulative => "cumulative",
        }
    }
}

/// A rate tagged with its interpretation, handed to the mask updater.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PruneAmount {
    /// Fraction of active weights to prune and regrow.
    Rate(f64),
    /// Increase in the target sparsity of the network.
    SparsityDelta(f64),
}

impl PruneAmount {
    /// The raw scalar, regardless of interpretation.
    pub fn value(&self) -> f64 {
        match self {
            PruneAmount::Rate(v) | PruneAmount::SparsityDelta(v) => *v,
        }
    }

    /// The mode this amount was produced under.
    pub fn mode(&self) -> DecayMode {
        match self {
            PruneAmount::Rate(_) => DecayMode::Current,
            PruneAmount::SparsityDelta(_) => DecayMode::Cumulative,
        }
    }
}

/// Closed set of decay schedules selectable from configuration.
///
/// # Example
///
/// ```
/// use sparse_decay::decay::{CosineDecay, DecaySchedule, PruneAmount, PruneRateDecay};
///
/// let mut schedule = DecaySchedule::from(CosineDecay::new(0.5, 100, 0.0).unwrap());
/// schedule.step(None);
/// match schedule.prune_amount() {
///     PruneAmount::Rate(rate) => assert!(rate < 0.5),
///     PruneAmount::SparsityDelta(_) => unreachable!("cosine is a current-mode schedule"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecaySchedule {
    /// Cosine annealing.
    Cosine(CosineDecay),
    /// Linear annealing.
    Linear(LinearDecay),
    /// Cumulative cubic sparsity ramp.
    MagnitudePrune(MagnitudePruneDecay),
}

impl DecaySchedule {
    /// Registry name of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            DecaySchedule::Cosine(_) => CosineDecay::NAME,
            DecaySchedule::Linear(_) => LinearDecay::NAME,
            DecaySchedule::MagnitudePrune(_) => MagnitudePruneDecay::NAME,
        }
    }

    /// Current rate tagged with its interpretation.
    pub fn prune_amount(&self) -> PruneAmount {
        let value = self.get_dr();
        match self.mode() {
            DecayMode::Current => PruneAmount::Rate(value),
            DecayMode::Cumulative => PruneAmount::SparsityDelta(value),
        }
    }

    /// Advance a magnitude-prune schedule with a caller-supplied
    /// `sparsity(t - interval)`. Other variants ignore the hint.
    pub fn step_with_sparsity(&mut self, step_index: Option<usize>, current_sparsity: Option<f64>) {
        match self {
            DecaySchedule::MagnitudePrune(decay) => {
                decay.step_with_sparsity(step_index, current_sparsity)
            }
            other => other.step(step_index),
        }
    }

    fn inner(&self) -> &dyn PruneRateDecay {
        match self {
            DecaySchedule::Cosine(decay) => decay,
            DecaySchedule::Linear(decay) => decay,
            DecaySchedule::MagnitudePrune(decay) => decay,
        }
    }
}

impl PruneRateDecay for DecaySchedule {
    fn step(&mut self, step_index: Option<usize>) {
        match self {
            DecaySchedule::Cosine(decay) => decay.step(step_index),
            DecaySchedule::Linear(decay) => decay.step(step_index),
            DecaySchedule::MagnitudePrune(decay) => decay.step(step_index),
        }
    }

    fn get_dr(&self) -> f64 {
        self.inner().get_dr()
    }

    fn mode(&self) -> DecayMode {
        self.inner().mode()
    }

    fn step_index(&self) -> usize {
        self.inner().step_index()
    }

    fn t_max(&self) -> usize {
        self.inner().t_max()
    }
}

impl From<CosineDecay> for DecaySchedule {
    fn from(decay: CosineDecay) -> Self {
        DecaySchedule::Cosine(decay)
    }
}

impl From<LinearDecay> for DecaySchedule {
    fn from(decay: LinearDecay) -> Self {
        DecaySchedule::Linear(decay)
    }
}

impl From<MagnitudePruneDecay> for DecaySchedule {
    fn from(decay: MagnitudePruneDecay) -> Self {
        DecaySchedule::MagnitudePrune(decay)
    }
}
