//! Mask-update collaborators fed by the decay callback.

use crate::decay::PruneAmount;

/// Receives the pruning amount at each pruning event.
///
/// `PruneAmount::Rate` asks for a prune-and-regrow pass removing that
/// fraction of the currently active weights. `PruneAmount::SparsityDelta`
/// asks for that many additional parameters (as a fraction of the total) to
/// be pruned.
pub trait MaskUpdater: Send {
    /// Apply `amount` at global step `step`.
    fn update_mask(&mut self, amount: PruneAmount, step: usize);
}

impl<F> MaskUpdater for F
where
    F: FnMut(PruneAmount, usize) + Send,
{
    fn update_mask(&mut self, amount: PruneAmount, step: usize) {
        self(amount, step);
    }
}

/// Bookkeeping mask updater that tracks overall sparsity.
///
/// Rate updates prune and regrow the same number of weights, so they leave
/// sparsity unchanged and only add to the turnover. Sparsity deltas
/// accumulate, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SparsityTracker {
    sparsity: f64,
    turnover: f64,
    updates: usize,
    last_step: Option<usize>,
}

impl SparsityTracker {
    /// Start from an already sparse model.
    pub fn with_sparsity(sparsity: f64) -> Self {
        Self { sparsity: sparsity.clamp(0.0, 1.0), ..Self::default() }
    }

    /// Fraction of parameters currently pruned.
    pub fn sparsity(&self) -> f64 {
        self.sparsity
    }

    /// Sum of the prune-and-regrow rates applied.
    pub fn turnover(&self) -> f64 {
        self.turnover
    }

    /// Number of mask updates applied.
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Global step of the last update.
    pub fn last_step(&self) -> Option<usize> {
        self.last_step
    }
}

impl MaskUpdater for SparsityTracker {
    fn update_mask(&mut self, amount: PruneAmount, step: usize) {
        match amount {
            PruneAmount::Rate(rate) => self.turnover += rate,
            PruneAmount::SparsityDelta(delta) => {
                self.sparsity = (self.sparsity + delta).clamp(0.0, 1.0);
            }
        }
        self.updates += 1;
        self.last_step = Some(step);
    }
}
