//! Minimal epoch/step loop dispatching callback events.

use tracing::{debug, info};

use super::callback::{CallbackAction, CallbackContext, CallbackManager};

/// Outcome of a `StepDriver` run
#[derive(Debug, Clone, PartialEq)]
pub struct DriveResult {
    /// Epoch the run ended on (exclusive upper bound when it ran to the end)
    pub final_epoch: usize,
    /// Total steps completed, counting steps before a resume point
    pub global_steps: usize,
    /// Mean loss of the last completed epoch
    pub final_loss: f32,
    /// Whether a callback stopped the run
    pub stopped_early: bool,
}

/// Epoch/step loop without a model attached.
///
/// Each step calls a loss function with the global step index and fires the
/// callbacks. Forward and backward passes belong to the loss function.
#[derive(Debug, Clone, Copy)]
pub struct StepDriver {
    steps_per_epoch: usize,
    start_epoch: usize,
}

impl StepDriver {
    /// Create a driver running `steps_per_epoch` steps per epoch
    pub fn new(steps_per_epoch: usize) -> Self {
        Self { steps_per_epoch, start_epoch: 0 }
    }

    /// Start at `epoch` (0-indexed) as if the earlier epochs had run
    pub fn resume_from(mut self, epoch: usize) -> Self {
        self.start_epoch = epoch;
        self
    }

    /// Steps per epoch
    pub fn steps_per_epoch(&self) -> usize {
        self.steps_per_epoch
    }

    /// First epoch the run executes
    pub fn start_epoch(&self) -> usize {
        self.start_epoch
    }

    /// Run until `max_epochs` or until a callback stops training
    pub fn run<L>(&self, callbacks: &mut CallbackManager<'_>, max_epochs: usize, mut loss_fn: L) -> DriveResult
    where
        L: FnMut(usize) -> f32,
    {
        let mut ctx = CallbackContext {
            epoch: self.start_epoch,
            max_epochs,
            steps_per_epoch: self.steps_per_epoch,
            global_step: self.start_epoch * self.steps_per_epoch,
            ..Default::default()
        };
        let mut final_loss = 0.0;
        let mut stopped_early = false;

        info!(start_epoch = self.start_epoch, max_epochs, steps_per_epoch = self.steps_per_epoch, "starting run");

        if callbacks.on_train_begin(&ctx) == CallbackAction::Stop {
            callbacks.on_train_end(&ctx);
            return DriveResult { final_epoch: ctx.epoch, global_steps: ctx.global_step, final_loss, stopped_early: true };
        }

        'epochs: for epoch in self.start_epoch..max_epochs {
            ctx.epoch = epoch;
            ctx.step = 0;

            match callbacks.on_epoch_begin(&ctx) {
                CallbackAction::Stop => {
                    stopped_early = true;
                    break;
                }
                CallbackAction::SkipEpoch => {
                    ctx.global_step += self.steps_per_epoch;
                    continue;
                }
                CallbackAction::Continue => {}
            }

            let mut total_loss = 0.0;
            let mut steps = 0usize;
            for step in 0..self.steps_per_epoch {
                ctx.step = step;
                ctx.loss = loss_fn(ctx.global_step);
                total_loss += ctx.loss;
                steps += 1;

                let action = callbacks.on_step_end(&ctx);
                ctx.global_step += 1;
                match action {
                    CallbackAction::Stop => {
                        stopped_early = true;
                        break 'epochs;
                    }
                    CallbackAction::SkipEpoch => break,
                    CallbackAction::Continue => {}
                }
            }

            ctx.loss = if steps > 0 { total_loss / steps as f32 } else { 0.0 };
            final_loss = ctx.loss;
            debug!(epoch, loss = ctx.loss, global_step = ctx.global_step, "epoch finished");

            if callbacks.on_epoch_end(&ctx) == CallbackAction::Stop {
                stopped_early = true;
                ctx.epoch = epoch + 1;
                break;
            }
            ctx.epoch = epoch + 1;
        }

        callbacks.on_train_end(&ctx);
        DriveResult { final_epoch: ctx.epoch, global_steps: ctx.global_step, final_loss, stopped_early }
    }
}
