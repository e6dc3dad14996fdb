//! Pruning-rate decay callback
//!
//! Steps a `DecaySchedule` at every pruning event and forwards the resulting
//! amount to a `MaskUpdater`. At epoch boundaries the schedule state is
//! written through a `CheckpointStore` when one is configured.

use tracing::{debug, error, info, warn};

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};
use crate::checkpoint::TrainingCheckpoint;
use crate::config::{DecayRunConfig, StepClock};
use crate::decay::{DecaySchedule, PruneAmount, PruneRateDecay};
use crate::train::mask::MaskUpdater;
use crate::Result;

/// Callback driving a pruning-rate schedule from the training loop.
///
/// # Example
///
/// ```
/// use sparse_decay::config::{DecayConfig, DecayRunConfig, PruneEventConfig};
/// use sparse_decay::train::{CallbackManager, DecayCallback, SparsityTracker, StepDriver};
///
/// let config = DecayRunConfig::new(DecayConfig::default())
///     .with_events(PruneEventConfig::every(10));
/// let mut callback = DecayCallback::new(config, SparsityTracker::default()).unwrap();
///
/// {
///     let mut callbacks = CallbackManager::new();
///     callbacks.add(&mut callback);
///     StepDriver::new(50).run(&mut callbacks, 2, |_| 1.0);
/// }
///
/// assert_eq!(callback.events_fired(), 10);
/// ```
#[derive(Debug)]
pub struct DecayCallback<M: MaskUpdater> {
    config: DecayRunConfig,
    schedule: DecaySchedule,
    updater: M,
    enabled: bool,
    events_fired: usize,
    last_event_step: Option<usize>,
    last_amount: Option<PruneAmount>,
    best_loss: f64,
    last_saved_epoch: Option<usize>,
}

impl<M: MaskUpdater> DecayCallback<M> {
    /// Build the schedule named by `config` and start from step 0.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is invalid.
    pub fn new(config: DecayRunConfig, updater: M) -> Result<Self> {
        config.validate()?;
        let schedule = config.decay.build()?;
        Ok(Self::with_schedule(config, schedule, updater))
    }

    /// Continue from a saved checkpoint.
    ///
    /// The checkpoint must have been written for the same schedule and
    /// parameters as `config.decay`.
    pub fn resume(config: DecayRunConfig, updater: M, checkpoint: &TrainingCheckpoint) -> Result<Self> {
        config.validate()?;
        let schedule = checkpoint.decay.restore_into(&config.decay)?;
        info!(
            schedule = schedule.name(),
            epoch = checkpoint.epoch,
            step_index = schedule.step_index(),
            rate = schedule.get_dr(),
            "resumed decay schedule"
        );
        let mut callback = Self::with_schedule(config, schedule, updater);
        if let Some(loss) = checkpoint.best_loss.or(checkpoint.val_loss) {
            callback.best_loss = loss;
        }
        callback.last_saved_epoch = Some(checkpoint.epoch);
        Ok(callback)
    }

    /// Resume from the latest checkpoint in the configured store, or start
    /// fresh when there is none. Returns the checkpoint used, if any.
    pub fn resume_latest(
        config: DecayRunConfig,
        updater: M,
    ) -> Result<(Self, Option<TrainingCheckpoint>)> {
        let latest = match &config.checkpoint {
            Some(ckpt) => ckpt.store().load_latest()?,
            None => {
                warn!("no checkpoint directory configured, starting fresh");
                None
            }
        };
        match latest {
            Some(checkpoint) => {
                let callback = Self::resume(config, updater, &checkpoint)?;
                Ok((callback, Some(checkpoint)))
            }
            None => Ok((Self::new(config, updater)?, None)),
        }
    }

    fn with_schedule(config: DecayRunConfig, schedule: DecaySchedule, updater: M) -> Self {
        Self {
            config,
            schedule,
            updater,
            enabled: true,
            events_fired: 0,
            last_event_step: None,
            last_amount: None,
            best_loss: f64::INFINITY,
            last_saved_epoch: None,
        }
    }

    /// Enable or disable the callback.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the callback is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The schedule being driven.
    pub fn schedule(&self) -> &DecaySchedule {
        &self.schedule
    }

    /// The mask updater receiving the amounts.
    pub fn updater(&self) -> &M {
        &self.updater
    }

    /// Consume the callback, returning the mask updater.
    pub fn into_updater(self) -> M {
        self.updater
    }

    /// Get the configuration.
    pub fn config(&self) -> &DecayRunConfig {
        &self.config
    }

    /// Pruning events handled in this session.
    pub fn events_fired(&self) -> usize {
        self.events_fired
    }

    /// Global step of the most recent pruning event.
    pub fn last_event_step(&self) -> Option<usize> {
        self.last_event_step
    }

    /// Amount forwarded at the most recent pruning event.
    pub fn last_amount(&self) -> Option<PruneAmount> {
        self.last_amount
    }

    /// Epoch of the most recent checkpoint written or resumed from.
    pub fn last_saved_epoch(&self) -> Option<usize> {
        self.last_saved_epoch
    }

    /// Snapshot the schedule for a checkpoint at `epoch` / `step`.
    pub fn checkpoint(&self, epoch: usize, step: usize) -> TrainingCheckpoint {
        TrainingCheckpoint::new(epoch, step, &self.schedule)
    }

    fn advance(&mut self, global_step: usize) -> PruneAmount {
        let was_saturated = self.schedule.is_saturated();
        match self.config.events.clock {
            StepClock::Events => self.schedule.step(None),
            StepClock::GlobalStep => self.schedule.step(Some(global_step)),
        }
        if !was_saturated && self.schedule.is_saturated() {
            info!(
                schedule = self.schedule.name(),
                step = global_step,
                rate = self.schedule.get_dr(),
                "decay schedule reached its horizon"
            );
        }
        self.schedule.prune_amount()
    }

    fn save(&mut self, ctx: &CallbackContext) -> Result<()> {
        let Some(ckpt) = &self.config.checkpoint else {
            return Ok(());
        };

        let epoch = ctx.epoch + 1;
        let loss = f64::from(ctx.val_loss.unwrap_or(ctx.loss));
        let is_best = ckpt.save_best && loss < self.best_loss;
        if !is_best && !ckpt.is_periodic(epoch) {
            return Ok(());
        }
        if is_best {
            self.best_loss = loss;
        }

        let mut record = self.checkpoint(epoch, ctx.global_step);
        if let Some(val) = ctx.val_loss {
            record = record.with_val_loss(f64::from(val));
        }
        if self.best_loss.is_finite() {
            record = record.with_best_loss(self.best_loss);
        }
        ckpt.store().save(&record, is_best)?;
        self.last_saved_epoch = Some(epoch);
        Ok(())
    }
}

impl<M: MaskUpdater> TrainerCallback for DecayCallback<M> {
    fn on_train_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if let Err(e) = self.config.validate() {
            error!("invalid decay configuration: {e}");
            return CallbackAction::Stop;
        }
        info!(
            schedule = self.schedule.name(),
            mode = self.schedule.mode().as_str(),
            step_index = self.schedule.step_index(),
            t_max = self.schedule.t_max(),
            rate = self.schedule.get_dr(),
            global_step = ctx.global_step,
            "decay schedule ready"
        );
        CallbackAction::Continue
    }

    fn on_step_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if !self.enabled {
            return CallbackAction::Continue;
        }
        let step = ctx.global_step;
        if !self.config.events.is_event(step) {
            return CallbackAction::Continue;
        }

        let amount = self.advance(step);
        self.updater.update_mask(amount, step);
        self.events_fired += 1;
        self.last_event_step = Some(step);
        self.last_amount = Some(amount);
        debug!(
            step,
            step_index = self.schedule.step_index(),
            mode = amount.mode().as_str(),
            amount = amount.value(),
            "pruning event"
        );
        CallbackAction::Continue
    }

    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        match self.save(ctx) {
            Ok(()) => CallbackAction::Continue,
            Err(e) => {
                error!(epoch = ctx.epoch, "failed to write checkpoint: {e}");
                CallbackAction::Stop
            }
        }
    }

    fn on_train_end(&mut self, ctx: &CallbackContext) {
        info!(
            schedule = self.schedule.name(),
            events = self.events_fired,
            step_index = self.schedule.step_index(),
            rate = self.schedule.get_dr(),
            global_step = ctx.global_step,
            "decay schedule finished"
        );
    }

    fn name(&self) -> &'static str {
        "DecayCallback"
    }
}
