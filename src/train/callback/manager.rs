//! Callback manager for dispatching events to multiple callbacks

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Dispatches events to borrowed callbacks.
///
/// Callbacks stay owned by the caller so their state can be inspected after
/// the run.
#[derive(Default)]
pub struct CallbackManager<'a> {
    callbacks: Vec<&'a mut dyn TrainerCallback>,
}

impl<'a> CallbackManager<'a> {
    /// Create new callback manager
    pub fn new() -> Self {
        Self { callbacks: Vec::new() }
    }

    /// Add a callback
    pub fn add(&mut self, callback: &'a mut dyn TrainerCallback) {
        self.callbacks.push(callback);
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Get number of callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Names of the registered callbacks
    pub fn names(&self) -> Vec<&'static str> {
        self.callbacks.iter().map(|cb| cb.name()).collect()
    }

    /// Fire train begin event
    pub fn on_train_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        for cb in &mut self.callbacks {
            if cb.on_train_begin(ctx) == CallbackAction::Stop {
                return CallbackAction::Stop;
            }
        }
        CallbackAction::Continue
    }

    /// Fire train end event
    pub fn on_train_end(&mut self, ctx: &CallbackContext) {
        for cb in &mut self.callbacks {
            cb.on_train_end(ctx);
        }
    }

    /// Fire epoch begin event
    pub fn on_epoch_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        for cb in &mut self.callbacks {
            match cb.on_epoch_begin(ctx) {
                CallbackAction::Stop => return CallbackAction::Stop,
                CallbackAction::SkipEpoch => return CallbackAction::SkipEpoch,
                CallbackAction::Continue => {}
            }
        }
        CallbackAction::Continue
    }

    /// Fire epoch end event
    pub fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        for cb in &mut self.callbacks {
            if cb.on_epoch_end(ctx) == CallbackAction::Stop {
                return CallbackAction::Stop;
            }
        }
        CallbackAction::Continue
    }

    /// Fire step end event
    pub fn on_step_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        for cb in &mut self.callbacks {
            if cb.on_step_end(ctx) == CallbackAction::Stop {
                return CallbackAction::Stop;
            }
        }
        CallbackAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StopAtEpoch {
        epoch: usize,
        seen: usize,
    }

    impl TrainerCallback for StopAtEpoch {
        fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
            self.seen += 1;
            if ctx.epoch >= self.epoch {
                CallbackAction::Stop
            } else {
                CallbackAction::Continue
            }
        }

        fn name(&self) -> &'static str {
            "StopAtEpoch"
        }
    }

    #[test]
    fn test_callback_manager_dispatch() {
        let mut stopper = StopAtEpoch { epoch: 1, seen: 0 };
        {
            let mut manager = CallbackManager::new();
            manager.add(&mut stopper);
            assert_eq!(manager.len(), 1);
            assert_eq!(manager.names(), vec!["StopAtEpoch"]);

            let mut ctx = CallbackContext::default();
            assert_eq!(manager.on_epoch_end(&ctx), CallbackAction::Continue);
            ctx.epoch = 1;
            assert_eq!(manager.on_epoch_end(&ctx), CallbackAction::Stop);
        }
        assert_eq!(stopper.seen, 2);
    }

    #[test]
    fn test_empty_manager_continues() {
        let mut manager = CallbackManager::new();
        assert!(manager.is_empty());
        let ctx = CallbackContext::default();
        assert_eq!(manager.on_train_begin(&ctx), CallbackAction::Continue);
        assert_eq!(manager.on_epoch_begin(&ctx), CallbackAction::Continue);
        assert_eq!(manager.on_step_end(&ctx), CallbackAction::Continue);
    }
}
