//! Training-loop integration
//!
//! The schedules are driven from a training loop through callbacks:
//! - `DecayCallback`: steps the schedule at each pruning event, hands the
//!   rate to a `MaskUpdater` and writes checkpoints at epoch boundaries
//! - `StepDriver`: minimal epoch/step loop dispatching callback events
//! - `RateTrace`: sampled rate and sparsity curve of a schedule

pub mod callback;
mod driver;
mod mask;
mod trace;

pub use callback::{CallbackAction, CallbackContext, CallbackManager, DecayCallback, TrainerCallback};
pub use driver::{DriveResult, StepDriver};
pub use mask::{MaskUpdater, SparsityTracker};
pub use trace::{RateTrace, TracePoint};
