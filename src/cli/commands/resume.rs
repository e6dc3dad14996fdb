//! Resume command implementation

use crate::checkpoint::{CheckpointStore, TrainingCheckpoint};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, ResumeArgs};
use crate::decay::{DecaySchedule, PruneRateDecay};
use crate::DecayError;

/// Load the requested checkpoint and rebuild the configured schedule from it.
pub fn restore_from_dir(args: &ResumeArgs) -> crate::Result<(TrainingCheckpoint, DecaySchedule)> {
    let config = load_config(&args.config)?;
    config.validate()?;

    let store = CheckpointStore::new(&args.checkpoint_dir);
    let checkpoint = if args.best { store.load_best()? } else { store.load_latest()? };
    let checkpoint = checkpoint
        .ok_or_else(|| DecayError::CheckpointNotFound { path: args.checkpoint_dir.clone() })?;

    let schedule = checkpoint.decay.restore_into(&config.decay)?;
    Ok((checkpoint, schedule))
}

/// Format a restored schedule as a string
pub fn format_resume_info(checkpoint: &TrainingCheckpoint, schedule: &DecaySchedule) -> String {
    let mut lines = vec![
        format!("  Epoch: {}", checkpoint.epoch),
        format!("  Global step: {}", checkpoint.step),
        format!("  Schedule: {} ({})", schedule.name(), schedule.mode().as_str()),
        format!("  Step index: {} / {}", schedule.step_index(), schedule.t_max()),
        format!("  Rate: {}", schedule.get_dr()),
    ];
    if let Some(loss) = checkpoint.val_loss {
        lines.push(format!("  Validation loss: {loss:.6}"));
    }
    if schedule.is_saturated() {
        lines.push("  Schedule has reached T_max".to_string());
    }
    lines.join("\n")
}

pub fn run_resume(args: ResumeArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Resuming from: {}", args.checkpoint_dir.display()),
    );

    let (checkpoint, schedule) = restore_from_dir(&args).map_err(|e| format!("Resume failed: {e}"))?;
    println!("{}", format_resume_info(&checkpoint, &schedule));
    Ok(())
}
