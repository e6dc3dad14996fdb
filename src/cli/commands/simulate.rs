//! Simulate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, CheckpointConfig, SimulateArgs};
use crate::decay::PruneRateDecay;
use crate::train::{CallbackManager, DecayCallback, DriveResult, SparsityTracker, StepDriver};

/// Outcome of a simulated run
#[derive(Debug)]
pub struct SimulationReport {
    /// Loop outcome
    pub result: DriveResult,
    /// Callback after the run, holding the schedule and tracker
    pub callback: DecayCallback<SparsityTracker>,
    /// Epoch resumed from, if a checkpoint was used
    pub resumed_epoch: Option<usize>,
}

/// Drive the configured schedule through `args.epochs` model-free epochs.
///
/// The synthetic loss decreases with the global step so the best-checkpoint
/// policy fires every epoch.
pub fn simulate(args: &SimulateArgs) -> crate::Result<SimulationReport> {
    let mut config = load_config(&args.config)?;
    if let Some(dir) = &args.checkpoint_dir {
        let checkpoint = config.checkpoint.take().map_or_else(
            || CheckpointConfig::new(dir),
            |mut ckpt| {
                ckpt.dir = dir.clone();
                ckpt
            },
        );
        config = config.with_checkpoint(checkpoint);
    }

    let (mut callback, resumed) = if args.resume {
        DecayCallback::resume_latest(config, SparsityTracker::default())?
    } else {
        (DecayCallback::new(config, SparsityTracker::default())?, None)
    };
    let resumed_epoch = resumed.map(|ckpt| ckpt.epoch);

    let driver = StepDriver::new(args.steps_per_epoch).resume_from(resumed_epoch.unwrap_or(0));
    let result = {
        let mut callbacks = CallbackManager::new();
        callbacks.add(&mut callback);
        driver.run(&mut callbacks, args.epochs, |step| 1.0 / (1.0 + step as f32))
    };

    Ok(SimulationReport { result, callback, resumed_epoch })
}

/// Format a simulation report as a string
pub fn format_simulation_report(report: &SimulationReport) -> String {
    let schedule = report.callback.schedule();
    let mut lines = Vec::new();
    if let Some(epoch) = report.resumed_epoch {
        lines.push(format!("  Resumed at epoch: {epoch}"));
    }
    lines.push(format!("  Epochs run to: {}", report.result.final_epoch));
    lines.push(format!("  Global steps: {}", report.result.global_steps));
    lines.push(format!("  Pruning events: {}", report.callback.events_fired()));
    lines.push(format!("  Step index: {} / {}", schedule.step_index(), schedule.t_max()));
    lines.push(format!("  Final rate: {}", schedule.get_dr()));
    lines.push(format!("  Tracked sparsity: {:.6}", report.callback.updater().sparsity()));
    if let Some(epoch) = report.callback.last_saved_epoch() {
        lines.push(format!("  Last checkpoint epoch: {epoch}"));
    }
    if report.result.stopped_early {
        lines.push("  Stopped early".to_string());
    }
    lines.join("\n")
}

pub fn run_simulate(args: SimulateArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Simulating: {}", args.config.display()));

    let report = simulate(&args).map_err(|e| format!("Simulation failed: {e}"))?;
    log(level, LogLevel::Normal, &format_simulation_report(&report));
    Ok(())
}
