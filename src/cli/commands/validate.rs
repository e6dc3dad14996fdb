//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, CheckpointConfig, DecayRunConfig, PruneEventConfig, ValidateArgs};
use crate::decay::{DecaySchedule, PruneRateDecay, ScheduleRegistry};

/// Format the built schedule as a string
pub fn format_schedule_info(schedule: &DecaySchedule) -> String {
    format!(
        "  Schedule: {}\n  Mode: {}\n  T_max: {}\n  Initial rate: {}",
        schedule.name(),
        schedule.mode().as_str(),
        schedule.t_max(),
        schedule.get_dr()
    )
}

/// Format the pruning event window as a string
pub fn format_events_info(events: &PruneEventConfig) -> String {
    let end = events.end_step.map_or_else(|| "end of training".to_string(), |e| e.to_string());
    format!(
        "  Pruning events: every {} steps from {} to {}\n  Clock: {:?}",
        events.frequency, events.start_step, end, events.clock
    )
}

/// Format the checkpoint policy as a string
pub fn format_checkpoint_info(checkpoint: &CheckpointConfig) -> String {
    let mut lines = vec![
        format!("  Checkpoints: {}", checkpoint.dir.display()),
        format!("    Format: {}", checkpoint.format.extension()),
    ];
    if let Some(every) = checkpoint.save_every {
        lines.push(format!("    Save every: {every} epochs"));
    }
    lines.push(format!("    Save best: {}", checkpoint.save_best));
    lines.join("\n")
}

/// Format the parameters the schedule reads and those it ignores
pub fn format_params_info(config: &DecayRunConfig) -> String {
    let recognized = ScheduleRegistry::recognized_params(&config.decay.name).unwrap_or(&[]);
    let ignored: Vec<&str> = config
        .decay
        .params
        .present()
        .into_iter()
        .filter(|p| !recognized.contains(p))
        .collect();

    let mut lines = vec![format!("  Recognized parameters: {}", recognized.join(", "))];
    if !ignored.is_empty() {
        lines.push(format!("  Ignored parameters: {}", ignored.join(", ")));
    }
    lines.join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(config: &DecayRunConfig, schedule: &DecaySchedule) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_schedule_info(schedule));
    println!("{}", format_params_info(config));
    println!();
    println!("{}", format_events_info(&config.events));

    if let Some(checkpoint) = &config.checkpoint {
        println!();
        println!("{}", format_checkpoint_info(checkpoint));
    }
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Validating config: {}", args.config.display()));

    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    config.validate().map_err(|e| format!("Validation failed: {e}"))?;
    let schedule = config.decay.build().map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&config, &schedule);
    } else {
        log(level, LogLevel::Normal, &format_schedule_info(&schedule));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DecayConfig, DecayParams, StepClock};
    use crate::decay::LinearDecay;

    #[test]
    fn test_format_schedule_info() {
        let schedule = DecaySchedule::from(LinearDecay::new(0.3, 1000).unwrap());
        let info = format_schedule_info(&schedule);
        assert!(info.contains("Schedule: linear"));
        assert!(info.contains("Mode: current"));
        assert!(info.contains("T_max: 1000"));
        assert!(info.contains("Initial rate: 0.3"));
    }

    #[test]
    fn test_format_events_info() {
        let events = PruneEventConfig::every(50).with_start_step(100).with_clock(StepClock::GlobalStep);
        let info = format_events_info(&events);
        assert!(info.contains("every 50 steps from 100 to end of training"));
        assert!(info.contains("GlobalStep"));

        let bounded = PruneEventConfig::every(10).with_end_step(500);
        assert!(format_events_info(&bounded).contains("to 500"));
    }

    #[test]
    fn test_format_checkpoint_info() {
        let info = format_checkpoint_info(&CheckpointConfig::new("/ckpt").with_save_every(2));
        assert!(info.contains("Checkpoints: /ckpt"));
        assert!(info.contains("Format: json"));
        assert!(info.contains("Save every: 2 epochs"));
        assert!(info.contains("Save best: true"));
    }

    #[test]
    fn test_format_params_info_lists_ignored() {
        let config = DecayRunConfig::new(
            DecayConfig::new("linear")
                .with_params(DecayParams::default().with_prune_rate(0.3).with_t_max(100).with_interval(5)),
        );
        let info = format_params_info(&config);
        assert!(info.contains("Recognized parameters: prune_rate, T_max"));
        assert!(info.contains("Ignored parameters: interval"));
    }
}
