//! Curve command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, CurveArgs, OutputFormat};
use crate::decay::PruneRateDecay;
use crate::train::RateTrace;
use crate::DecayError;

/// Sample the configured schedule as requested by `args`.
pub fn sample_curve(args: &CurveArgs) -> crate::Result<RateTrace> {
    let config = load_config(&args.config)?;
    let schedule = config.decay.build()?;
    let every = args.every.unwrap_or(config.events.frequency);
    let until = args.until.unwrap_or(schedule.t_max());
    Ok(RateTrace::sample(&schedule, until, every))
}

/// Render a trace in the requested format
pub fn render_trace(trace: &RateTrace, format: OutputFormat) -> crate::Result<String> {
    match format {
        OutputFormat::Text => Ok(trace.to_table()),
        OutputFormat::Json => serde_json::to_string_pretty(trace)
            .map_err(|e| DecayError::Serialization { message: e.to_string() }),
        OutputFormat::Yaml => serde_yaml::to_string(trace)
            .map_err(|e| DecayError::Serialization { message: e.to_string() }),
    }
}

pub fn run_curve(args: CurveArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, &format!("Sampling schedule from: {}", args.config.display()));

    let trace = sample_curve(&args).map_err(|e| format!("Curve failed: {e}"))?;
    let rendered = render_trace(&trace, args.format).map_err(|e| e.to_string())?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
