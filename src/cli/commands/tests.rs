//! CLI command tests
//!
//! Exercise the command handlers against config files on disk.

use super::*;
use crate::cli::LogLevel;
use crate::config::*;
use crate::decay::PruneRateDecay;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a cosine config with checkpoints under `dir/ckpt`
fn create_test_config(dir: &TempDir) -> PathBuf {
    let config_path = dir.path().join("decay.yaml");
    let config = format!(
        r#"
decay:
  name: cosine
  params:
    prune_rate: 0.5
    T_max: 100
events:
  frequency: 5
checkpoint:
  dir: {}
  save_every: 1
  save_best: false
"#,
        dir.path().join("ckpt").display()
    );
    std::fs::write(&config_path, config).unwrap();
    config_path
}

fn create_magnitude_config(dir: &TempDir) -> PathBuf {
    let config_path = dir.path().join("magnitude.json");
    std::fs::write(
        &config_path,
        r#"{"decay": {"name": "magnitude-prune", "params": {"initial_sparsity": 0.0, "final_sparsity": 0.3, "T_max": 65000, "T_start": 700, "interval": 100}}}"#,
    )
    .unwrap();
    config_path
}

#[test]
fn test_validate_command_basic() {
    let dir = TempDir::new().unwrap();
    let args = ValidateArgs { config: create_test_config(&dir), detailed: false };
    assert!(validate::run_validate(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_validate_command_detailed() {
    let dir = TempDir::new().unwrap();
    let args = ValidateArgs { config: create_test_config(&dir), detailed: true };
    assert!(validate::run_validate(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_validate_command_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "decay:\n  name: cosine\n  params:\n    T_max: 0\n").unwrap();
    let err = validate::run_validate(ValidateArgs { config: path, detailed: false }, LogLevel::Quiet)
        .unwrap_err();
    assert!(err.contains("T_max"), "unexpected message: {err}");
}

#[test]
fn test_validate_command_missing_file() {
    let args = ValidateArgs { config: PathBuf::from("/nonexistent/decay.yaml"), detailed: false };
    let err = validate::run_validate(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Config error"));
}

#[test]
fn test_curve_defaults_to_event_frequency() {
    let dir = TempDir::new().unwrap();
    let args = CurveArgs {
        config: create_test_config(&dir),
        every: None,
        until: None,
        format: OutputFormat::Text,
    };
    let trace = curve::sample_curve(&args).unwrap();
    // 0, 5, .., 100
    assert_eq!(trace.len(), 21);
    assert_eq!(trace.points.last().unwrap().step, 100);
}

#[test]
fn test_curve_magnitude_json() {
    let dir = TempDir::new().unwrap();
    let args = CurveArgs {
        config: create_magnitude_config(&dir),
        every: Some(100),
        until: Some(1000),
        format: OutputFormat::Json,
    };
    let trace = curve::sample_curve(&args).unwrap();
    let rendered = curve::render_trace(&trace, args.format).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(json["schedule"], "magnitude-prune");
    assert_eq!(json["mode"], "cumulative");
    assert_eq!(json["points"].as_array().unwrap().len(), 11);
    assert!(curve::run_curve(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_curve_yaml_rendering() {
    let dir = TempDir::new().unwrap();
    let args = CurveArgs {
        config: create_test_config(&dir),
        every: Some(50),
        until: None,
        format: OutputFormat::Yaml,
    };
    let trace = curve::sample_curve(&args).unwrap();
    let rendered = curve::render_trace(&trace, OutputFormat::Yaml).unwrap();
    assert!(rendered.contains("schedule: cosine"));
}

#[test]
fn test_simulate_then_resume() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);

    let args = SimulateArgs {
        config: config.clone(),
        epochs: 2,
        steps_per_epoch: 20,
        resume: false,
        checkpoint_dir: None,
    };
    let report = simulate::simulate(&args).unwrap();
    assert_eq!(report.callback.events_fired(), 8);
    assert_eq!(report.callback.last_saved_epoch(), Some(2));
    assert!(simulate::format_simulation_report(&report).contains("Pruning events: 8"));

    let resume_args = ResumeArgs { config: config.clone(), checkpoint_dir: dir.path().join("ckpt"), best: false };
    let (checkpoint, schedule) = resume::restore_from_dir(&resume_args).unwrap();
    assert_eq!(checkpoint.epoch, 2);
    assert_eq!(schedule.step_index(), 8);
    assert_eq!(schedule.get_dr().to_bits(), report.callback.schedule().get_dr().to_bits());
    assert!(resume::run_resume(resume_args, LogLevel::Quiet).is_ok());

    let continued = SimulateArgs { epochs: 4, resume: true, ..args };
    let report = simulate::simulate(&continued).unwrap();
    assert_eq!(report.resumed_epoch, Some(2));
    assert_eq!(report.callback.schedule().step_index(), 16);
}

#[test]
fn test_simulate_checkpoint_dir_override() {
    let dir = TempDir::new().unwrap();
    let override_dir = dir.path().join("elsewhere");
    let args = SimulateArgs {
        config: create_magnitude_config(&dir),
        epochs: 1,
        steps_per_epoch: 10,
        resume: false,
        checkpoint_dir: Some(override_dir.clone()),
    };
    let report = simulate::simulate(&args).unwrap();
    assert_eq!(report.callback.last_saved_epoch(), Some(1));
    assert!(override_dir.join("epoch_1.json").exists());
    assert!(override_dir.join("best.json").exists());
}

#[test]
fn test_resume_empty_dir_fails() {
    let dir = TempDir::new().unwrap();
    let args = ResumeArgs {
        config: create_test_config(&dir),
        checkpoint_dir: dir.path().join("empty"),
        best: false,
    };
    let err = resume::run_resume(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Resume failed"));
}

#[test]
fn test_run_command_dispatch() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let cli = parse_args(["sparse-decay", "-q", "validate", config.to_str().unwrap()]).unwrap();
    assert!(run_command(cli).is_ok());
}
