//! Run configuration file loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DecayConfig, PruneEventConfig};
use crate::checkpoint::{CheckpointFormat, CheckpointStore};
use crate::error::{DecayError, Result};

/// Where and how often checkpoints are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckpointConfig {
    /// Checkpoint directory.
    pub dir: PathBuf,
    /// Record format.
    #[serde(default)]
    pub format: CheckpointFormat,
    /// Save every N epochs (`None` = only save best).
    #[serde(default)]
    pub save_every: Option<usize>,
    /// Also write the best checkpoint by validation loss.
    #[serde(default = "default_save_best")]
    pub save_best: bool,
}

fn default_save_best() -> bool {
    true
}

impl CheckpointConfig {
    /// Create a checkpoint configuration writing JSON records to `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), format: CheckpointFormat::default(), save_every: None, save_best: true }
    }

    /// Set the record format.
    pub fn with_format(mut self, format: CheckpointFormat) -> Self {
        self.format = format;
        self
    }

    /// Save every N epochs.
    pub fn with_save_every(mut self, epochs: usize) -> Self {
        self.save_every = Some(epochs);
        self
    }

    /// Enable or disable best-checkpoint saving.
    pub fn with_save_best(mut self, save: bool) -> Self {
        self.save_best = save;
        self
    }

    /// Store writing to `dir` in `format`.
    pub fn store(&self) -> CheckpointStore {
        CheckpointStore::new(&self.dir).with_format(self.format)
    }

    /// Check if epoch `epoch` (1-indexed) is due for a periodic save.
    pub fn is_periodic(&self, epoch: usize) -> bool {
        self.save_every.is_some_and(|n| epoch.is_multiple_of(n))
    }

    /// Validate the save policy.
    pub fn validate(&self) -> Result<()> {
        if self.save_every == Some(0) {
            return Err(DecayError::config(
                "save_every",
                "must be greater than 0",
                "Remove save_every to keep only the best checkpoint",
            ));
        }
        Ok(())
    }
}

/// Complete configuration of a sparse training run's pruning schedule.
///
/// ```yaml
/// decay:
///   name: magnitude-prune
///   params:
///     initial_sparsity: 0.0
///     final_sparsity: 0.8
///     T_max: 65000
///     T_start: 700
///     interval: 100
/// events:
///   frequency: 100
///   clock: global_step
/// checkpoint:
///   dir: ./checkpoints
///   save_every: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecayRunConfig {
    /// Selected schedule.
    pub decay: DecayConfig,
    /// Pruning event window.
    #[serde(default)]
    pub events: PruneEventConfig,
    /// Checkpoint policy.
    #[serde(default)]
    pub checkpoint: Option<CheckpointConfig>,
}

impl DecayRunConfig {
    /// Create a run configuration for `decay` with default events.
    pub fn new(decay: DecayConfig) -> Self {
        Self { decay, events: PruneEventConfig::default(), checkpoint: None }
    }

    /// Set the event window.
    pub fn with_events(mut self, events: PruneEventConfig) -> Self {
        self.events = events;
        self
    }

    /// Set the checkpoint policy.
    pub fn with_checkpoint(mut self, checkpoint: CheckpointConfig) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Parse a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| parse_error("YAML", e))
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| parse_error("JSON", e))
    }

    /// Validate the schedule and event window.
    pub fn validate(&self) -> Result<()> {
        self.decay.validate()?;
        self.events.validate()?;
        match &self.checkpoint {
            Some(checkpoint) => checkpoint.validate(),
            None => Ok(()),
        }
    }
}

fn parse_error(format: &str, err: impl std::fmt::Display) -> DecayError {
    DecayError::config(
        "config",
        format!("{format} parsing failed: {err}"),
        "Check the syntax and field names at the indicated location",
    )
}

/// Load and validate a run configuration.
///
/// The format is detected from the file extension (`.yaml`, `.yml`, `.json`).
pub fn load_config(path: impl AsRef<Path>) -> Result<DecayRunConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| DecayError::io(format!("reading config {}", path.display()), e))?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => DecayRunConfig::from_yaml(&text)?,
        Some("json") => DecayRunConfig::from_json(&text)?,
        other => {
            return Err(DecayError::config(
                "config",
                format!("unsupported file extension: {}", other.unwrap_or("<none>")),
                "Use a .yaml, .yml or .json file",
            ))
        }
    };

    config.validate()?;
    debug!(path = %path.display(), schedule = %config.decay.name, "loaded run configuration");
    Ok(config)
}
