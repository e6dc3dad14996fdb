//! Directory-backed checkpoint storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::TrainingCheckpoint;
use crate::error::{DecayError, Result};

static EPOCH_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^epoch_(\d+)\.(json|ya?ml)$").expect("Invalid epoch file regex"));

/// Serialization format for checkpoint records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointFormat {
    /// JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl CheckpointFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            CheckpointFormat::Json => "json",
            CheckpointFormat::Yaml => "yaml",
        }
    }

    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(CheckpointFormat::Json),
            "yaml" | "yml" => Some(CheckpointFormat::Yaml),
            _ => None,
        }
    }
}

/// Stores `epoch_{E}` and `best` checkpoint records in a directory.
///
/// Written once per epoch boundary and read once at process start.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
    format: CheckpointFormat,
}

impl CheckpointStore {
    /// Create a store writing JSON records to `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), format: CheckpointFormat::default() }
    }

    /// Set the record format used when saving.
    pub fn with_format(mut self, format: CheckpointFormat) -> Self {
        self.format = format;
        self
    }

    /// Checkpoint directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `epoch`.
    pub fn epoch_path(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("epoch_{epoch}.{}", self.format.extension()))
    }

    /// Path of the best record.
    pub fn best_path(&self) -> PathBuf {
        self.dir.join(format!("best.{}", self.format.extension()))
    }

    /// Write `checkpoint` as the record of its epoch, and as the best record
    /// when `is_best` is set. Returns the epoch record's path.
    pub fn save(&self, checkpoint: &TrainingCheckpoint, is_best: bool) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DecayError::io(format!("creating checkpoint directory {}", self.dir.display()), e)
        })?;

        let data = self.serialize(checkpoint)?;
        let path = self.epoch_path(checkpoint.epoch);
        write_file(&path, &data)?;
        info!(epoch = checkpoint.epoch, step = checkpoint.step, path = %path.display(), "saved checkpoint");

        if is_best {
            let best = self.best_path();
            write_file(&best, &data)?;
            info!(epoch = checkpoint.epoch, val_loss = ?checkpoint.val_loss, "saved best checkpoint");
        }
        Ok(path)
    }

    /// Read a record from `path`, detecting the format from its extension.
    ///
    /// # Errors
    ///
    /// Missing or malformed fields are configuration errors.
    pub fn load(path: impl AsRef<Path>) -> Result<TrainingCheckpoint> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DecayError::CheckpointNotFound { path: path.to_path_buf() });
        }
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(CheckpointFormat::from_extension)
            .ok_or_else(|| {
                DecayError::config(
                    "checkpoint",
                    format!("unsupported checkpoint file: {}", path.display()),
                    "Checkpoints are .json or .yaml files",
                )
            })?;

        let text = fs::read_to_string(path)
            .map_err(|e| DecayError::io(format!("reading checkpoint {}", path.display()), e))?;
        parse(format, &text).map_err(|message| {
            DecayError::config(
                "checkpoint",
                format!("{}: {message}", path.display()),
                "The checkpoint is incomplete; restore it from a backup or start a fresh run",
            )
        })
    }

    /// Highest epoch with a record in the directory.
    pub fn latest_epoch(&self) -> Result<Option<usize>> {
        Ok(self.epoch_files()?.into_iter().map(|(epoch, _)| epoch).max())
    }

    /// Load the record of the highest epoch, or `None` if the directory
    /// holds no checkpoint.
    pub fn load_latest(&self) -> Result<Option<TrainingCheckpoint>> {
        let latest = self.epoch_files()?.into_iter().max_by_key(|(epoch, _)| *epoch);
        match latest {
            Some((epoch, path)) => {
                info!(epoch, path = %path.display(), "loading checkpoint");
                Self::load(path).map(Some)
            }
            None => {
                info!(dir = %self.dir.display(), "no checkpoint found");
                Ok(None)
            }
        }
    }

    /// Load the best record, or `None` if none was written.
    pub fn load_best(&self) -> Result<Option<TrainingCheckpoint>> {
        for format in [CheckpointFormat::Json, CheckpointFormat::Yaml] {
            let path = self.dir.join(format!("best.{}", format.extension()));
            if path.exists() {
                return Self::load(path).map(Some);
            }
        }
        Ok(None)
    }

    fn epoch_files(&self) -> Result<Vec<(usize, PathBuf)>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            DecayError::io(format!("listing checkpoint directory {}", self.dir.display()), e)
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DecayError::io("reading checkpoint directory entry", e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(captures) = EPOCH_FILE.captures(name) else { continue };
            if let Ok(epoch) = captures[1].parse::<usize>() {
                files.push((epoch, entry.path()));
            }
        }
        Ok(files)
    }

    fn serialize(&self, checkpoint: &TrainingCheckpoint) -> Result<String> {
        match self.format {
            CheckpointFormat::Json => serde_json::to_string_pretty(checkpoint).map_err(|e| {
                DecayError::Serialization { message: format!("JSON serialization failed: {e}") }
            }),
            CheckpointFormat::Yaml => serde_yaml::to_string(checkpoint).map_err(|e| {
                DecayError::Serialization { message: format!("YAML serialization failed: {e}") }
            }),
        }
    }
}

fn parse(format: CheckpointFormat, text: &str) -> std::result::Result<TrainingCheckpoint, String> {
    match format {
        CheckpointFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        CheckpointFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    }
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    fs::write(path, data).map_err(|e| DecayError::io(format!("writing checkpoint {}", path.display()), e))
}
