//! Error types with actionable diagnostics.
//!
//! Every construction-time failure surfaces as a configuration error so a
//! silently-wrong pruning rate never reaches the training loop.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for decay schedule operations.
pub type Result<T> = std::result::Result<T, DecayError>;

/// Errors raised while building, restoring or persisting decay schedules.
#[derive(Error, Debug)]
pub enum DecayError {
    /// A schedule parameter is missing or outside its valid domain.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    Configuration { field: String, message: String, suggestion: String },

    /// The registry has no schedule under the requested name.
    #[error("Unknown decay schedule '{name}'\n  → Supported schedules: cosine, linear, magnitude-prune")]
    UnknownSchedule { name: String },

    /// No checkpoint file exists where one was required.
    #[error("Checkpoint not found: {}\n  → Check the checkpoint directory or start a fresh run", .path.display())]
    CheckpointNotFound { path: PathBuf },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization failed while writing a record.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DecayError {
    /// Create a configuration error for `field`.
    pub fn config(
        field: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a configuration error for a required field that was not supplied.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let suggestion = format!("Add '{field}' to the schedule configuration");
        Self::Configuration { field, message: "required parameter is missing".into(), suggestion }
    }

    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Whether this is a configuration error (invalid parameter, unknown
    /// schedule name or malformed checkpoint record).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::UnknownSchedule { .. })
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::UnknownSchedule { .. } | Self::CheckpointNotFound { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "E003",
            Self::UnknownSchedule { .. } => "E004",
            Self::CheckpointNotFound { .. } => "E012",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}
