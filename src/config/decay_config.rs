//! Named schedule configuration.

use serde::{Deserialize, Serialize};

use super::DecayParams;
use crate::decay::{DecaySchedule, ScheduleRegistry};
use crate::error::Result;

/// A schedule selected by registry name plus its hyperparameters.
///
/// # Example
///
/// ```
/// use sparse_decay::config::{DecayConfig, DecayParams};
/// use sparse_decay::decay::PruneRateDecay;
///
/// let config = DecayConfig::new("cosine")
///     .with_params(DecayParams::new().with_prune_rate(0.5).with_t_max(100));
/// let schedule = config.build().unwrap();
/// assert_eq!(schedule.get_dr(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecayConfig {
    /// Registry name: `cosine`, `linear` or `magnitude-prune`.
    pub name: String,
    /// Schedule hyperparameters.
    #[serde(default)]
    pub params: DecayParams,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self { name: "cosine".to_string(), params: DecayParams::default() }
    }
}

impl DecayConfig {
    /// Create a configuration for the schedule registered under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), params: DecayParams::default() }
    }

    /// Set the hyperparameters.
    pub fn with_params(mut self, params: DecayParams) -> Self {
        self.params = params;
        self
    }

    /// Build a fresh schedule through the registry.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown names and invalid or
    /// missing parameters.
    pub fn build(&self) -> Result<DecaySchedule> {
        ScheduleRegistry::build(&self.name, &self.params)
    }

    /// Validate the configuration by building it once.
    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }
}
