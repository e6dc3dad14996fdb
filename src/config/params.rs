//! Loosely-typed hyperparameters read from configuration files.

use serde::{Deserialize, Serialize};

use crate::error::{DecayError, Result};

/// Hyperparameters for any decay schedule.
///
/// Each schedule reads the subset it recognizes: integers are kept signed so
/// that a negative horizon is reported as a configuration error instead of a
/// parse failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecayParams {
    /// Initial pruning rate (cosine, linear).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune_rate: Option<f64>,
    /// Schedule horizon.
    #[serde(default, rename = "T_max", alias = "t_max", skip_serializing_if = "Option::is_none")]
    pub t_max: Option<i64>,
    /// Cosine floor rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_min: Option<f64>,
    /// Cosine starting position (`-1` for a fresh schedule).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_epoch: Option<i64>,
    /// Sparsity before the ramp (magnitude-prune).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_sparsity: Option<f64>,
    /// Sparsity at the horizon (magnitude-prune).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_sparsity: Option<f64>,
    /// Ramp start (magnitude-prune).
    #[serde(default, rename = "T_start", alias = "t_start", skip_serializing_if = "Option::is_none")]
    pub t_start: Option<i64>,
    /// Finite-difference width (magnitude-prune).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
}

impl DecayParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial pruning rate.
    pub fn with_prune_rate(mut self, rate: f64) -> Self {
        self.prune_rate = Some(rate);
        self
    }

    /// Set the schedule horizon.
    pub fn with_t_max(mut self, t_max: i64) -> Self {
        self.t_max = Some(t_max);
        self
    }

    /// Set the cosine floor rate.
    pub fn with_eta_min(mut self, eta_min: f64) -> Self {
        self.eta_min = Some(eta_min);
        self
    }

    /// Set the cosine starting position.
    pub fn with_last_epoch(mut self, last_epoch: i64) -> Self {
        self.last_epoch = Some(last_epoch);
        self
    }

    /// Set the sparsity held before the ramp.
    pub fn with_initial_sparsity(mut self, sparsity: f64) -> Self {
        self.initial_sparsity = Some(sparsity);
        self
    }

    /// Set the sparsity reached at the horizon.
    pub fn with_final_sparsity(mut self, sparsity: f64) -> Self {
        self.final_sparsity = Some(sparsity);
        self
    }

    /// Set the ramp start.
    pub fn with_t_start(mut self, t_start: i64) -> Self {
        self.t_start = Some(t_start);
        self
    }

    /// Set the finite-difference width.
    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Names of the parameters that are set.
    pub fn present(&self) -> Vec<&'static str> {
        let fields = [
            ("prune_rate", self.prune_rate.is_some()),
            ("T_max", self.t_max.is_some()),
            ("eta_min", self.eta_min.is_some()),
            ("last_epoch", self.last_epoch.is_some()),
            ("initial_sparsity", self.initial_sparsity.is_some()),
            ("final_sparsity", self.final_sparsity.is_some()),
            ("T_start", self.t_start.is_some()),
            ("interval", self.interval.is_some()),
        ];
        fields.into_iter().filter(|(_, set)| *set).map(|(name, _)| name).collect()
    }
}

/// Read a required parameter.
pub(crate) fn require<T: Copy>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| DecayError::missing(field))
}

/// Convert a signed step count that must be greater than zero.
pub(crate) fn positive_steps(field: &str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(DecayError::config(
            field,
            format!("must be greater than 0, got {value}"),
            "Step counts are positive integers",
        ));
    }
    usize::try_from(value).map_err(|_| {
        DecayError::config(field, format!("{value} does not fit in a step counter"), "Use a smaller value")
    })
}

/// Convert a signed step count that may be zero.
pub(crate) fn non_negative_steps(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        DecayError::config(
            field,
            format!("must not be negative, got {value}"),
            "Step counts start at 0",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_accept_both_spellings() {
        let upper: DecayParams = serde_yaml::from_str("T_max: 10\nT_start: 2").unwrap();
        let lower: DecayParams = serde_yaml::from_str("t_max: 10\nt_start: 2").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.t_max, Some(10));
        assert_eq!(upper.t_start, Some(2));
    }

    #[test]
    fn test_params_reject_unknown_fields() {
        let result: std::result::Result<DecayParams, _> = serde_yaml::from_str("T_mx: 10");
        assert!(result.is_err());
    }

    #[test]
    fn test_params_serialize_skips_unset() {
        let params = DecayParams::new().with_prune_rate(0.3).with_t_max(100);
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"prune_rate":0.3,"T_max":100}"#);
    }

    #[test]
    fn test_present_lists_set_fields() {
        let params = DecayParams::new().with_t_max(5).with_interval(1);
        assert_eq!(params.present(), vec!["T_max", "interval"]);
    }

    #[test]
    fn test_step_conversions() {
        assert_eq!(positive_steps("T_max", 3).unwrap(), 3);
        assert!(positive_steps("T_max", 0).unwrap_err().is_configuration());
        assert!(positive_steps("T_max", -4).unwrap_err().is_configuration());
        assert_eq!(non_negative_steps("T_start", 0).unwrap(), 0);
        assert!(non_negative_steps("T_start", -1).is_err());
        assert!(require::<f64>("prune_rate", None).unwrap_err().to_string().contains("prune_rate"));
    }
}
