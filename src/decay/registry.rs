//! Name → constructor lookup for decay schedules.

use tracing::{debug, warn};

use super::{CosineDecay, DecaySchedule, LinearDecay, MagnitudePruneDecay, PruneRateDecay};
use crate::config::params::{non_negative_steps, positive_steps, require};
use crate::config::DecayParams;
use crate::error::{DecayError, Result};

/// Builds a schedule from loosely-typed parameters.
pub type ScheduleConstructor = fn(&DecayParams) -> Result<DecaySchedule>;

struct Entry {
    name: &'static str,
    recognized: &'static [&'static str],
    construct: ScheduleConstructor,
}

static REGISTRY: [Entry; 3] = [
    Entry {
        name: CosineDecay::NAME,
        recognized: &["prune_rate", "T_max", "eta_min", "last_epoch"],
        construct: build_cosine,
    },
    Entry { name: LinearDecay::NAME, recognized: &["prune_rate", "T_max"], construct: build_linear },
    Entry {
        name: MagnitudePruneDecay::NAME,
        recognized: &["initial_sparsity", "final_sparsity", "T_max", "T_start", "interval"],
        construct: build_magnitude,
    },
];

/// Fixed registry of the supported decay schedules.
///
/// # Example
///
/// ```
/// use sparse_decay::config::DecayParams;
/// use sparse_decay::decay::{PruneRateDecay, ScheduleRegistry};
///
/// let params = DecayParams::new().with_prune_rate(0.3).with_t_max(1000);
/// let schedule = ScheduleRegistry::build("linear", &params).unwrap();
/// assert_eq!(schedule.get_dr(), 0.3);
///
/// assert!(ScheduleRegistry::build("bogus", &params).is_err());
/// ```
pub struct ScheduleRegistry;

impl ScheduleRegistry {
    /// Names of all registered schedules.
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|entry| entry.name)
    }

    /// Check whether `name` is registered.
    pub fn contains(name: &str) -> bool {
        REGISTRY.iter().any(|entry| entry.name == name)
    }

    /// Look up the constructor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DecayError::UnknownSchedule`] for names outside the registry.
    pub fn lookup(name: &str) -> Result<ScheduleConstructor> {
        Self::entry(name).map(|entry| entry.construct)
    }

    /// Parameters the schedule registered under `name` reads.
    pub fn recognized_params(name: &str) -> Result<&'static [&'static str]> {
        Self::entry(name).map(|entry| entry.recognized)
    }

    /// Build the schedule registered under `name`.
    ///
    /// Parameters the schedule does not read are reported and ignored.
    pub fn build(name: &str, params: &DecayParams) -> Result<DecaySchedule> {
        let entry = Self::entry(name)?;
        for field in params.present() {
            if !entry.recognized.contains(&field) {
                warn!(schedule = name, field, "ignoring parameter not used by this schedule");
            }
        }
        let schedule = (entry.construct)(params)?;
        debug!(schedule = name, ?params, "built decay schedule");
        Ok(schedule)
    }

    fn entry(name: &str) -> Result<&'static Entry> {
        REGISTRY
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| DecayError::UnknownSchedule { name: name.to_string() })
    }
}

fn build_cosine(params: &DecayParams) -> Result<DecaySchedule> {
    let t_max = positive_steps("T_max", params.t_max.unwrap_or(1000))?;
    let decay = CosineDecay::with_last_epoch(
        params.prune_rate.unwrap_or(0.3),
        t_max,
        params.eta_min.unwrap_or(0.0),
        params.last_epoch.unwrap_or(-1),
    )?;
    Ok(decay.into())
}

fn build_linear(params: &DecayParams) -> Result<DecaySchedule> {
    let prune_rate = require("prune_rate", params.prune_rate)?;
    let t_max = positive_steps("T_max", require("T_max", params.t_max)?)?;
    Ok(LinearDecay::new(prune_rate, t_max)?.into())
}

fn build_magnitude(params: &DecayParams) -> Result<DecaySchedule> {
    let defaults = MagnitudePruneDecay::default();
    let t_max = match params.t_max {
        Some(value) => positive_steps("T_max", value)?,
        None => defaults.t_max(),
    };
    let t_start = match params.t_start {
        Some(value) => non_negative_steps("T_start", value)?,
        None => defaults.t_start(),
    };
    let interval = match params.interval {
        Some(value) => positive_steps("interval", value)?,
        None => defaults.interval(),
    };
    let decay = MagnitudePruneDecay::new(
        params.initial_sparsity.unwrap_or(defaults.initial_sparsity()),
        params.final_sparsity.unwrap_or(defaults.final_sparsity()),
        t_max,
        t_start,
        interval,
    )?;
    Ok(decay.into())
}
