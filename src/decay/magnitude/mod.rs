//! Magnitude-prune decay schedule.
//!
//! Models target sparsity as a cubic ramp between `T_start` and `T_max` and
//! reports the change in sparsity over the last `interval` steps.
//!
//! Formula: s_t = s_f + (s_i - s_f) * (1 - (t - T_start) / (T_max - T_start))^3

mod core;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use self::core::MagnitudePruneDecay;
