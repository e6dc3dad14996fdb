//! Unit tests for the magnitude-prune schedule.

use crate::decay::{DecayMode, MagnitudePruneDecay, PruneRateDecay};
use approx::assert_abs_diff_eq;

fn zhu_gupta() -> MagnitudePruneDecay {
    MagnitudePruneDecay::new(0.0, 0.8, 65_000, 700, 100).unwrap()
}

// =========================================================================
// Sparsity Curve Tests
// =========================================================================

#[test]
fn test_sparsity_plateau_before_start() {
    // TEST_ID: MAG-001
    let decay = zhu_gupta();
    assert_eq!(decay.cumulative_sparsity(0), 0.0);
    assert_eq!(
        decay.cumulative_sparsity(699),
        0.0,
        "MAG-001 FALSIFIED: sparsity should hold initial_sparsity before T_start"
    );
}

#[test]
fn test_sparsity_continuous_at_start() {
    // TEST_ID: MAG-002
    let decay = zhu_gupta();
    assert_eq!(
        decay.cumulative_sparsity(700),
        0.0,
        "MAG-002 FALSIFIED: sparsity(T_start) should equal initial_sparsity"
    );
}

#[test]
fn test_sparsity_reaches_final_at_horizon() {
    // TEST_ID: MAG-003
    let decay = zhu_gupta();
    assert_eq!(
        decay.cumulative_sparsity(65_000),
        0.8,
        "MAG-003 FALSIFIED: sparsity(T_max) should equal final_sparsity"
    );
    assert_eq!(decay.cumulative_sparsity(1_000_000), 0.8);
    assert_abs_diff_eq!(decay.cumulative_sparsity(64_999), 0.8, epsilon = 1e-9);
}

#[test]
fn test_sparsity_cubic_midpoint() {
    // TEST_ID: MAG-004
    let decay = MagnitudePruneDecay::new(0.0, 0.8, 200, 100, 10).unwrap();
    // progress = 0.5 -> 0.8 * (1 - 0.125)
    assert_abs_diff_eq!(decay.cumulative_sparsity(150), 0.7, epsilon = 1e-12);
}

#[test]
fn test_sparsity_with_nonzero_initial() {
    // TEST_ID: MAG-005
    let decay = MagnitudePruneDecay::new(0.2, 0.6, 100, 0, 10).unwrap();
    assert_abs_diff_eq!(decay.cumulative_sparsity(0), 0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(decay.cumulative_sparsity(50), 0.55, epsilon = 1e-12);
    assert_eq!(decay.cumulative_sparsity(100), 0.6);
}

// =========================================================================
// Finite Difference Tests
// =========================================================================

#[test]
fn test_rate_is_difference_over_interval() {
    // TEST_ID: MAG-010
    let mut decay = zhu_gupta();
    decay.step(Some(10_000));
    let expected = decay.cumulative_sparsity(10_000) - decay.cumulative_sparsity(9_900);
    assert_eq!(decay.get_dr(), expected);
    assert!(decay.get_dr() > 0.0);
}

#[test]
fn test_rate_flattens_at_horizon() {
    // TEST_ID: MAG-011
    let mut decay = zhu_gupta();
    decay.step(Some(65_000));
    assert_abs_diff_eq!(decay.get_dr(), 0.0, epsilon = 1e-6);
    assert_eq!(decay.step_index(), 65_000);
}

#[test]
fn test_rate_below_interval_uses_plateau() {
    // TEST_ID: MAG-012
    let mut decay = MagnitudePruneDecay::new(0.1, 0.9, 1000, 0, 100).unwrap();
    decay.step(Some(50));
    let expected = decay.cumulative_sparsity(50) - 0.1;
    assert_eq!(
        decay.get_dr(),
        expected,
        "MAG-012 FALSIFIED: sparsity before step 0 should be the initial plateau"
    );
}

#[test]
fn test_rate_zero_before_ramp() {
    // TEST_ID: MAG-013
    let mut decay = zhu_gupta();
    assert_eq!(decay.get_dr(), 0.0);
    decay.step(Some(500));
    assert_eq!(decay.get_dr(), 0.0);
}

#[test]
fn test_caller_supplied_sparsity_overrides_lookup() {
    // TEST_ID: MAG-014
    let mut decay = zhu_gupta();
    decay.step_with_sparsity(Some(10_000), Some(0.25));
    assert_eq!(decay.get_dr(), decay.cumulative_sparsity(10_000) - 0.25);
    assert_eq!(decay.step_index(), 10_000);
}

#[test]
fn test_incremental_step_advances_by_one() {
    // TEST_ID: MAG-015
    let mut decay = MagnitudePruneDecay::new(0.0, 0.5, 10, 2, 1).unwrap();
    decay.step(None);
    decay.step(None);
    decay.step(None);
    assert_eq!(decay.step_index(), 3);
    assert_eq!(decay.get_dr(), decay.cumulative_sparsity(3) - decay.cumulative_sparsity(2));
}

#[test]
fn test_mode_is_cumulative() {
    // TEST_ID: MAG-016
    assert_eq!(zhu_gupta().mode(), DecayMode::Cumulative);
}

// =========================================================================
// Validation Tests
// =========================================================================

#[test]
fn test_start_after_horizon_rejected() {
    // TEST_ID: MAG-020
    let err = MagnitudePruneDecay::new(0.0, 0.8, 100, 200, 10).unwrap_err();
    assert!(err.is_configuration(), "MAG-020 FALSIFIED: T_start > T_max must be rejected");
    assert!(err.to_string().contains("T_start"));
}

#[test]
fn test_start_equal_horizon_accepted() {
    // TEST_ID: MAG-021
    let decay = MagnitudePruneDecay::new(0.0, 0.8, 100, 100, 10).unwrap();
    assert_eq!(decay.cumulative_sparsity(99), 0.0);
    assert_eq!(decay.cumulative_sparsity(100), 0.8);
}

#[test]
fn test_zero_horizon_rejected() {
    // TEST_ID: MAG-022
    assert!(MagnitudePruneDecay::new(0.0, 0.8, 0, 0, 10).unwrap_err().is_configuration());
}

#[test]
fn test_invalid_sparsity_rejected() {
    // TEST_ID: MAG-023
    assert!(MagnitudePruneDecay::new(-0.1, 0.8, 100, 0, 10).is_err());
    assert!(MagnitudePruneDecay::new(0.0, 1.5, 100, 0, 10).is_err());
    assert!(MagnitudePruneDecay::new(0.0, f64::NAN, 100, 0, 10).is_err());
}

#[test]
fn test_zero_interval_rejected() {
    // TEST_ID: MAG-024
    let err = MagnitudePruneDecay::new(0.0, 0.8, 100, 0, 0).unwrap_err();
    assert!(err.to_string().contains("interval"));
}

#[test]
fn test_default_matches_reference_hyperparameters() {
    let decay = MagnitudePruneDecay::default();
    assert_eq!(decay.initial_sparsity(), 0.0);
    assert_eq!(decay.final_sparsity(), 0.3);
    assert_eq!(decay.t_max(), 30_000);
    assert_eq!(decay.t_start(), 350);
    assert_eq!(decay.interval(), 100);
    assert_eq!(decay, MagnitudePruneDecay::new(0.0, 0.3, 30_000, 350, 100).unwrap());
}
