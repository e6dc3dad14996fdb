//! Property-based tests for the magnitude-prune schedule.

use crate::decay::MagnitudePruneDecay;
use proptest::prelude::*;

proptest! {
    /// Sparsity never decreases when the ramp goes up
    #[test]
    fn sparsity_monotonic(
        start in 0usize..500,
        duration in 1usize..500,
        initial in 0.0f64..0.5,
        final_val in 0.5f64..1.0,
        interval in 1usize..50,
    ) {
        let decay = MagnitudePruneDecay::new(initial, final_val, start + duration, start, interval).unwrap();

        let mut prev = decay.cumulative_sparsity(0);
        for t in 0..=(start + duration + 10) {
            let sparsity = decay.cumulative_sparsity(t);
            prop_assert!(sparsity >= prev - 1e-12);
            prev = sparsity;
        }
    }

    /// Sparsity stays within the configured endpoints
    #[test]
    fn sparsity_bounded(
        start in 0usize..500,
        duration in 1usize..500,
        initial in 0.0f64..0.5,
        final_val in 0.5f64..1.0,
        t in 0usize..2000,
    ) {
        let decay = MagnitudePruneDecay::new(initial, final_val, start + duration, start, 10).unwrap();
        let sparsity = decay.cumulative_sparsity(t);
        prop_assert!(sparsity >= initial - 1e-12);
        prop_assert!(sparsity <= final_val + 1e-12);
    }

    /// The ramp meets both plateaus
    #[test]
    fn sparsity_continuous_at_endpoints(
        start in 0usize..500,
        duration in 1usize..500,
        initial in 0.0f64..0.5,
        final_val in 0.5f64..1.0,
    ) {
        let t_max = start + duration;
        let decay = MagnitudePruneDecay::new(initial, final_val, t_max, start, 10).unwrap();
        prop_assert!((decay.cumulative_sparsity(start) - initial).abs() < 1e-12);
        prop_assert_eq!(decay.cumulative_sparsity(t_max), final_val);
    }
}
