//! Property-based tests for the decay contract.

use super::*;
use proptest::prelude::*;

fn schedule_strategy() -> impl Strategy<Value = DecaySchedule> {
    prop_oneof![
        (0.01f64..2.0, 1usize..2000, 0.0f64..0.01)
            .prop_map(|(rate, t_max, floor)| CosineDecay::new(rate, t_max, floor).unwrap().into()),
        (0.01f64..2.0, 1usize..2000)
            .prop_map(|(rate, t_max)| LinearDecay::new(rate, t_max).unwrap().into()),
        (0.0f64..0.5, 0.5f64..1.0, 1usize..2000, 0usize..2000, 1usize..200).prop_map(
            |(initial, final_val, t_max, start, interval)| {
                MagnitudePruneDecay::new(initial, final_val, t_max, start.min(t_max), interval)
                    .unwrap()
                    .into()
            }
        ),
    ]
}

proptest! {
    /// Seeking and incremental stepping agree bit-for-bit
    #[test]
    fn seek_matches_replay(fresh in schedule_strategy(), k in 0usize..2100) {
        let mut seeked = fresh;
        seeked.step(Some(k));

        let mut stepped = fresh;
        for _ in 0..k {
            stepped.step(None);
        }

        prop_assert_eq!(seeked.step_index(), stepped.step_index());
        prop_assert_eq!(seeked.get_dr().to_bits(), stepped.get_dr().to_bits());
    }

    /// The counter saturates at the horizon
    #[test]
    fn counter_bounded(fresh in schedule_strategy(), k in 0usize..10_000) {
        let mut schedule = fresh;
        schedule.step(Some(k));
        prop_assert!(schedule.step_index() <= schedule.t_max());
        prop_assert_eq!(schedule.step_index(), k.min(schedule.t_max()));
    }

    /// Linear rates never increase and end near zero
    #[test]
    fn linear_non_increasing(rate in 0.01f64..2.0, t_max in 1usize..2000) {
        let mut decay = LinearDecay::new(rate, t_max).unwrap();
        let mut prev = decay.get_dr();
        for _ in 0..t_max {
            decay.step(None);
            prop_assert!(decay.get_dr() <= prev);
            prev = decay.get_dr();
        }
        prop_assert!(decay.get_dr().abs() < 1e-9);
    }

    /// Cosine hits its floor exactly past the horizon
    #[test]
    fn cosine_floor_exact(rate in 0.01f64..2.0, t_max in 1usize..2000, floor in 0.0f64..0.01, extra in 0usize..100) {
        let mut decay = CosineDecay::new(rate, t_max, floor).unwrap();
        decay.step(Some(t_max + extra));
        prop_assert_eq!(decay.get_dr(), floor);
    }
}
