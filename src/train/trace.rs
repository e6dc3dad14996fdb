//! Sampled rate curves.

use serde::Serialize;

use crate::decay::{DecayMode, DecaySchedule, PruneRateDecay};

/// One sampled row of a rate curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    /// Schedule step the row was sampled at.
    pub step: usize,
    /// Target sparsity at `step` for cumulative schedules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparsity: Option<f64>,
    /// Rate produced at `step`.
    pub rate: f64,
}

/// Rate curve of a schedule sampled over a step range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTrace {
    /// Registry name of the sampled schedule.
    pub schedule: String,
    /// How the rates are interpreted.
    pub mode: DecayMode,
    /// Sampled rows in step order.
    pub points: Vec<TracePoint>,
}

impl RateTrace {
    /// Sample `schedule` at `0, every, 2 * every, ..` up to and including
    /// `until`.
    ///
    /// Each row seeks a copy of the schedule, so the caller's schedule is
    /// left untouched. `every` of zero is treated as one.
    pub fn sample(schedule: &DecaySchedule, until: usize, every: usize) -> Self {
        let mut probe = *schedule;
        let points = (0..=until)
            .step_by(every.max(1))
            .map(|step| {
                probe.step(Some(step));
                let sparsity = match &probe {
                    DecaySchedule::MagnitudePrune(decay) => {
                        Some(decay.cumulative_sparsity(probe.step_index()))
                    }
                    _ => None,
                };
                TracePoint { step, sparsity, rate: probe.get_dr() }
            })
            .collect();

        Self { schedule: schedule.name().to_string(), mode: schedule.mode(), points }
    }

    /// Sample the schedule's whole horizon.
    pub fn full(schedule: &DecaySchedule, every: usize) -> Self {
        Self::sample(schedule, schedule.t_max(), every)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no rows were sampled.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the sampled rates.
    pub fn total_rate(&self) -> f64 {
        self.points.iter().map(|p| p.rate).sum()
    }

    /// Render as an aligned text table.
    pub fn to_table(&self) -> String {
        let mut out = format!("# {} ({})\n", self.schedule, self.mode.as_str());
        out.push_str(&format!("{:>10}  {:>12}  {:>14}\n", "step", "sparsity", "rate"));
        for point in &self.points {
            let sparsity = point.sparsity.map_or_else(|| "-".to_string(), |s| format!("{s:.6}"));
            out.push_str(&format!("{:>10}  {:>12}  {:>14.8}\n", point.step, sparsity, point.rate));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decay::{CosineDecay, LinearDecay, MagnitudePruneDecay};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sample_includes_endpoint() {
        // TEST_ID: TRACE-001
        let schedule = DecaySchedule::from(LinearDecay::new(0.5, 10).unwrap());
        let trace = RateTrace::sample(&schedule, 10, 5);
        let steps: Vec<usize> = trace.points.iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![0, 5, 10], "FALSIFIED TRACE-001: rows must include 0 and until");
        assert_abs_diff_eq!(trace.points[2].rate, 0.0, epsilon = 1e-12);
        assert!(trace.points.iter().all(|p| p.sparsity.is_none()));
    }

    #[test]
    fn test_sample_leaves_schedule_untouched() {
        // TEST_ID: TRACE-002
        let schedule = DecaySchedule::from(CosineDecay::new(0.3, 100, 0.0).unwrap());
        let before = schedule;
        let trace = RateTrace::full(&schedule, 10);
        assert_eq!(schedule, before, "FALSIFIED TRACE-002: sampling mutated the schedule");
        assert_eq!(trace.len(), 11);
        assert_eq!(trace.mode, DecayMode::Current);
    }

    #[test]
    fn test_magnitude_trace_reports_sparsity() {
        // TEST_ID: TRACE-003
        let schedule =
            DecaySchedule::from(MagnitudePruneDecay::new(0.0, 0.3, 65000, 700, 100).unwrap());
        let trace = RateTrace::sample(&schedule, 65000, 100);
        assert_eq!(trace.mode, DecayMode::Cumulative);
        let last = trace.points.last().unwrap();
        assert_abs_diff_eq!(last.sparsity.unwrap(), 0.3, epsilon = 1e-12);
        // Deltas telescope to the final sparsity when sampled every interval.
        assert_abs_diff_eq!(trace.total_rate(), 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_table_and_json_rendering() {
        // TEST_ID: TRACE-004
        let schedule = DecaySchedule::from(LinearDecay::new(0.2, 4).unwrap());
        let trace = RateTrace::sample(&schedule, 4, 2);
        let table = trace.to_table();
        assert!(table.starts_with("# linear (current)"));
        assert_eq!(table.lines().count(), 2 + 3);

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["schedule"], "linear");
        assert_eq!(json["mode"], "current");
        assert!(json["points"][0].get("sparsity").is_none());
    }

    #[test]
    fn test_zero_every_is_one() {
        let schedule = DecaySchedule::from(LinearDecay::new(0.2, 4).unwrap());
        assert!(!RateTrace::sample(&schedule, 3, 0).is_empty());
        assert_eq!(RateTrace::sample(&schedule, 3, 0).len(), 4);
    }
}
