//! Run-length constructors from sampled signals
//!
//! Builds epoch sets out of per-sample indicator or category signals: one
//! interval per maximal run. Boundaries are expressed in sample-index
//! units unless a time base is given.

use crate::epoch::Epoch;
use crate::error::{Error, Result};
use crate::interval::Interval;

fn check_times(times: Option<&[f64]>, n: usize, context: &str) -> Result<()> {
    if let Some(t) = times {
        if t.len() != n {
            return Err(Error::length_mismatch(n, t.len(), context));
        }
    }
    Ok(())
}

impl Epoch {
    /// One interval per maximal run of `true`, labeled `"high"`
    ///
    /// A run's stop is its last `true` sample, so a run reaching the end of
    /// the signal never indexes past it; a single-sample run yields a
    /// zero-length interval. Without `times` the boundaries are sample
    /// indices.
    pub fn from_boolean_signal(signal: &[bool], times: Option<&[f64]>) -> Result<Self> {
        check_times(times, signal.len(), "from_boolean_signal times")?;
        let at = |i: usize| times.map_or(i as f64, |t| t[i]);

        let mut intervals = Vec::new();
        let mut run_start: Option<usize> = None;
        for (i, &high) in signal.iter().enumerate() {
            match (high, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    intervals.push(Interval::with_label(at(start), at(i - 1), "high"));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            intervals.push(Interval::with_label(at(start), at(signal.len() - 1), "high"));
        }
        Self::new(intervals)
    }

    /// One interval per maximal run of a repeated categorical value
    ///
    /// Each interval is labeled with its run's value and stops at the
    /// start of the following run; a run reaching the end of the signal is
    /// clamped to the final sample. Boundaries are `dt`-spaced unless
    /// `times` gives exact placement.
    pub fn from_categorical_signal<S: AsRef<str>>(
        values: &[S],
        dt: f64,
        times: Option<&[f64]>,
    ) -> Result<Self> {
        check_times(times, values.len(), "from_categorical_signal times")?;
        let n = values.len();
        if n == 0 {
            return Self::new(Vec::new());
        }
        let at = |i: usize| times.map_or(i as f64 * dt, |t| t[i]);

        let mut intervals = Vec::new();
        let mut run_start = 0;
        for i in 1..=n {
            if i < n && values[i].as_ref() == values[run_start].as_ref() {
                continue;
            }
            // the exclusive edge of the final run would read past the signal
            let stop = if i == n { n - 1 } else { i };
            intervals.push(Interval::with_label(
                at(run_start),
                at(stop),
                values[run_start].as_ref(),
            ));
            run_start = i;
        }
        Self::new(intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_signal_with_times() {
        let signal = [false, true, true, false, true];
        let times = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ep = Epoch::from_boolean_signal(&signal, Some(&times)).unwrap();
        assert_eq!(ep.spans(), vec![(1.0, 2.0), (4.0, 4.0)]);
        assert_eq!(ep.labels(), vec!["high", "high"]);
    }

    #[test]
    fn test_boolean_signal_sample_units() {
        let signal = [true, true, false, false, true, true, true];
        let ep = Epoch::from_boolean_signal(&signal, None).unwrap();
        assert_eq!(ep.spans(), vec![(0.0, 1.0), (4.0, 6.0)]);
    }

    #[test]
    fn test_boolean_signal_all_low() {
        let ep = Epoch::from_boolean_signal(&[false, false, false], None).unwrap();
        assert!(ep.is_empty());
    }

    #[test]
    fn test_boolean_signal_times_length_mismatch() {
        let err = Epoch::from_boolean_signal(&[true], Some(&[0.0, 1.0])).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_categorical_signal_dt() {
        let values = ["a", "a", "b", "c", "c"];
        let ep = Epoch::from_categorical_signal(&values, 1.0, None).unwrap();
        assert_eq!(
            ep.iter()
                .map(|iv| (iv.start, iv.stop, iv.label.as_str()))
                .collect::<Vec<_>>(),
            vec![(0.0, 2.0, "a"), (2.0, 3.0, "b"), (3.0, 4.0, "c")]
        );
    }

    #[test]
    fn test_categorical_signal_dt_scaling() {
        let values = ["x", "y"];
        let ep = Epoch::from_categorical_signal(&values, 0.5, None).unwrap();
        assert_eq!(ep.spans(), vec![(0.0, 0.5), (0.5, 0.5)]);
    }

    #[test]
    fn test_categorical_signal_times_override_dt() {
        let values = ["a", "a", "b"];
        let times = [10.0, 11.0, 12.0];
        let ep = Epoch::from_categorical_signal(&values, 99.0, Some(&times)).unwrap();
        assert_eq!(ep.spans(), vec![(10.0, 12.0), (12.0, 12.0)]);
    }

    #[test]
    fn test_categorical_signal_adjacent_runs_share_boundaries() {
        let values = ["a", "b", "b", "a"];
        let ep = Epoch::from_categorical_signal(&values, 1.0, None).unwrap();
        let stops = ep.stops();
        let starts = ep.starts();
        for i in 1..ep.len() {
            assert_eq!(stops[i - 1], starts[i]);
        }
        // same-label neighbor merge closes nothing here: runs alternate
        assert_eq!(ep.merge_neighbors().len(), 3);
    }

    #[test]
    fn test_categorical_signal_empty() {
        let ep = Epoch::from_categorical_signal::<&str>(&[], 1.0, None).unwrap();
        assert!(ep.is_empty());
    }
}
