//! Property-based tests for the epoch algebra
//!
//! These pin the container invariants (canonical sort, non-mutation) and
//! the algebraic guarantees (gap closure, span preservation, merge
//! idempotence) across randomized interval sets.

use epoch_core::{Epoch, FillMethod};
use proptest::prelude::*;

fn arbitrary_epoch() -> impl Strategy<Value = Epoch> {
    prop::collection::vec((0.0f64..1000.0, 0.0f64..50.0, 0usize..3), 0..40).prop_map(|raw| {
        let labels = ["", "rem", "nrem"];
        let intervals = raw
            .iter()
            .map(|&(start, len, label)| {
                epoch_core::Interval::with_label(start, start + len, labels[label])
            })
            .collect();
        Epoch::new(intervals).expect("generated intervals are valid")
    })
}

proptest! {
    // Canonical order: every construction yields non-decreasing starts
    #[test]
    fn prop_starts_sorted(ep in arbitrary_epoch()) {
        let starts = ep.starts();
        prop_assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    // Every internal gap closes, whatever the policy
    #[test]
    fn prop_fill_blank_closes_gaps(
        ep in arbitrary_epoch(),
        method in prop::sample::select(vec![
            FillMethod::FromLeft,
            FillMethod::FromRight,
            FillMethod::FromNearest,
        ]),
    ) {
        // gap closure is only meaningful on non-overlapping sets
        let ep = ep.merge(0.0);
        let filled = ep.fill_blank(method);
        let starts = filled.starts();
        let stops = filled.stops();
        for i in 1..filled.len() {
            prop_assert_eq!(stops[i - 1], starts[i]);
        }
    }

    // Only internal boundaries move: the total span is untouched
    #[test]
    fn prop_fill_blank_preserves_span(
        ep in arbitrary_epoch(),
        method in prop::sample::select(vec![
            FillMethod::FromLeft,
            FillMethod::FromRight,
            FillMethod::FromNearest,
        ]),
    ) {
        prop_assume!(!ep.is_empty());
        let ep = ep.merge(0.0);
        let filled = ep.fill_blank(method);
        let first_start = ep.starts()[0];
        let last_stop = ep.stops().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(filled.starts()[0], first_start);
        let filled_last = filled.stops().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(filled_last, last_stop);
    }

    // After one merge pass all remaining gaps are >= dt, so a second pass
    // changes nothing
    #[test]
    fn prop_merge_idempotent(ep in arbitrary_epoch(), dt in 0.0f64..20.0) {
        let once = ep.merge(dt);
        let twice = once.merge(dt);
        prop_assert_eq!(once.spans(), twice.spans());
    }

    // A merge bridging every gap leaves a non-overlapping set
    #[test]
    fn prop_merge_large_dt_never_overlaps(ep in arbitrary_epoch()) {
        prop_assert!(!ep.merge(2000.0).is_overlapping());
    }

    // Operations never mutate their input
    #[test]
    fn prop_non_mutation(ep in arbitrary_epoch(), dt in -10.0f64..10.0) {
        let starts = ep.starts();
        let stops = ep.stops();
        let labels: Vec<String> = ep.labels().iter().map(|s| s.to_string()).collect();

        let _ = ep.shift(dt);
        let _ = ep.merge(dt.abs());
        let _ = ep.merge_neighbors();
        let _ = ep.fill_blank(FillMethod::FromNearest);
        let _ = ep.duration_slice(Some(1.0), None);
        let _ = ep.label_slice(&["rem"]);
        let _ = ep.delete_in_between(0.0, 100.0);

        prop_assert_eq!(ep.starts(), starts);
        prop_assert_eq!(ep.stops(), stops);
        let after: Vec<String> = ep.labels().iter().map(|s| s.to_string()).collect();
        prop_assert_eq!(after, labels);
    }

    // Label proportions never account for more than the whole window
    #[test]
    fn prop_proportions_bounded(ep in arbitrary_epoch()) {
        prop_assume!(!ep.is_empty());
        let ep = ep.merge(0.0);
        let props = ep.proportion_by_label(None, None).unwrap();
        let total: f64 = props.values().sum();
        prop_assert!(total <= 1.0 + 1e-9, "total proportion {} exceeds 1", total);
    }

    // to_records round-trips the canonical schema exactly
    #[test]
    fn prop_record_round_trip(ep in arbitrary_epoch()) {
        let back = Epoch::from_records(&ep.to_records()).unwrap();
        prop_assert_eq!(back.starts(), ep.starts());
        prop_assert_eq!(back.stops(), ep.stops());
        prop_assert_eq!(back.labels(), ep.labels());
    }
}

#[test]
fn boolean_round_trip_vector() {
    let ep = Epoch::from_boolean_signal(
        &[false, true, true, false, true],
        Some(&[0.0, 1.0, 2.0, 3.0, 4.0]),
    )
    .unwrap();
    assert_eq!(ep.spans(), vec![(1.0, 2.0), (4.0, 4.0)]);
    assert_eq!(ep.labels(), vec!["high", "high"]);
}

#[test]
fn overlap_detection_vector() {
    let pair = Epoch::from_arrays(&[0.0, 3.0], &[5.0, 8.0]).unwrap();
    assert!(pair.is_overlapping());
    assert!(!pair.merge(10.0).is_overlapping());
}
