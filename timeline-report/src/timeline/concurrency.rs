// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{aggregator::ConcurrencyDelta, timeline::axis::ChartAxis};

/// One point of the concurrency time series: how many tests were in flight
/// at a display instant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConcurrencyPoint {
    /// The one-second display bucket this point falls into.
    pub(crate) second: i64,

    /// The instant as `HH:MM:SS` on the shared axis.
    pub time: String,

    /// The number of simultaneously running tests from this instant on.
    pub workers: i32,
}

/// Sweeps the raw start/end deltas into a coalesced time series.
///
/// Deltas are sorted by instant with a stable sort, so coincident instants
/// keep their arrival order and a start paired with an end at the same
/// instant cancels out. Points landing in the same one-second bucket collapse
/// into one, keeping the last cumulative count (last-write-wins).
pub(crate) fn sweep(mut deltas: Vec<ConcurrencyDelta>, axis: &ChartAxis) -> Vec<ConcurrencyPoint> {
    deltas.sort_by_key(|delta| delta.instant_ms);

    let mut points: Vec<ConcurrencyPoint> = Vec::with_capacity(deltas.len());
    // Signed on purpose: pairing guarantees this never goes negative, but a
    // stray end-before-start must not wrap or panic.
    let mut workers = 0i32;
    for delta in deltas {
        workers += delta.delta;
        let second = axis.display_second(delta.instant_ms);
        match points.last_mut() {
            Some(last) if last.second == second => last.workers = workers,
            _ => points.push(ConcurrencyPoint {
                second,
                time: axis.time_of_day(delta.instant_ms),
                workers,
            }),
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::RunWindow;
    use chrono::FixedOffset;

    const START: i64 = 1_715_335_200_000;

    fn axis(end_ms: i64) -> ChartAxis {
        let mut window = RunWindow::default();
        window.observe(START, end_ms);
        ChartAxis::new(window, FixedOffset::east_opt(0).expect("valid offset"))
    }

    fn delta(offset_ms: i64, delta: i32) -> ConcurrencyDelta {
        ConcurrencyDelta {
            instant_ms: START + offset_ms,
            delta,
        }
    }

    #[test]
    fn deltas_in_the_same_second_coalesce() {
        let axis = axis(START + 10_000);
        let points = sweep(
            vec![delta(0, 1), delta(400, 1), delta(2_000, -1), delta(2_500, -1)],
            &axis,
        );

        assert_eq!(points.len(), 2);
        // Two starts 400ms apart merge into one point with the summed count.
        assert_eq!(points[0].time, "00:00:00");
        assert_eq!(points[0].workers, 2);
        assert_eq!(points[1].time, "00:00:02");
        assert_eq!(points[1].workers, 0);
    }

    #[test]
    fn zero_duration_test_nets_out() {
        let axis = axis(START + 10_000);
        // A zero-duration test between two longer ones: its +1/-1 land on the
        // same instant and cancel within the bucket.
        let points = sweep(
            vec![delta(0, 1), delta(1_000, 1), delta(1_000, -1), delta(5_000, -1)],
            &axis,
        );

        assert_eq!(points.len(), 3);
        assert_eq!(points[1].time, "00:00:01");
        assert_eq!(points[1].workers, 1);
    }

    #[test]
    fn unsorted_arrival_is_resorted() {
        let axis = axis(START + 10_000);
        let points = sweep(vec![delta(3_000, -1), delta(0, 1)], &axis);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].workers, 1);
        assert_eq!(points[1].workers, 0);
    }

    #[test]
    fn empty_run_sweeps_to_nothing() {
        let axis = axis(START);
        assert!(sweep(Vec::new(), &axis).is_empty());
    }
}
