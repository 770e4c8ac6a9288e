// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collection of test events into per-run aggregate state.

use crate::{
    errors::InvalidTitlePath,
    events::{TestEvent, TestStatus},
    timeline::TimelineReport,
    title_path::NormalizedPath,
};
use indexmap::IndexMap;

/// The observed time window of a run: the earliest start and latest end
/// instant over all recorded events.
///
/// Both bounds are epoch milliseconds, with 0 meaning "no event observed
/// yet". The start only ever decreases and the end only ever increases, so
/// the final values are independent of event arrival order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunWindow {
    start_ms: i64,
    end_ms: i64,
}

impl RunWindow {
    pub(crate) fn observe(&mut self, start_ms: i64, end_ms: i64) {
        self.start_ms = if self.start_ms == 0 {
            start_ms
        } else {
            self.start_ms.min(start_ms)
        };
        self.end_ms = self.end_ms.max(end_ms);
    }

    /// The earliest observed start instant, in epoch milliseconds.
    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// The latest observed end instant, in epoch milliseconds.
    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    /// Returns true if no events have been observed.
    pub fn is_empty(&self) -> bool {
        self.start_ms == 0 && self.end_ms == 0
    }
}

/// One recorded test attempt, normalized for chart emission.
#[derive(Clone, Debug)]
pub struct TestRecord {
    /// Nested suite titles joined with `" > "`, or the no-suite sentinel.
    pub suite_name: String,

    /// The test title.
    pub test_name: String,

    /// The attempt's start instant, in epoch milliseconds.
    pub start_ms: i64,

    /// How long the attempt took, in milliseconds.
    pub duration_ms: u64,

    /// The outcome of the attempt.
    pub status: TestStatus,

    /// The retry index: 0 for the original attempt.
    pub retry: u32,
}

/// A signed point event for the concurrency sweep: `+1` when a test starts,
/// `-1` when it ends.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ConcurrencyDelta {
    pub(crate) instant_ms: i64,
    pub(crate) delta: i32,
}

/// Collects test events for one run.
///
/// Construct one aggregator per run, feed every completed attempt to
/// [`record`](Self::record), then call [`finish`](Self::finish) exactly once
/// after the event stream is drained. The aggregator performs no I/O and is
/// driven sequentially by a single caller.
#[derive(Clone, Debug, Default)]
pub struct RunAggregator {
    window: RunWindow,
    sections: IndexMap<String, Vec<TestRecord>>,
    concurrency: Vec<ConcurrencyDelta>,
}

impl RunAggregator {
    /// Creates a new, empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed test attempt.
    ///
    /// Fails only if the event's title path is too short to resolve; such
    /// events leave the aggregator unchanged and may be skipped by the
    /// caller without affecting the rest of the run.
    pub fn record(&mut self, event: &TestEvent) -> Result<(), InvalidTitlePath> {
        let path = NormalizedPath::parse(&event.title_path)?;
        let start_ms = event.start_time.timestamp_millis();
        // Durations come from an untrusted stream; clamp rather than overflow.
        let end_ms = start_ms.saturating_add(i64::try_from(event.duration_ms).unwrap_or(i64::MAX));

        self.window.observe(start_ms, end_ms);
        self.sections
            .entry(path.section)
            .or_default()
            .push(TestRecord {
                suite_name: path.suite_name,
                test_name: path.test_name,
                start_ms,
                duration_ms: event.duration_ms,
                status: event.status.clone(),
                retry: event.retry,
            });
        self.concurrency.push(ConcurrencyDelta {
            instant_ms: start_ms,
            delta: 1,
        });
        self.concurrency.push(ConcurrencyDelta {
            instant_ms: end_ms,
            delta: -1,
        });

        Ok(())
    }

    /// The observed run window so far.
    pub fn window(&self) -> RunWindow {
        self.window
    }

    /// The number of events recorded so far.
    pub fn event_count(&self) -> usize {
        self.concurrency.len() / 2
    }

    /// Consumes the aggregator, producing the report to render.
    pub fn finish(self) -> TimelineReport {
        TimelineReport::new(self.window, self.sections, self.concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use proptest::prelude::*;

    fn event(start_ms: i64, duration_ms: u64) -> TestEvent {
        TestEvent {
            title_path: vec![
                "".to_owned(),
                "chromium".to_owned(),
                "a.spec.ts".to_owned(),
                "suite".to_owned(),
                "test".to_owned(),
            ],
            start_time: DateTime::from_timestamp_millis(start_ms)
                .expect("timestamp in range")
                .fixed_offset(),
            duration_ms,
            status: TestStatus::Passed,
            retry: 0,
        }
    }

    #[test]
    fn window_tracks_min_start_and_max_end() {
        let mut aggregator = RunAggregator::new();
        aggregator.record(&event(5_000, 1_000)).unwrap();
        aggregator.record(&event(2_000, 500)).unwrap();
        aggregator.record(&event(3_000, 10_000)).unwrap();

        let window = aggregator.window();
        assert_eq!(window.start_ms(), 2_000);
        assert_eq!(window.end_ms(), 13_000);
    }

    #[test]
    fn malformed_path_leaves_state_unchanged() {
        let mut aggregator = RunAggregator::new();
        let mut bad = event(1_000, 100);
        bad.title_path.truncate(2);

        aggregator.record(&bad).unwrap_err();
        assert!(aggregator.window().is_empty());
        assert_eq!(aggregator.event_count(), 0);
    }

    #[test]
    fn absurd_duration_saturates_instead_of_overflowing() {
        let mut aggregator = RunAggregator::new();
        aggregator.record(&event(1_000, u64::MAX)).unwrap();

        let window = aggregator.window();
        assert_eq!(window.start_ms(), 1_000);
        assert_eq!(window.end_ms(), i64::MAX);
    }

    #[test]
    fn records_group_by_section_in_arrival_order() {
        let mut aggregator = RunAggregator::new();
        let mut second = event(1_000, 100);
        second.title_path[2] = "b.spec.ts".to_owned();
        let first = event(2_000, 100);

        aggregator.record(&first).unwrap();
        aggregator.record(&second).unwrap();
        aggregator.record(&first).unwrap();

        let report = aggregator.finish();
        let sections: Vec<_> = report.section_names().collect();
        assert_eq!(sections, ["[chromium] a.spec.ts", "[chromium] b.spec.ts"]);
    }

    proptest! {
        // The final window must not depend on the order events arrive in.
        #[test]
        fn window_ignores_arrival_order(
            entries in prop::collection::vec((1_000_000i64..2_000_000_000, 0u64..600_000), 1..40),
        ) {
            let mut forward = RunAggregator::new();
            for &(start, duration) in &entries {
                forward.record(&event(start, duration)).unwrap();
            }

            let mut sorted = entries.clone();
            sorted.sort_unstable();
            sorted.reverse();
            let mut reordered = RunAggregator::new();
            for &(start, duration) in &sorted {
                reordered.record(&event(start, duration)).unwrap();
            }

            prop_assert_eq!(forward.window(), reordered.window());
        }
    }
}
