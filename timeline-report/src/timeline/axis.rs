// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::aggregator::RunWindow;
use chrono::{DateTime, FixedOffset};

pub(crate) const MSEC_PER_MINUTE: i64 = 60 * 1000;

/// The displayed end rounds up to the next minute when the window's
/// remainder within its final minute reaches this; below it, it truncates.
const ROUND_UP_THRESHOLD_MS: i64 = 30 * 1000;

/// The shared time axis for all charts in one run.
///
/// All instants are displayed relative to `offset_ms`, which shifts the run
/// start by the timezone's minute offset so that instants render as
/// wall-clock time-of-day beginning at `00:00:00`, regardless of the run's
/// absolute date.
#[derive(Clone, Copy, Debug)]
pub struct ChartAxis {
    start_ms: i64,
    offset_ms: i64,
    rounded_end_ms: i64,
    tz: FixedOffset,
}

impl ChartAxis {
    /// Computes the axis for a run window in the given timezone.
    pub fn new(window: RunWindow, tz: FixedOffset) -> Self {
        let offset_ms = window.start_ms() - tz_offset_minutes(tz) * MSEC_PER_MINUTE;

        // Round the end milestone to a whole-minute boundary: up when the
        // window lands in the second half of its final minute, down
        // otherwise. The remainder is taken over the whole window, relative
        // to the start, not over the end instant's own minute.
        let within_minute = (window.end_ms() - window.start_ms()) % MSEC_PER_MINUTE;
        let adjust = if within_minute >= ROUND_UP_THRESHOLD_MS {
            MSEC_PER_MINUTE - within_minute
        } else {
            -within_minute
        };

        Self {
            start_ms: window.start_ms(),
            offset_ms,
            rounded_end_ms: window.end_ms() + adjust,
            tz,
        }
    }

    /// The run start instant, in epoch milliseconds.
    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// The displayed end instant: the run end, rounded per the axis policy.
    ///
    /// The rounding affects only the End milestone, never test bars.
    pub fn rounded_end_ms(&self) -> i64 {
        self.rounded_end_ms
    }

    /// Formats an absolute instant as `HH:MM:SS` on the shared axis.
    pub fn time_of_day(&self, instant_ms: i64) -> String {
        DateTime::from_timestamp_millis(instant_ms - self.offset_ms)
            .map(|dt| dt.with_timezone(&self.tz).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "00:00:00".to_owned())
    }

    /// The one-second display bucket an absolute instant falls into.
    pub fn display_second(&self, instant_ms: i64) -> i64 {
        (instant_ms - self.offset_ms).div_euclid(1000)
    }
}

/// Minutes west of UTC, matching the sign convention of JavaScript's
/// `Date.getTimezoneOffset` (UTC+09:00 is -540).
fn tz_offset_minutes(tz: FixedOffset) -> i64 {
    -i64::from(tz.local_minus_utc()) / 60
}
