// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A completed test attempt, as reported by an external test framework.
///
/// Events are produced externally (for example by a test runner's reporter
/// hook, or replayed from a JSON Lines stream) and consumed by a
/// [`RunAggregator`](crate::RunAggregator). One event is expected per attempt:
/// a test retried twice produces three events with `retry` 0, 1 and 2.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEvent {
    /// The hierarchical title path: two framework prefix segments (root and
    /// project name), the spec file name, zero or more nested suite titles,
    /// and finally the test title.
    pub title_path: Vec<String>,

    /// The time at which this attempt began, including the offset from UTC.
    pub start_time: DateTime<FixedOffset>,

    /// How long the attempt took, in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,

    /// The outcome of the attempt.
    pub status: TestStatus,

    /// The retry index: 0 for the original attempt.
    pub retry: u32,
}

/// The outcome of a single test attempt.
///
/// The four well-known outcomes map to fixed chart tokens; anything else is
/// carried through verbatim so that new framework statuses degrade gracefully
/// rather than erroring.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    /// The attempt passed.
    Passed,

    /// The attempt was skipped.
    Skipped,

    /// The attempt failed.
    Failed,

    /// The attempt hit its timeout.
    TimedOut,

    /// A status string this crate doesn't know about.
    Other(String),
}

impl TestStatus {
    /// Returns the canonical string form of this status.
    pub fn as_str(&self) -> &str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Skipped => "skipped",
            TestStatus::Failed => "failed",
            TestStatus::TimedOut => "timedOut",
            TestStatus::Other(status) => status,
        }
    }

    /// Returns the Mermaid Gantt task token for this status.
    ///
    /// Unknown statuses pass through unchanged.
    pub fn chart_token(&self) -> &str {
        match self {
            TestStatus::Passed => "active",
            TestStatus::Skipped => "done",
            TestStatus::Failed | TestStatus::TimedOut => "crit",
            TestStatus::Other(status) => status,
        }
    }
}

impl From<String> for TestStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "passed" => TestStatus::Passed,
            "skipped" => TestStatus::Skipped,
            "failed" => TestStatus::Failed,
            "timedOut" | "timed-out" => TestStatus::TimedOut,
            _ => TestStatus::Other(status),
        }
    }
}

impl From<TestStatus> for String {
    fn from(status: TestStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(TestStatus::Passed, "active"; "passed maps to active")]
    #[test_case(TestStatus::Skipped, "done"; "skipped maps to done")]
    #[test_case(TestStatus::Failed, "crit"; "failed maps to crit")]
    #[test_case(TestStatus::TimedOut, "crit"; "timed out maps to crit")]
    #[test_case(TestStatus::Other("interrupted".to_owned()), "interrupted"; "unknown passes through")]
    fn chart_tokens(status: TestStatus, expected: &str) {
        assert_eq!(status.chart_token(), expected);
    }

    #[test]
    fn status_string_round_trip() {
        for input in ["passed", "skipped", "failed", "timedOut", "interrupted"] {
            let status = TestStatus::from(input.to_owned());
            assert_eq!(status.as_str(), input);
        }
        // The hyphenated spelling is accepted but normalizes to camelCase.
        assert_eq!(TestStatus::from("timed-out".to_owned()), TestStatus::TimedOut);
    }

    #[test]
    fn event_from_json_line() {
        let line = r#"{
            "titlePath": ["", "chromium", "auth.spec.ts", "login", "rejects bad password"],
            "startTime": "2024-05-10T10:00:00.000+09:00",
            "duration": 1250,
            "status": "failed",
            "retry": 1
        }"#;
        let event: TestEvent = serde_json::from_str(line).expect("event deserializes");
        assert_eq!(event.title_path.len(), 5);
        assert_eq!(event.duration_ms, 1250);
        assert_eq!(event.status, TestStatus::Failed);
        assert_eq!(event.retry, 1);
    }
}
