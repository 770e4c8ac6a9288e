// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate a stream of test run events into timeline charts.
//!
//! This crate consumes "test finished" events produced by an external test
//! framework (one per completed attempt, carrying a hierarchical title path,
//! start time, duration, status and retry index) and renders a Markdown
//! artifact summarizing how the run unfolded: a Vega-Lite chart of test
//! concurrency over time, followed by one Mermaid Gantt chart per section.
//!
//! ```
//! use chrono::DateTime;
//! use timeline_report::{RunAggregator, TestEvent, TestStatus, TimelineOptions};
//!
//! let mut aggregator = RunAggregator::new();
//! aggregator.record(&TestEvent {
//!     title_path: vec![
//!         "".to_owned(),
//!         "chromium".to_owned(),
//!         "login.spec.ts".to_owned(),
//!         "login".to_owned(),
//!         "works".to_owned(),
//!     ],
//!     start_time: DateTime::parse_from_rfc3339("2024-05-10T10:00:00+00:00")?,
//!     duration_ms: 1500,
//!     status: TestStatus::Passed,
//!     retry: 0,
//! })?;
//!
//! let artifact = aggregator.finish().render(&TimelineOptions::default())?;
//! assert!(artifact.contains("[chromium] login.spec.ts"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod aggregator;
mod errors;
mod events;
mod output;
mod timeline;
mod title_path;

pub use aggregator::*;
pub use errors::*;
pub use events::*;
pub use output::*;
pub use timeline::*;
pub use title_path::*;
