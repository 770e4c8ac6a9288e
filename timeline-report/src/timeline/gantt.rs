// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{aggregator::TestRecord, timeline::axis::ChartAxis};
use swrite::{SWrite, swriteln};

/// Writes one section's Mermaid Gantt block.
///
/// Rows are grouped into retry lanes `0..=max_retry` inclusive. The maximum
/// is the run-wide one, so every section emits the same lanes; a lane with no
/// rows in this section is still emitted. Within a lane, suites appear in
/// first-seen order with a milestone marker each, followed by that suite's
/// rows for the lane's retry index.
pub(crate) fn write_section(
    out: &mut String,
    section: &str,
    records: &[TestRecord],
    axis: &ChartAxis,
    max_retry: u32,
) {
    swriteln!(out, "```mermaid");
    swriteln!(out, "gantt");
    swriteln!(out, "  title {section}");
    out.push('\n');
    swriteln!(out, "  todayMarker off");
    swriteln!(out, "  dateFormat  HH:mm:ss");
    swriteln!(out, "  axisFormat  %H:%M");
    swriteln!(out, "  tickInterval 1minute");
    out.push('\n');

    for retry in 0..=max_retry {
        if retry == 0 {
            swriteln!(out, "  section Run");
        } else {
            swriteln!(out, "  section Retry {retry}");
        }

        for suite in lane_suites(records, retry) {
            swriteln!(
                out,
                "    \"{}\" : milestone, {}, 1min",
                sanitize(suite),
                axis.time_of_day(axis.start_ms())
            );
            for record in records
                .iter()
                .filter(|record| record.retry == retry && record.suite_name == suite)
            {
                swriteln!(
                    out,
                    "    \"{}\": {}, {}, {}s",
                    sanitize(&record.test_name),
                    record.status.chart_token(),
                    axis.time_of_day(record.start_ms),
                    record.duration_ms as f64 / 1000.0
                );
            }
        }
    }

    swriteln!(out, "  section End");
    swriteln!(
        out,
        "    E : milestone, {}, 1min",
        axis.time_of_day(axis.rounded_end_ms())
    );
    swriteln!(out, "```");
}

/// Distinct suite names for one retry lane, in first-seen order.
fn lane_suites(records: &[TestRecord], retry: u32) -> Vec<&str> {
    let mut suites: Vec<&str> = Vec::new();
    for record in records.iter().filter(|record| record.retry == retry) {
        if !suites.contains(&record.suite_name.as_str()) {
            suites.push(&record.suite_name);
        }
    }
    suites
}

/// Strips characters that are syntactically significant in the Gantt DSL.
fn sanitize(label: &str) -> String {
    label.chars().filter(|c| !matches!(c, '#' | ':')).collect()
}
