// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compilation of collected run state into the timeline artifact.

mod axis;
mod chart_spec;
mod concurrency;
mod gantt;

pub use axis::ChartAxis;
pub use concurrency::ConcurrencyPoint;

use crate::{
    aggregator::{ConcurrencyDelta, RunWindow, TestRecord},
    errors::ChartDataError,
};
use chrono::{FixedOffset, Local, Offset};
use indexmap::IndexMap;
use swrite::{SWrite, swriteln};

/// The default pixel width of the concurrency chart.
pub const DEFAULT_CHART_WIDTH: u32 = 600;

/// Options controlling how a [`TimelineReport`] renders.
#[derive(Clone, Debug)]
pub struct TimelineOptions {
    /// Markdown prepended to the artifact.
    pub header: Option<String>,

    /// Markdown appended to the artifact.
    pub footer: Option<String>,

    /// Pixel width forwarded into the concurrency chart spec.
    pub chart_width: u32,

    /// Timezone used to place the time axis. Defaults to the local offset;
    /// set a fixed offset for reproducible output (e.g. in CI).
    pub tz_offset: Option<FixedOffset>,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            header: None,
            footer: None,
            chart_width: DEFAULT_CHART_WIDTH,
            tz_offset: None,
        }
    }
}

/// The final state of a run, ready to render.
///
/// Produced by [`RunAggregator::finish`](crate::RunAggregator::finish).
#[derive(Clone, Debug)]
pub struct TimelineReport {
    window: RunWindow,
    sections: IndexMap<String, Vec<TestRecord>>,
    concurrency: Vec<ConcurrencyDelta>,
}

impl TimelineReport {
    pub(crate) fn new(
        window: RunWindow,
        sections: IndexMap<String, Vec<TestRecord>>,
        concurrency: Vec<ConcurrencyDelta>,
    ) -> Self {
        Self {
            window,
            sections,
            concurrency,
        }
    }

    /// Returns true if the run recorded no events.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The section names, in first-insertion order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Renders the timeline artifact.
    ///
    /// The artifact is a Markdown blob: an optional header, a `vega-lite`
    /// fenced block charting concurrency over time, one `mermaid` fenced
    /// Gantt block per section, and an optional footer. A run with no
    /// recorded events renders an empty concurrency series and no sections.
    pub fn render(&self, options: &TimelineOptions) -> Result<String, ChartDataError> {
        let tz = options
            .tz_offset
            .unwrap_or_else(|| Local::now().offset().fix());
        let axis = ChartAxis::new(self.window, tz);
        let points = concurrency::sweep(self.concurrency.clone(), &axis);

        let mut out = String::new();
        if let Some(header) = &options.header {
            swriteln!(out, "{header}");
            out.push('\n');
        }

        swriteln!(out, "```vega-lite");
        swriteln!(
            out,
            "{}",
            chart_spec::concurrency_chart(&points, options.chart_width)?
        );
        swriteln!(out, "```");
        out.push('\n');

        // The lane count is shared by every section, so the retry maximum is
        // taken over the whole run, not per section.
        let max_retry = self
            .sections
            .values()
            .flatten()
            .map(|record| record.retry)
            .max()
            .unwrap_or(0);
        for (section, records) in &self.sections {
            gantt::write_section(&mut out, section, records, &axis, max_retry);
            out.push('\n');
        }

        if let Some(footer) = &options.footer {
            swriteln!(out, "{footer}");
        }

        Ok(out)
    }
}
