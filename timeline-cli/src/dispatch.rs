// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::html::MermaidHtml;
use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::io::{self, BufRead, BufReader};
use timeline_report::{
    DEFAULT_CHART_WIDTH, ReportOutput, RunAggregator, TestEvent, TimelineOptions, write_report,
};
use tracing::{debug, warn};

/// Render a test run event stream as timeline charts.
///
/// Reads completed-test events as JSON Lines and produces a Markdown report:
/// a concurrency-over-time chart followed by one Gantt chart per spec file.
#[derive(Debug, Parser)]
#[command(version, bin_name = "test-timeline")]
pub struct App {
    /// Path to a JSON Lines event stream, or `-` for standard input
    #[arg(value_name = "EVENTS", default_value = "-")]
    input: Utf8PathBuf,

    /// Write the report to this file instead of standard output
    ///
    /// Destinations ending in `.html` or `.htm` are converted to a
    /// standalone HTML document with embedded chart rendering.
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<Utf8PathBuf>,

    /// Markdown prepended to the report
    #[arg(long, value_name = "MARKDOWN", default_value = "## Test Timeline")]
    header: String,

    /// Markdown appended to the report
    #[arg(long, value_name = "MARKDOWN")]
    footer: Option<String>,

    /// Pixel width of the concurrency chart
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_CHART_WIDTH)]
    chart_width: u32,

    /// Document title for HTML output
    #[arg(long, value_name = "TITLE", default_value = "Test Timeline")]
    title: String,
}

impl App {
    /// Executes the app.
    pub fn exec(self) -> Result<()> {
        let aggregator = self.collect_events()?;
        debug!("collected {} events", aggregator.event_count());

        let artifact = aggregator
            .finish()
            .render(&self.options())
            .wrap_err("failed to render timeline report")?;

        let output = match &self.output {
            Some(path) => ReportOutput::File(path.clone()),
            None => ReportOutput::Stdout,
        };

        // The write step awaits the HTML conversion collaborator.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("failed to build tokio runtime")?;
        runtime.block_on(write_report(&artifact, &self.title, &output, &MermaidHtml))?;
        Ok(())
    }

    fn options(&self) -> TimelineOptions {
        TimelineOptions {
            // `--header ""` means no header at all, not an empty line.
            header: Some(self.header.clone()).filter(|header| !header.is_empty()),
            footer: self.footer.clone(),
            chart_width: self.chart_width,
            tz_offset: None,
        }
    }

    fn collect_events(&self) -> Result<RunAggregator> {
        let reader: Box<dyn BufRead> = if self.input == "-" {
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = std::fs::File::open(&self.input)
                .wrap_err_with(|| format!("failed to open event stream `{}`", self.input))?;
            Box::new(BufReader::new(file))
        };

        let mut aggregator = RunAggregator::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.wrap_err("failed to read event stream")?;
            if line.trim().is_empty() {
                continue;
            }
            let event: TestEvent = serde_json::from_str(&line)
                .wrap_err_with(|| format!("malformed event on line {}", index + 1))?;
            // A title path too short to group is a per-event defect, not a
            // run-level failure: warn and keep going.
            if let Err(error) = aggregator.record(&event) {
                warn!("skipping event on line {}: {error}", index + 1);
            }
        }
        Ok(aggregator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    #[test]
    fn defaults() {
        let app = App::try_parse_from(["test-timeline"]).expect("args parse");
        assert_eq!(app.input, "-");
        assert!(app.output.is_none());
        assert_eq!(app.header, "## Test Timeline");
        assert_eq!(app.chart_width, DEFAULT_CHART_WIDTH);
    }

    #[test]
    fn empty_header_means_no_header() {
        let app = App::try_parse_from(["test-timeline", "--header", ""]).expect("args parse");
        assert_eq!(app.options().header, None);

        let app = App::try_parse_from(["test-timeline"]).expect("args parse");
        assert_eq!(app.options().header.as_deref(), Some("## Test Timeline"));
    }

    #[test]
    fn malformed_title_paths_are_skipped() {
        let dir = camino_tempfile::Utf8TempDir::new().expect("temp dir created");
        let path = dir.path().join("events.jsonl");
        let mut file = std::fs::File::create(&path).expect("file created");
        file.write_all(
            indoc! {r#"
                {"titlePath": ["", "p", "a.spec.ts", "s", "ok"], "startTime": "2024-05-10T10:00:00+00:00", "duration": 100, "status": "passed", "retry": 0}

                {"titlePath": ["orphan"], "startTime": "2024-05-10T10:00:01+00:00", "duration": 100, "status": "passed", "retry": 0}
            "#}
            .as_bytes(),
        )
        .expect("events written");

        let app = App::try_parse_from(["test-timeline", path.as_str()]).expect("args parse");
        let aggregator = app.collect_events().expect("stream collects");
        assert_eq!(aggregator.event_count(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = camino_tempfile::Utf8TempDir::new().expect("temp dir created");
        let path = dir.path().join("events.jsonl");
        std::fs::write(&path, "{not json}\n").expect("events written");

        let app = App::try_parse_from(["test-timeline", path.as_str()]).expect("args parse");
        let error = app.collect_events().expect_err("collection fails");
        assert!(error.to_string().contains("line 1"));
    }
}
