// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `test-timeline` command-line interface.
//!
//! Reads a JSON Lines stream of completed-test events and writes a timeline
//! report (Markdown, or a standalone HTML document for `.html` destinations).

mod dispatch;
mod html;

pub use dispatch::App;
pub use html::MermaidHtml;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Initializes the logger from the `TIMELINE_LOG` environment variable.
///
/// An empty or unset variable means the default INFO filter.
pub fn init_logger() {
    let level_str = std::env::var("TIMELINE_LOG").unwrap_or_default();
    let targets = if level_str.is_empty() {
        Targets::new().with_default(LevelFilter::INFO)
    } else {
        level_str.parse().expect("unable to parse TIMELINE_LOG")
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(targets);

    tracing_subscriber::registry().with(layer).init();
}
