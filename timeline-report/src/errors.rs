// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by timeline-report.

use crate::title_path::MIN_SEGMENTS;
use camino::Utf8PathBuf;
use std::{error, io};
use thiserror::Error;

/// A title path was too short to resolve into section, suite and test names.
///
/// Returned by [`NormalizedPath::parse`](crate::NormalizedPath::parse) and
/// [`RunAggregator::record`](crate::RunAggregator::record).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error(
    "title path has {found} segments, but at least {MIN_SEGMENTS} are required \
     (two project prefix segments, a file name, and a test title)"
)]
pub struct InvalidTitlePath {
    found: usize,
}

impl InvalidTitlePath {
    pub(crate) fn new(found: usize) -> Self {
        Self { found }
    }
}

/// An error that occurs while serializing the concurrency chart data.
///
/// Returned by [`TimelineReport::render`](crate::TimelineReport::render).
#[derive(Debug, Error)]
#[error("error serializing concurrency chart data")]
pub struct ChartDataError {
    #[from]
    inner: serde_json::Error,
}

/// An error that occurs while writing a rendered report to its destination.
#[derive(Debug, Error)]
pub enum WriteReportError {
    /// An error occurred while operating on the file system.
    #[error("error writing report to `{path}`")]
    Fs {
        /// The file or directory being written.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The downstream HTML conversion step failed.
    #[error("error converting report to HTML")]
    Convert {
        /// The error returned by the converter.
        #[source]
        error: Box<dyn error::Error + Send + Sync>,
    },

    /// An error occurred while writing to standard output.
    #[error("error writing report to standard output")]
    Stdout {
        /// The underlying error.
        #[source]
        error: io::Error,
    },
}
