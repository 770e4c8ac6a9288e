// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writing rendered artifacts to their destination.

use crate::errors::WriteReportError;
use camino::Utf8PathBuf;
use std::{error, fs, io::Write};
use tracing::info;

/// Where a rendered report goes.
#[derive(Clone, Debug)]
pub enum ReportOutput {
    /// Write the raw artifact to standard output.
    Stdout,

    /// Write to a file. Paths with an HTML-like extension are routed through
    /// the HTML conversion step first.
    File(Utf8PathBuf),
}

impl ReportOutput {
    /// Returns true if this destination requires HTML conversion.
    pub fn wants_html(&self) -> bool {
        match self {
            ReportOutput::Stdout => false,
            ReportOutput::File(path) => {
                matches!(path.extension(), Some("html") | Some("htm"))
            }
        }
    }
}

/// The downstream Markdown-to-HTML conversion collaborator.
///
/// Conversion may involve rendering chart blocks through an external service,
/// so the seam is asynchronous; the boundary layer awaits it before the write
/// completes. Artifact generation itself is synchronous and finishes before
/// conversion is attempted.
pub trait RenderHtml {
    /// Converts a Markdown artifact into a standalone HTML document.
    fn render_html(
        &self,
        markdown: &str,
        title: &str,
    ) -> impl Future<Output = Result<String, Box<dyn error::Error + Send + Sync>>> + Send;
}

/// A [`RenderHtml`] implementation for callers that only produce raw text.
///
/// Requesting an HTML destination with this converter fails with a clear
/// error instead of writing Markdown to an `.html` file.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlUnsupported;

impl RenderHtml for HtmlUnsupported {
    async fn render_html(
        &self,
        _markdown: &str,
        _title: &str,
    ) -> Result<String, Box<dyn error::Error + Send + Sync>> {
        Err("HTML output requested, but no HTML converter is configured".into())
    }
}

/// Writes a rendered artifact to its destination.
///
/// For file destinations the parent directory is created if absent. HTML
/// destinations run the converter first; a conversion failure is surfaced as
/// [`WriteReportError::Convert`] and nothing is written.
pub async fn write_report<R: RenderHtml>(
    artifact: &str,
    title: &str,
    output: &ReportOutput,
    renderer: &R,
) -> Result<(), WriteReportError> {
    match output {
        ReportOutput::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(artifact.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|error| WriteReportError::Stdout { error })
        }
        ReportOutput::File(path) => {
            let text = if output.wants_html() {
                renderer
                    .render_html(artifact, title)
                    .await
                    .map_err(|error| WriteReportError::Convert { error })?
            } else {
                artifact.to_owned()
            };

            if let Some(dir) = path.parent()
                && !dir.as_str().is_empty()
            {
                fs::create_dir_all(dir).map_err(|error| WriteReportError::Fs {
                    path: dir.to_path_buf(),
                    error,
                })?;
            }
            fs::write(path, text).map_err(|error| WriteReportError::Fs {
                path: path.clone(),
                error,
            })?;
            info!("wrote timeline report to {path}");
            Ok(())
        }
    }
}
