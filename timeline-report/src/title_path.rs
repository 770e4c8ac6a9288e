// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::InvalidTitlePath;

/// The sentinel suite name used for tests declared at spec file top level.
pub const NO_SUITE: &str = "(no suite)";

/// Minimum number of title path segments: two project prefix segments, the
/// spec file name, and the test title. Suite titles in between are optional.
pub(crate) const MIN_SEGMENTS: usize = 4;

/// A title path resolved into chart grouping identifiers.
///
/// Test frameworks report titles as a flat path, e.g.
/// `["", "chromium", "auth.spec.ts", "login", "rejects bad password"]`. The
/// first two segments identify the project, the third is the spec file, the
/// last is the test title, and anything in between names nested suites.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NormalizedPath {
    /// The chart/lane this test belongs to: `"[{project}] {file}"`, or the
    /// file name alone if the project prefix is empty.
    pub section: String,

    /// Nested suite titles joined with `" > "`, or [`NO_SUITE`].
    pub suite_name: String,

    /// The test title.
    pub test_name: String,
}

impl NormalizedPath {
    /// Resolves a raw title path.
    ///
    /// The project name is the concatenation (not a join) of the first two
    /// segments, so a framework that reports an empty root segment and an
    /// empty project name collapses to no project prefix at all.
    pub fn parse(title_path: &[String]) -> Result<Self, InvalidTitlePath> {
        if title_path.len() < MIN_SEGMENTS {
            return Err(InvalidTitlePath::new(title_path.len()));
        }

        let project_name = format!("{}{}", title_path[0], title_path[1]);
        let file_name = &title_path[2];
        let test_name = &title_path[title_path.len() - 1];
        let suites = &title_path[3..title_path.len() - 1];

        let section = if project_name.is_empty() {
            file_name.clone()
        } else {
            format!("[{project_name}] {file_name}")
        };
        let suite_name = if suites.is_empty() {
            NO_SUITE.to_owned()
        } else {
            suites.join(" > ")
        };

        Ok(Self {
            section,
            suite_name,
            test_name: test_name.clone(),
        })
    }
}
