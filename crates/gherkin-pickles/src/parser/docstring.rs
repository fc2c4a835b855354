//! Doc string delimiter detection.
//!
//! `gherkin` keeps the doc string content but neither its position nor the
//! media type written after the opening delimiter.

use crate::ast::Location;

use super::source::{FeatureSource, LineContent, LineKind, location_at};

const DELIMITERS: [&str; 2] = ["\"\"\"", "```"];

/// Opening delimiter of a doc string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct DocStringHead {
    pub(super) location: Location,
    pub(super) content_type: Option<String>,
}

/// Find the opening delimiter that follows the step on line `step_line`.
///
/// Only blank and comment lines may sit between the step and its doc string.
pub(super) fn find_doc_string(source: &FeatureSource<'_>, step_line: usize) -> Option<DocStringHead> {
    source
        .lines_from(step_line.saturating_add(1))
        .find(|(_, line)| !matches!(line.kind(), LineKind::Blank | LineKind::Comment))
        .and_then(|(idx, line)| parse_opening(idx, line))
}

fn parse_opening(idx: usize, line: LineContent<'_>) -> Option<DocStringHead> {
    let trimmed = line.trim_start();
    let delimiter = DELIMITERS.into_iter().find(|d| trimmed.starts_with(d))?;
    let content_type = trimmed
        .strip_prefix(delimiter)
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
        .map(str::to_owned);
    Some(DocStringHead {
        location: location_at(idx, line, line.indent()),
        content_type,
    })
}
