//! Row and cell locations for data tables and examples tables.
//!
//! The `gherkin` AST stores table contents but only a span for the table as
//! a whole. These helpers rescan the pipe-delimited lines to recover where
//! every row and cell starts.

use crate::ast::{Location, TableCell, TableRow};

use super::source::{FeatureSource, LineContent, LineKind, location_at};

/// Where a row and its cells begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RowLayout {
    pub(super) location: Location,
    pub(super) cells: Vec<Location>,
}

/// Locate up to `expected` table rows, starting at the line holding
/// `offset`.
///
/// Non-table lines before the first row are skipped; once rows start, blank
/// and comment lines are tolerated and any other line ends the table.
pub(super) fn scan_rows(source: &FeatureSource<'_>, offset: usize, expected: usize) -> Vec<RowLayout> {
    let mut rows = Vec::with_capacity(expected);
    for (idx, line) in source.lines_from(source.line_index(offset)) {
        if rows.len() == expected {
            break;
        }
        if line.trim_start().starts_with('|') {
            rows.push(row_layout(idx, line));
            continue;
        }
        if !rows.is_empty() && !matches!(line.kind(), LineKind::Blank | LineKind::Comment) {
            break;
        }
    }
    rows
}

fn row_layout(idx: usize, line: LineContent<'_>) -> RowLayout {
    let pipes = pipe_positions(line.as_str());
    let cells = pipes
        .windows(2)
        .filter_map(|window| match *window {
            [left, right] => Some(cell_start(line.as_str(), left + 1, right)),
            _ => None,
        })
        .map(|byte| location_at(idx, line, byte))
        .collect();
    RowLayout {
        location: location_at(idx, line, line.indent()),
        cells,
    }
}

/// Byte offsets of every `|` delimiter.
///
/// A backslash does not protect a pipe; `gherkin` splits cells on it too,
/// so the layout keeps one location per parsed value.
fn pipe_positions(line: &str) -> Vec<usize> {
    line.match_indices('|').map(|(idx, _)| idx).collect()
}

/// First non-whitespace byte in `start..end`, or `end` for a blank cell.
fn cell_start(line: &str, start: usize, end: usize) -> usize {
    line.get(start..end)
        .and_then(|cell| {
            cell.char_indices()
                .find(|(_, ch)| !ch.is_whitespace())
                .map(|(idx, _)| start + idx)
        })
        .unwrap_or(end)
}

/// Zip parsed row values with their scanned layout.
///
/// Rows or cells the scan could not find fall back to `fallback`, the best
/// known position of the table.
pub(super) fn build_rows(
    values: &[Vec<String>],
    layouts: &[RowLayout],
    fallback: Location,
) -> Vec<TableRow> {
    values
        .iter()
        .enumerate()
        .map(|(idx, cells)| {
            let layout = layouts.get(idx);
            let location = layout.map_or(fallback, |l| l.location);
            TableRow {
                location,
                cells: cells
                    .iter()
                    .enumerate()
                    .map(|(col, value)| TableCell {
                        location: layout
                            .and_then(|l| l.cells.get(col).copied())
                            .unwrap_or(location),
                        value: value.clone(),
                    })
                    .collect(),
            }
        })
        .collect()
}
