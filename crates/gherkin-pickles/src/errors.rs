//! Error types shared by the compiler, front end and event stream.

use thiserror::Error;

use crate::ast::Location;

/// Structural invariant violations detected while compiling a document.
///
/// A well-formed tree never produces one; the front end guarantees equal
/// widths for every examples row.
///
/// # Examples
/// ```
/// use gherkin_pickles::CompileError;
/// let err = CompileError::RowWidthMismatch { line: 12, header_width: 2, row_width: 1 };
/// assert_eq!(
///     err.to_string(),
///     "examples row at line 12 has 1 cells but its header has 2",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An examples row does not have one value per header cell.
    #[error("examples row at line {line} has {row_width} cells but its header has {header_width}")]
    RowWidthMismatch {
        /// Line of the offending row.
        line: u32,
        /// Number of placeholder names in the header.
        header_width: usize,
        /// Number of values in the row.
        row_width: usize,
    },
}

/// A single syntax error reported by the Gherkin parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("({}:{}): {message}", .location.line, .location.column)]
pub struct SyntaxError {
    /// Human readable description.
    pub message: String,
    /// Where the parser gave up.
    pub location: Location,
}

impl SyntaxError {
    /// Create a syntax error at `location`.
    #[must_use]
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// One or more syntax errors that prevented a document from being built.
///
/// Errors keep the order the parser produced them in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse failed with {} error(s): {}", .errors.len(), render_errors(.errors))]
pub struct ParseFailure {
    /// The individual errors, never empty.
    pub errors: Vec<SyntaxError>,
}

impl ParseFailure {
    /// Wrap a single syntax error.
    #[must_use]
    pub fn single(error: SyntaxError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

fn render_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures while reading or writing NDJSON event streams.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading from or writing to the underlying stream failed.
    #[error("event stream I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A line of input was not a JSON object.
    #[error("invalid event on line {line}: {source}")]
    Json {
        /// 1-based input line number.
        line: usize,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// An event could not be serialised.
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),
}
