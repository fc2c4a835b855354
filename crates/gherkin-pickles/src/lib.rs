//! Gherkin pickle compiler.
//!
//! This crate turns parsed Gherkin documents into pickles: flat, fully
//! interpolated test cases with no backgrounds, outlines or placeholders
//! left to resolve. Every pickle element records where it came from in the
//! source, so a runner can report failures against the original text.
//!
//! # Overview
//!
//! - [`parse_document`] reads Gherkin text into an [`ast::Document`] using
//!   the `gherkin` crate, recovering exact line and column positions.
//! - [`compile`] flattens a document into [`pickle::Pickle`]s: background
//!   steps are prepended, outlines are expanded once per examples row and
//!   tags are inherited.
//! - [`events`] wraps both behind the Cucumber NDJSON event stream
//!   (`source` in; `gherkin-document`, `pickle` and `attachment` out).
//!
//! # Example
//!
//! ```
//! use gherkin_pickles::{compile, parse_document};
//!
//! let document = parse_document(
//!     "Feature: Cukes\n  Scenario Outline: eat\n    Given I have <count> cukes\n\n    Examples:\n      | count |\n      | 42    |\n",
//! )
//! .unwrap();
//! let pickles = compile(&document).unwrap();
//! assert_eq!(pickles.len(), 1);
//! assert_eq!(
//!     pickles.first().and_then(|p| p.steps.first()).map(|s| s.text.as_str()),
//!     Some("I have 42 cukes"),
//! );
//! ```

pub mod ast;
mod compiler;
mod errors;
pub mod events;
mod parser;
pub mod pickle;
mod symbols;

pub use compiler::compile;
pub use errors::{CompileError, ParseFailure, StreamError, SyntaxError};
pub use parser::parse_document;
pub use symbols::{advance_column, symbol_width};

/// Test support utilities for unit and integration tests.
///
/// This module is hidden from documentation as it's intended for internal
/// test use only.
#[doc(hidden)]
pub mod test_support;
