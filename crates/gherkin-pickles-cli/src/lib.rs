//! Command line front end for the gherkin-pickles compiler.
//!
//! The `gherkin-pickles` binary reads feature files (or an NDJSON event
//! stream on stdin) and writes `source`, `gherkin-document`, `pickle` and
//! `attachment` events to stdout, one JSON object per line.
//!
//! # Configuration
//!
//! - `GHERKIN_PICKLES_LOG_LEVEL`: Log verbosity (trace, debug, info, warn,
//!   error); `--log-level` takes precedence.

pub mod config;
pub mod error;
pub mod logging;
pub mod run;
