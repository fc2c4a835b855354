//! Feeding feature files or stdin through the event processor.

use std::fs;
use std::io::{BufRead, Write};

use camino::{Utf8Path, Utf8PathBuf};
use gherkin_pickles::events::{Envelope, Event, EventProcessor, SourceEvent, read_events, write_event};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::CliError;

const FEATURE_EXTENSION: &str = "feature";

/// Expand `paths` into the feature files to process.
///
/// Files are kept as given. Directories are walked recursively for
/// `*.feature` files in file name order.
///
/// # Errors
///
/// Returns [`CliError::Walk`] when a directory cannot be traversed and
/// [`CliError::NonUtf8Path`] for a discovered path that is not UTF-8.
pub fn collect_feature_files(paths: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(features_under(path)?);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn features_under(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, CliError> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| CliError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path()).map_err(CliError::NonUtf8Path)?;
        if path.extension() == Some(FEATURE_EXTENSION) {
            found.push(path);
        }
    }
    debug!(root = %root, count = found.len(), "discovered feature files");
    Ok(found)
}

/// Read `path` into a `source` event whose `uri` is the path as given.
///
/// # Errors
///
/// Returns [`CliError::Read`] when the file cannot be read as UTF-8 text.
pub fn source_event(path: &Utf8Path) -> Result<Envelope, CliError> {
    let data = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Event::Source(SourceEvent::new(path.as_str(), data)).into())
}

/// Process the feature files named by `paths`, writing NDJSON to `out`.
///
/// Returns the number of events written.
///
/// # Errors
///
/// Fails on the first unreadable path or write error.
pub fn run_paths<W: Write>(
    paths: &[Utf8PathBuf],
    processor: EventProcessor,
    out: &mut W,
) -> Result<usize, CliError> {
    let mut written = 0;
    for path in collect_feature_files(paths)? {
        written += emit(processor, source_event(&path)?, out)?;
    }
    out.flush()?;
    info!(events = written, "processed feature files");
    Ok(written)
}

/// Process NDJSON events read from `input`, writing NDJSON to `out`.
///
/// Returns the number of events written.
///
/// # Errors
///
/// Fails on the first undecodable line or I/O error.
pub fn run_stream<R: BufRead, W: Write>(
    input: R,
    processor: EventProcessor,
    out: &mut W,
) -> Result<usize, CliError> {
    let mut written = 0;
    for event in read_events(input) {
        written += emit(processor, event?, out)?;
    }
    out.flush()?;
    info!(events = written, "processed event stream");
    Ok(written)
}

fn emit<W: Write>(processor: EventProcessor, event: Envelope, out: &mut W) -> Result<usize, CliError> {
    let produced = processor.process(event);
    for event in &produced {
        write_event(out, event)?;
    }
    Ok(produced.len())
}
