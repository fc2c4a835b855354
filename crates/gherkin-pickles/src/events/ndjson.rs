//! Newline-delimited JSON framing for event streams.

use std::io::{BufRead, Write};

use super::Envelope;
use crate::errors::StreamError;

/// Decode one event per non-blank line of `reader`.
///
/// Decoding is lazy; each item reports its own failure so a caller may stop
/// at the first bad line or skip it.
///
/// # Examples
/// ```
/// use gherkin_pickles::events::read_events;
///
/// let input = "{\"type\":\"source\",\"uri\":\"a.feature\",\"data\":\"\"}\n\n";
/// let events: Vec<_> = read_events(input.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].event_type(), Some("source"));
/// ```
pub fn read_events<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Envelope, StreamError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Err(err) => Some(Err(StreamError::Io(err))),
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => Some(
                serde_json::from_str(&text).map_err(|source| StreamError::Json {
                    line: idx + 1,
                    source,
                }),
            ),
        })
}

/// Write `event` as a single JSON line.
///
/// # Errors
/// Returns [`StreamError::Encode`] when the event cannot be serialised and
/// [`StreamError::Io`] when writing fails.
pub fn write_event<W: Write>(writer: &mut W, event: &Envelope) -> Result<(), StreamError> {
    serde_json::to_writer(&mut *writer, event).map_err(StreamError::Encode)?;
    writer.write_all(b"\n")?;
    Ok(())
}
