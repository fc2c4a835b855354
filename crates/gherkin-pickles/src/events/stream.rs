//! Source event processing.

use serde::Deserialize;
use tracing::{debug, warn};

use super::{AttachmentEvent, DocumentEvent, Envelope, Event, PickleEvent, SourceEvent};
use crate::ast::Location;
use crate::compiler::compile;
use crate::errors::CompileError;
use crate::parser::parse_document;

/// Which events to emit for every processed source.
///
/// All flags default to `false`, in which case a source produces nothing
/// unless it fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamConfig {
    /// Re-emit the `source` event.
    pub print_source: bool,
    /// Emit a `gherkin-document` event.
    pub print_ast: bool,
    /// Emit one `pickle` event per compiled pickle.
    pub print_pickles: bool,
}

impl StreamConfig {
    /// Emit every event kind.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            print_source: true,
            print_ast: true,
            print_pickles: true,
        }
    }
}

/// Sequential one-in, zero-or-more-out event transformer.
///
/// # Examples
/// ```
/// use gherkin_pickles::events::{Envelope, Event, EventProcessor, SourceEvent, StreamConfig};
///
/// let processor = EventProcessor::new(StreamConfig {
///     print_pickles: true,
///     ..StreamConfig::default()
/// });
/// let source = SourceEvent::new(
///     "cukes.feature",
///     "Feature: Cukes\n  Scenario: eat\n    Given I have 3 cukes\n",
/// );
/// let out = processor.process(Envelope::Event(Event::Source(source)));
/// assert!(matches!(out.as_slice(), [Envelope::Event(Event::Pickle(_))]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EventProcessor {
    config: StreamConfig,
}

impl EventProcessor {
    /// Create a processor emitting the events selected by `config`.
    #[must_use]
    pub const fn new(config: StreamConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> StreamConfig {
        self.config
    }

    /// Process one input event.
    ///
    /// Anything other than a `source` event is returned unchanged, as is a
    /// `source` object missing its `uri` or `data`. A re-emitted source is
    /// the input envelope itself.
    #[must_use]
    pub fn process(&self, envelope: Envelope) -> Vec<Envelope> {
        let decoded = match &envelope {
            Envelope::Event(Event::Source(source)) => Some(Ok(source.clone())),
            Envelope::Raw(value) if envelope.event_type() == Some("source") => {
                Some(SourceEvent::deserialize(value))
            }
            _ => None,
        };
        let source = match decoded {
            Some(Ok(source)) => source,
            Some(Err(err)) => {
                warn!(error = %err, "forwarding malformed source event");
                return vec![envelope];
            }
            None => return vec![envelope],
        };
        let echo = self.config.print_source.then_some(envelope);
        self.process_source(&source, echo)
    }

    /// Process a sequence of events, keeping input order.
    pub fn process_all<I>(&self, events: I) -> impl Iterator<Item = Envelope> + use<'_, I>
    where
        I: IntoIterator<Item = Envelope>,
    {
        events.into_iter().flat_map(move |event| self.process(event))
    }

    fn process_source(&self, source: &SourceEvent, echo: Option<Envelope>) -> Vec<Envelope> {
        debug!(uri = %source.uri, "processing source");
        let parsed = parse_document(&source.data);
        let uri = source.uri.as_str();

        let mut out: Vec<Envelope> = echo.into_iter().collect();

        let document = match parsed {
            Ok(document) => document,
            Err(failure) => {
                out.extend(failure.errors.into_iter().map(|error| {
                    Event::Attachment(AttachmentEvent::error(
                        uri,
                        error.location,
                        error.to_string(),
                    ))
                    .into()
                }));
                return out;
            }
        };

        let pickles = if self.config.print_pickles {
            match compile(&document) {
                Ok(pickles) => pickles,
                Err(err) => {
                    warn!(uri = %uri, error = %err, "document could not be compiled");
                    out.push(Event::Attachment(compile_error_attachment(uri, &err)).into());
                    return out;
                }
            }
        } else {
            Vec::new()
        };

        if self.config.print_ast {
            out.push(
                Event::GherkinDocument(DocumentEvent {
                    uri: uri.to_owned(),
                    document,
                })
                .into(),
            );
        }
        out.extend(pickles.into_iter().map(|pickle| {
            Event::Pickle(PickleEvent {
                uri: uri.to_owned(),
                pickle,
            })
            .into()
        }));
        out
    }
}

fn compile_error_attachment(uri: &str, err: &CompileError) -> AttachmentEvent {
    let location = match *err {
        CompileError::RowWidthMismatch { line, .. } => Location::new(line, 1),
    };
    AttachmentEvent::error(uri, location, err.to_string())
}
