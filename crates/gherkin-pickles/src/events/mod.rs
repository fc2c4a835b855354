//! Event stream harness.
//!
//! Turns `source` events into parsed documents and pickles, and forwards
//! every other event untouched. Events use the classic Cucumber NDJSON
//! shapes, tagged by `type`.

mod ndjson;
mod stream;

pub use ndjson::{read_events, write_event};
pub use stream::{EventProcessor, StreamConfig};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ast::{Document, Location};
use crate::pickle::Pickle;

const GHERKIN_MEDIA_TYPE: &str = "text/x.cucumber.gherkin+plain";
const STACKTRACE_MEDIA_TYPE: &str = "text/vnd.cucumber.stacktrace+plain";
const UTF8: &str = "utf-8";

/// A known event, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    /// Raw Gherkin text and where it came from.
    Source(SourceEvent),
    /// A parsed document.
    GherkinDocument(DocumentEvent),
    /// One compiled pickle.
    Pickle(PickleEvent),
    /// A diagnostic attached to a source location.
    Attachment(AttachmentEvent),
}

/// Any line of an event stream.
///
/// Decoding always yields [`Envelope::Raw`], so events that are only
/// forwarded keep every field they arrived with. [`Envelope::Event`] holds
/// events built in process.
///
/// # Examples
/// ```
/// use gherkin_pickles::events::Envelope;
/// use serde_json::json;
///
/// let value = json!({"type": "attachment", "data": "x", "timestamp": 5});
/// let envelope: Envelope = serde_json::from_value(value.clone()).unwrap();
/// assert_eq!(envelope, Envelope::Raw(value));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    /// An event built by this crate.
    Event(Event),
    /// A JSON object exactly as it was read.
    Raw(Value),
}

impl Envelope {
    /// The `type` field of the event, when present.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        match self {
            Self::Event(Event::Source(_)) => Some("source"),
            Self::Event(Event::GherkinDocument(_)) => Some("gherkin-document"),
            Self::Event(Event::Pickle(_)) => Some("pickle"),
            Self::Event(Event::Attachment(_)) => Some("attachment"),
            Self::Raw(value) => value.get("type").and_then(Value::as_str),
        }
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::Raw)
    }
}

impl From<Event> for Envelope {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Encoding and media type of an event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Character encoding, always `utf-8` for events built here.
    pub encoding: String,
    /// MIME type of the payload.
    #[serde(rename = "type")]
    pub media_type: String,
}

impl Media {
    /// Media of Gherkin source text.
    #[must_use]
    pub fn gherkin() -> Self {
        Self {
            encoding: UTF8.to_owned(),
            media_type: GHERKIN_MEDIA_TYPE.to_owned(),
        }
    }

    /// Media of an error report.
    #[must_use]
    pub fn stacktrace() -> Self {
        Self {
            encoding: UTF8.to_owned(),
            media_type: STACKTRACE_MEDIA_TYPE.to_owned(),
        }
    }
}

/// `{type: "source"}`: a document to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEvent {
    /// Identifier of the document, usually its path.
    pub uri: String,
    /// Raw Gherkin text.
    pub data: String,
    /// Payload media; optional on input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

impl SourceEvent {
    /// Build a source event for Gherkin `data` read from `uri`.
    ///
    /// # Examples
    /// ```
    /// use gherkin_pickles::events::SourceEvent;
    ///
    /// let event = SourceEvent::new("features/cukes.feature", "Feature: Cukes\n");
    /// assert_eq!(event.uri, "features/cukes.feature");
    /// assert!(event.media.is_some());
    /// ```
    #[must_use]
    pub fn new(uri: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            data: data.into(),
            media: Some(Media::gherkin()),
        }
    }
}

/// `{type: "gherkin-document"}`: the parsed tree of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEvent {
    /// Identifier of the originating source.
    pub uri: String,
    /// The parsed document.
    pub document: Document,
}

/// `{type: "pickle"}`: one compiled test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleEvent {
    /// Identifier of the originating source.
    pub uri: String,
    /// The compiled pickle.
    pub pickle: Pickle,
}

/// `{type: "attachment"}`: a message tied to a source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentEvent {
    /// Where the message applies.
    pub source: AttachmentSource,
    /// The message text.
    pub data: String,
    /// Payload media.
    pub media: Media,
}

impl AttachmentEvent {
    /// An error report for `uri` at `location`.
    #[must_use]
    pub fn error(uri: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Self {
            source: AttachmentSource {
                uri: uri.into(),
                start: location,
            },
            data: message.into(),
            media: Media::stacktrace(),
        }
    }
}

/// Source reference of an [`AttachmentEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSource {
    /// Identifier of the originating source.
    pub uri: String,
    /// First position the attachment refers to.
    pub start: Location,
}
