//! Line index over normalised feature text.
//!
//! `gherkin` reports byte spans; the tree needs 1-based lines and 1-based
//! codepoint columns. [`FeatureSource`] does the conversion and offers the
//! line classification the location scanners share.

use crate::ast::Location;

#[derive(Debug)]
pub(super) struct FeatureSource<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> FeatureSource<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .filter(|start| *start < text.len())
            .collect();
        Self { text, line_starts }
    }

    pub(super) fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line `idx` (0-based) without its terminator.
    pub(super) fn line(&self, idx: usize) -> Option<LineContent<'a>> {
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or(self.text.len());
        let raw = self.text.get(start..end)?;
        let raw = raw.strip_suffix('\n').unwrap_or(raw);
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        Some(LineContent::new(raw))
    }

    /// 0-based index of the line containing byte `offset`.
    pub(super) fn line_index(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1)
    }

    /// Lines from `idx` onwards, paired with their index.
    pub(super) fn lines_from(
        &self,
        idx: usize,
    ) -> impl Iterator<Item = (usize, LineContent<'a>)> + '_ {
        (idx..self.line_count()).filter_map(move |i| self.line(i).map(|line| (i, line)))
    }

    /// First line at or after the one holding `offset` that starts with a
    /// keyword, i.e. is neither blank, a comment, nor a tag line.
    pub(super) fn keyword_line(&self, offset: usize) -> Option<(usize, LineContent<'a>)> {
        self.lines_from(self.line_index(offset))
            .find(|(_, line)| line.kind() == LineKind::Content)
    }
}

/// Build a location from a 0-based line index and a byte offset in that line.
pub(super) fn location_at(line_idx: usize, line: LineContent<'_>, byte: usize) -> Location {
    Location::new(to_u32(line_idx.saturating_add(1)), line.column_of(byte))
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineKind {
    Blank,
    Comment,
    Tags,
    Content,
}

/// A single source line without its terminator.
#[derive(Clone, Copy, Debug)]
pub(super) struct LineContent<'a>(&'a str);

impl<'a> LineContent<'a> {
    pub(super) fn new(line: &'a str) -> Self {
        Self(line)
    }

    pub(super) fn as_str(&self) -> &'a str {
        self.0
    }

    pub(super) fn trim_start(&self) -> &'a str {
        self.0.trim_start()
    }

    /// Byte offset of the first non-whitespace character.
    pub(super) fn indent(&self) -> usize {
        self.0.len() - self.trim_start().len()
    }

    /// 1-based codepoint column of byte offset `byte`.
    pub(super) fn column_of(&self, byte: usize) -> u32 {
        let prefix = self.0.get(..byte).unwrap_or(self.0);
        to_u32(prefix.chars().count().saturating_add(1))
    }

    pub(super) fn kind(&self) -> LineKind {
        let trimmed = self.trim_start();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') {
            LineKind::Comment
        } else if trimmed.starts_with('@') {
            LineKind::Tags
        } else {
            LineKind::Content
        }
    }

    /// Text from byte offset `byte` to the end of the line.
    pub(super) fn tail(&self, byte: usize) -> &'a str {
        self.0.get(byte..).unwrap_or_default()
    }
}

impl AsRef<str> for LineContent<'_> {
    fn as_ref(&self) -> &str {
        self.0
    }
}
