//! Tag recovery from the lines above a keyword.

use crate::ast::Tag;

use super::source::{FeatureSource, LineContent, LineKind, location_at};

/// Tags written above the keyword on line `keyword_line`, top to bottom and
/// left to right.
///
/// The upward walk crosses blank lines, comments and tag lines only, so it
/// never claims tags belonging to an earlier element.
pub(super) fn tags_above(source: &FeatureSource<'_>, keyword_line: usize) -> Vec<Tag> {
    let mut tag_lines = Vec::new();
    for idx in (0..keyword_line).rev() {
        let Some(line) = source.line(idx) else {
            break;
        };
        match line.kind() {
            LineKind::Tags => tag_lines.push((idx, line)),
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Content => break,
        }
    }
    tag_lines
        .into_iter()
        .rev()
        .flat_map(|(idx, line)| tags_in_line(idx, line))
        .collect()
}

fn tags_in_line(idx: usize, line: LineContent<'_>) -> Vec<Tag> {
    let text = line.as_str();
    let mut tags = Vec::new();
    for (start, token) in tokens(text) {
        if token.starts_with('#') {
            break;
        }
        if token.starts_with('@') {
            tags.push(Tag {
                location: location_at(idx, line, start),
                name: token.to_owned(),
            });
        }
    }
    tags
}

/// Whitespace separated tokens with their byte offsets.
fn tokens(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(from)) => {
                out.extend(text.get(from..idx).map(|token| (from, token)));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(from) = start {
        out.extend(text.get(from..).map(|token| (from, token)));
    }
    out
}
