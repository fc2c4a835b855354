//! Codepoint-aware width calculations for column arithmetic.
//!
//! Every column in this crate counts Unicode scalar values. Rust strings are
//! UTF-8, so byte lengths must never leak into column offsets.

/// Number of codepoints in `text`.
///
/// # Examples
/// ```
/// use gherkin_pickles::symbol_width;
/// assert_eq!(symbol_width("Given "), 6);
/// assert_eq!(symbol_width("前提"), 2);
/// assert_eq!(symbol_width("\u{1F952} "), 2);
/// ```
#[must_use]
pub fn symbol_width(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

/// Advance a 1-based `column` past `text`.
///
/// Saturates rather than wrapping on absurdly long input.
#[must_use]
pub fn advance_column(column: u32, text: &str) -> u32 {
    column.saturating_add(symbol_width(text))
}
