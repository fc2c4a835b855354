//! Placeholder substitution for outline expansion.

use crate::ast::TableRow;
use crate::errors::CompileError;

/// Header/value pairs for one examples row.
///
/// Replacement runs header by header, left to right, as plain substring
/// replacement. A value that happens to contain a later header's `<token>`
/// is therefore substituted again. That cascading is a known quirk and is
/// kept as is.
#[derive(Debug, Default)]
pub(crate) struct Substitution<'a> {
    pairs: Vec<(String, &'a str)>,
}

impl<'a> Substitution<'a> {
    /// Substitution that leaves text untouched.
    pub(crate) fn identity() -> Self {
        Self::default()
    }

    /// Pair every header cell with the value in the same column of `row`.
    pub(crate) fn for_row(header: &'a TableRow, row: &'a TableRow) -> Result<Self, CompileError> {
        if header.cells.len() != row.cells.len() {
            return Err(CompileError::RowWidthMismatch {
                line: row.location.line,
                header_width: header.cells.len(),
                row_width: row.cells.len(),
            });
        }
        let pairs = header
            .values()
            .zip(row.values())
            .map(|(name, value)| (format!("<{name}>"), value))
            .collect();
        Ok(Self { pairs })
    }

    /// Apply every replacement to `text`.
    pub(crate) fn apply(&self, text: &str) -> String {
        self.pairs
            .iter()
            .fold(text.to_owned(), |acc, (token, value)| acc.replace(token, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Location, TableCell};
    use rstest::rstest;

    fn row(line: u32, values: &[&str]) -> TableRow {
        TableRow {
            location: Location::new(line, 5),
            cells: values
                .iter()
                .zip(1_u32..)
                .map(|(value, idx)| TableCell {
                    location: Location::new(line, idx.saturating_mul(4)),
                    value: (*value).to_owned(),
                })
                .collect(),
        }
    }

    #[expect(clippy::expect_used, reason = "test helper with descriptive failures")]
    fn substitute(header: &[&str], values: &[&str], text: &str) -> String {
        let header = row(1, header);
        let values = row(2, values);
        Substitution::for_row(&header, &values)
            .expect("rows should have equal widths")
            .apply(text)
    }

    #[rstest]
    #[case::single("I have <count> cukes", &["count"], &["42"], "I have 42 cukes")]
    #[case::repeated("<x> and <x>", &["x"], &["1"], "1 and 1")]
    #[case::several("<a> then <b>", &["a", "b"], &["1", "2"], "1 then 2")]
    #[case::unknown_left_alone("keep <other>", &["count"], &["3"], "keep <other>")]
    #[case::empty_value("[<v>]", &["v"], &[""], "[]")]
    #[case::unicode("café <qty> ☕", &["qty"], &["2"], "café 2 ☕")]
    fn replaces_placeholders(
        #[case] text: &str,
        #[case] header: &[&str],
        #[case] values: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(substitute(header, values, text), expected);
    }

    #[test]
    fn earlier_value_introducing_later_token_is_substituted_again() {
        assert_eq!(substitute(&["a", "b"], &["<b>", "B"], "<a>"), "B");
    }

    #[test]
    fn later_value_introducing_earlier_token_is_not_revisited() {
        assert_eq!(substitute(&["a", "b"], &["A", "<a>"], "<b>"), "<a>");
    }

    #[test]
    fn identity_returns_text_unchanged() {
        assert_eq!(Substitution::identity().apply("<count>"), "<count>");
    }

    #[rstest]
    #[case::short_row(&["a", "b"], &["1"])]
    #[case::long_row(&["a"], &["1", "2"])]
    fn rejects_rows_with_a_different_width(#[case] header: &[&str], #[case] values: &[&str]) {
        let header = row(1, header);
        let values = row(9, values);
        let err = Substitution::for_row(&header, &values).err();
        assert_eq!(
            err,
            Some(CompileError::RowWidthMismatch {
                line: 9,
                header_width: header.cells.len(),
                row_width: values.cells.len(),
            })
        );
    }
}
