//! Output tree: fully resolved, self-contained test cases.
//!
//! Pickles hold no references into the [`ast`](crate::ast); each one is an
//! owned snapshot that serialises to the classic Cucumber pickle JSON shape.

use serde::{Deserialize, Serialize};

use crate::ast::Location;

/// A line and column attributed to a pickle element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickleLocation {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, in codepoints.
    pub column: u32,
}

impl From<Location> for PickleLocation {
    fn from(location: Location) -> Self {
        Self {
            line: location.line,
            column: location.column,
        }
    }
}

/// An executable test case with no templating left to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickle {
    /// Scenario name, with outline placeholders substituted.
    pub name: String,
    /// Background steps followed by the scenario's own steps.
    pub steps: Vec<PickleStep>,
    /// Feature, scenario and examples tags, in that order.
    pub tags: Vec<PickleTag>,
    /// One entry for a scenario; the example row then the outline for an
    /// outline-derived pickle.
    pub locations: Vec<PickleLocation>,
}

/// A step ready to be matched against a step definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleStep {
    /// Interpolated step text.
    pub text: String,
    /// Zero or one argument.
    pub arguments: Vec<PickleArgument>,
    /// The step's own location, preceded by the example row for outline
    /// steps.
    pub locations: Vec<PickleLocation>,
}

/// Argument carried by a [`PickleStep`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickleArgument {
    /// Data table argument.
    Table(PickleTable),
    /// Doc string argument.
    String(PickleString),
}

/// A data table argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleTable {
    /// Rows in source order.
    pub rows: Vec<PickleRow>,
}

/// One row of a [`PickleTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleRow {
    /// Cells left to right.
    pub cells: Vec<PickleCell>,
}

/// One cell of a [`PickleRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleCell {
    /// Location of the source cell.
    pub location: PickleLocation,
    /// Interpolated cell value.
    pub value: String,
}

/// A doc string argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleString {
    /// Location of the opening delimiter.
    pub location: PickleLocation,
    /// Interpolated content.
    pub content: String,
}

/// A tag inherited by a pickle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleTag {
    /// Tag name including the leading `@`.
    pub name: String,
    /// Where the tag was declared.
    pub location: PickleLocation,
}

impl Pickle {
    /// Tag names in inheritance order.
    ///
    /// # Examples
    /// ```
    /// use gherkin_pickles::pickle::{Pickle, PickleLocation, PickleTag};
    /// let location = PickleLocation { line: 1, column: 1 };
    /// let pickle = Pickle {
    ///     name: "demo".into(),
    ///     steps: Vec::new(),
    ///     tags: vec![PickleTag { name: "@fast".into(), location }],
    ///     locations: vec![location],
    /// };
    /// assert_eq!(pickle.tag_names().collect::<Vec<_>>(), ["@fast"]);
    /// ```
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }

    /// Step texts in execution order.
    pub fn step_texts(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.text.as_str())
    }
}
