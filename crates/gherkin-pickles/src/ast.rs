//! Input tree produced by the Gherkin front end.
//!
//! The compiler only ever borrows these nodes. Document order matters: a
//! [`ScenarioDefinition::Background`] applies to every scenario that follows
//! it within the same feature.

use serde::{Deserialize, Serialize};

/// A 1-based line and 1-based column in a Gherkin source.
///
/// Columns count Unicode scalar values, not bytes or UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, in codepoints.
    pub column: u32,
}

impl Location {
    /// Create a location from a line and column.
    ///
    /// # Examples
    /// ```
    /// use gherkin_pickles::ast::Location;
    /// let loc = Location::new(3, 5);
    /// assert_eq!((loc.line, loc.column), (3, 5));
    /// ```
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Root of one parsed Gherkin source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The feature, absent for sources holding only comments or whitespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Feature>,
}

/// Top level named unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Location of the `Feature` keyword.
    pub location: Location,
    /// Tags attached to the feature, in source order.
    pub tags: Vec<Tag>,
    /// Dialect the feature was written in.
    pub language: String,
    /// Keyword as written in the source.
    pub keyword: String,
    /// Feature name.
    pub name: String,
    /// Free-form description below the feature line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backgrounds, scenarios and outlines in document order.
    pub children: Vec<ScenarioDefinition>,
}

/// A child of a [`Feature`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScenarioDefinition {
    /// Shared step prefix for the scenarios that follow.
    Background(Background),
    /// A concrete test case template.
    Scenario(Scenario),
    /// A test case template instantiated once per example row.
    ScenarioOutline(ScenarioOutline),
}

impl ScenarioDefinition {
    /// Steps declared directly by this definition.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Background(background) => &background.steps,
            Self::Scenario(scenario) => &scenario.steps,
            Self::ScenarioOutline(outline) => &outline.steps,
        }
    }

    /// Location of the definition's keyword.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::Background(background) => background.location,
            Self::Scenario(scenario) => scenario.location,
            Self::ScenarioOutline(outline) => outline.location,
        }
    }
}

/// Steps prepended to every following scenario in the feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// Location of the `Background` keyword.
    pub location: Location,
    /// Keyword as written in the source.
    pub keyword: String,
    /// Optional background name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Background steps in declaration order.
    pub steps: Vec<Step>,
}

/// A non-parameterised scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Location of the `Scenario` keyword.
    pub location: Location,
    /// Tags declared on the scenario.
    pub tags: Vec<Tag>,
    /// Keyword as written in the source.
    pub keyword: String,
    /// Scenario name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scenario steps in declaration order.
    pub steps: Vec<Step>,
}

/// A scenario parameterised by one or more examples tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutline {
    /// Location of the `Scenario Outline` keyword.
    pub location: Location,
    /// Tags declared on the outline.
    pub tags: Vec<Tag>,
    /// Keyword as written in the source.
    pub keyword: String,
    /// Outline name, possibly containing `<placeholder>` tokens.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Step templates in declaration order.
    pub steps: Vec<Step>,
    /// Examples blocks in declaration order.
    pub examples: Vec<Examples>,
}

/// A table of substitution values attached to an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Examples {
    /// Location of the `Examples` keyword.
    pub location: Location,
    /// Tags declared on this block.
    pub tags: Vec<Tag>,
    /// Keyword as written in the source.
    pub keyword: String,
    /// Optional block name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Placeholder names; `None` when the block has no table at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_header: Option<TableRow>,
    /// Value rows, one pickle each.
    pub table_body: Vec<TableRow>,
}

/// A single Given/When/Then line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Location of the keyword.
    pub location: Location,
    /// Keyword including its trailing separator, e.g. `"Given "`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Step text following the keyword.
    pub text: String,
    /// Attached data table or doc string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<StepArgument>,
}

/// Argument attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StepArgument {
    /// A pipe-delimited table.
    DataTable(DataTable),
    /// A delimited block of free text.
    DocString(DocString),
}

/// Rows of a step's data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Location of the first row.
    pub location: Location,
    /// Table rows in source order.
    pub rows: Vec<TableRow>,
}

/// One row of a data table or examples table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Location of the row's leading pipe.
    pub location: Location,
    /// Cells left to right.
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Cell values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|cell| cell.value.as_str())
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Location of the cell's first content character.
    pub location: Location,
    /// Unescaped cell value.
    pub value: String,
}

/// Free text attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocString {
    /// Location of the opening delimiter.
    pub location: Location,
    /// Content between the delimiters.
    pub content: String,
    /// Media type written after the opening delimiter, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A tag such as `@smoke`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Location of the `@` sign.
    pub location: Location,
    /// Tag name including the leading `@`.
    pub name: String,
}
