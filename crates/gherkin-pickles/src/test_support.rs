//! Terse constructors for hand-built input trees.
//!
//! Nodes are laid out the way a conventionally indented feature file would
//! place them: scenarios at column 3, steps at column 5, table rows at
//! column 7 with four columns per cell.

use crate::ast::{
    Background, DataTable, DocString, Document, Examples, Feature, Location, Scenario,
    ScenarioDefinition, ScenarioOutline, Step, StepArgument, TableCell, TableRow, Tag,
};

/// Column of a scenario, outline or background keyword.
pub const DEFINITION_COLUMN: u32 = 3;
/// Column of a step keyword.
pub const STEP_COLUMN: u32 = 5;
/// Column of a table row's leading pipe.
pub const ROW_COLUMN: u32 = 7;

/// A document holding one feature at line 1.
#[must_use]
pub fn document(tags: Vec<Tag>, children: Vec<ScenarioDefinition>) -> Document {
    Document {
        feature: Some(Feature {
            location: Location::new(1, 1),
            tags,
            language: "en".to_owned(),
            keyword: "Feature".to_owned(),
            name: "test feature".to_owned(),
            description: None,
            children,
        }),
    }
}

/// A tag at `line`, column 1.
#[must_use]
pub fn tag(name: &str, line: u32) -> Tag {
    Tag {
        location: Location::new(line, 1),
        name: name.to_owned(),
    }
}

/// A step whose keyword starts at [`STEP_COLUMN`].
#[must_use]
pub fn step(keyword: &str, text: &str, line: u32) -> Step {
    Step {
        location: Location::new(line, STEP_COLUMN),
        keyword: Some(keyword.to_owned()),
        text: text.to_owned(),
        argument: None,
    }
}

/// Attach a data table to `step`, starting on the following line.
#[must_use]
pub fn with_table(mut step: Step, rows: &[&[&str]]) -> Step {
    let first = step.location.line.saturating_add(1);
    let rows: Vec<TableRow> = rows
        .iter()
        .zip(first..)
        .map(|(values, line)| row(line, values))
        .collect();
    step.argument = Some(StepArgument::DataTable(DataTable {
        location: Location::new(first, ROW_COLUMN),
        rows,
    }));
    step
}

/// Attach a doc string to `step`, starting on the following line.
#[must_use]
pub fn with_doc_string(mut step: Step, content: &str) -> Step {
    step.argument = Some(StepArgument::DocString(DocString {
        location: Location::new(step.location.line.saturating_add(1), ROW_COLUMN),
        content: content.to_owned(),
        content_type: None,
    }));
    step
}

/// A table row at `line` with one cell per value.
#[must_use]
pub fn row(line: u32, values: &[&str]) -> TableRow {
    TableRow {
        location: Location::new(line, ROW_COLUMN),
        cells: values
            .iter()
            .zip(0_u32..)
            .map(|(value, idx)| TableCell {
                location: Location::new(line, ROW_COLUMN + 2 + idx.saturating_mul(4)),
                value: (*value).to_owned(),
            })
            .collect(),
    }
}

/// A background at `line`.
#[must_use]
pub fn background(line: u32, steps: Vec<Step>) -> ScenarioDefinition {
    ScenarioDefinition::Background(Background {
        location: Location::new(line, DEFINITION_COLUMN),
        keyword: "Background".to_owned(),
        name: String::new(),
        description: None,
        steps,
    })
}

/// A scenario at `line`.
#[must_use]
pub fn scenario(name: &str, line: u32, tags: Vec<Tag>, steps: Vec<Step>) -> ScenarioDefinition {
    ScenarioDefinition::Scenario(Scenario {
        location: Location::new(line, DEFINITION_COLUMN),
        tags,
        keyword: "Scenario".to_owned(),
        name: name.to_owned(),
        description: None,
        steps,
    })
}

/// A scenario outline at `line`.
#[must_use]
pub fn outline(
    name: &str,
    line: u32,
    tags: Vec<Tag>,
    steps: Vec<Step>,
    examples: Vec<Examples>,
) -> ScenarioDefinition {
    ScenarioDefinition::ScenarioOutline(ScenarioOutline {
        location: Location::new(line, DEFINITION_COLUMN),
        tags,
        keyword: "Scenario Outline".to_owned(),
        name: name.to_owned(),
        description: None,
        steps,
        examples,
    })
}

/// An examples block at `line` whose header (if any) sits on the next line.
#[must_use]
pub fn examples(
    line: u32,
    tags: Vec<Tag>,
    header: Option<&[&str]>,
    body: &[&[&str]],
) -> Examples {
    let header_line = line.saturating_add(1);
    Examples {
        location: Location::new(line, STEP_COLUMN),
        tags,
        keyword: "Examples".to_owned(),
        name: String::new(),
        description: None,
        table_header: header.map(|names| row(header_line, names)),
        table_body: body
            .iter()
            .zip(header_line.saturating_add(1)..)
            .map(|(values, row_line)| row(row_line, values))
            .collect(),
    }
}
