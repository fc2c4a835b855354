//! Document-to-pickle compilation.
//!
//! The compiler walks a feature's children once, in document order. The most
//! recently seen background is threaded through the walk as a local value and
//! prepended to each scenario that follows it. Outlines expand into one
//! pickle per examples row, and every outline-derived location list records
//! the row first and the template second.

mod interpolate;

use tracing::debug;

use crate::ast::{
    Document, Examples, Location, Scenario, ScenarioDefinition, ScenarioOutline, Step,
    StepArgument, Tag, TableRow,
};
use crate::errors::CompileError;
use crate::pickle::{
    Pickle, PickleArgument, PickleCell, PickleLocation, PickleRow, PickleStep, PickleString,
    PickleTable, PickleTag,
};
use crate::symbols::advance_column;

use interpolate::Substitution;

/// Compile `document` into pickles, in source order.
///
/// Returns an empty list when the document has no feature. Scenarios and
/// outlines without steps, and examples blocks without a header row, are
/// skipped silently.
///
/// # Errors
///
/// Returns [`CompileError::RowWidthMismatch`] when an examples row does not
/// have exactly one value per header cell.
///
/// # Examples
/// ```
/// use gherkin_pickles::{compile, parse_document};
///
/// let source = "Feature: Cukes\n  Scenario: eat\n    Given I have 3 cukes\n";
/// let document = parse_document(source).unwrap();
/// let pickles = compile(&document).unwrap();
/// assert_eq!(pickles.len(), 1);
/// assert_eq!(pickles[0].steps[0].text, "I have 3 cukes");
/// ```
pub fn compile(document: &Document) -> Result<Vec<Pickle>, CompileError> {
    let Some(feature) = document.feature.as_ref() else {
        return Ok(Vec::new());
    };

    let mut pickles = Vec::new();
    let mut background: Vec<PickleStep> = Vec::new();
    for child in &feature.children {
        if let ScenarioDefinition::Background(definition) = child {
            background = pickle_steps(&definition.steps);
            continue;
        }
        if child.steps().is_empty() {
            let location = child.location();
            debug!(line = location.line, "skipping definition without steps");
            continue;
        }
        match child {
            ScenarioDefinition::Background(_) => {}
            ScenarioDefinition::Scenario(scenario) => {
                pickles.push(compile_scenario(&feature.tags, &background, scenario));
            }
            ScenarioDefinition::ScenarioOutline(outline) => {
                compile_outline(&feature.tags, &background, outline, &mut pickles)?;
            }
        }
    }

    debug!(
        feature = %feature.name,
        pickles = pickles.len(),
        "compiled feature"
    );
    Ok(pickles)
}

fn compile_scenario(
    feature_tags: &[Tag],
    background: &[PickleStep],
    scenario: &Scenario,
) -> Pickle {
    let mut steps = background.to_vec();
    steps.extend(pickle_steps(&scenario.steps));

    Pickle {
        name: scenario.name.clone(),
        steps,
        tags: pickle_tags([feature_tags, scenario.tags.as_slice()]),
        locations: vec![scenario.location.into()],
    }
}

fn compile_outline(
    feature_tags: &[Tag],
    background: &[PickleStep],
    outline: &ScenarioOutline,
    pickles: &mut Vec<Pickle>,
) -> Result<(), CompileError> {
    for examples in &outline.examples {
        let Some(header) = examples.table_header.as_ref() else {
            continue;
        };
        for row in &examples.table_body {
            pickles.push(compile_outline_row(
                feature_tags,
                background,
                outline,
                examples,
                header,
                row,
            )?);
        }
    }
    Ok(())
}

fn compile_outline_row(
    feature_tags: &[Tag],
    background: &[PickleStep],
    outline: &ScenarioOutline,
    examples: &Examples,
    header: &TableRow,
    row: &TableRow,
) -> Result<Pickle, CompileError> {
    let substitution = Substitution::for_row(header, row)?;
    let row_location = PickleLocation::from(row.location);

    let mut steps = background.to_vec();
    steps.extend(outline.steps.iter().map(|step| PickleStep {
        text: substitution.apply(&step.text),
        arguments: pickle_arguments(step.argument.as_ref(), &substitution),
        locations: vec![row_location, step_location(step)],
    }));

    Ok(Pickle {
        name: substitution.apply(&outline.name),
        steps,
        tags: pickle_tags([
            feature_tags,
            outline.tags.as_slice(),
            examples.tags.as_slice(),
        ]),
        locations: vec![row_location, outline.location.into()],
    })
}

fn pickle_steps(steps: &[Step]) -> Vec<PickleStep> {
    steps.iter().map(pickle_step).collect()
}

fn pickle_step(step: &Step) -> PickleStep {
    PickleStep {
        text: step.text.clone(),
        arguments: pickle_arguments(step.argument.as_ref(), &Substitution::identity()),
        locations: vec![step_location(step)],
    }
}

fn pickle_arguments(
    argument: Option<&StepArgument>,
    substitution: &Substitution<'_>,
) -> Vec<PickleArgument> {
    let Some(argument) = argument else {
        return Vec::new();
    };
    let converted = match argument {
        StepArgument::DataTable(table) => PickleArgument::Table(PickleTable {
            rows: table
                .rows
                .iter()
                .map(|row| PickleRow {
                    cells: row
                        .cells
                        .iter()
                        .map(|cell| PickleCell {
                            location: cell.location.into(),
                            value: substitution.apply(&cell.value),
                        })
                        .collect(),
                })
                .collect(),
        }),
        StepArgument::DocString(doc) => PickleArgument::String(PickleString {
            location: doc.location.into(),
            content: substitution.apply(&doc.content),
        }),
    };
    vec![converted]
}

/// Location of the step text: the keyword location shifted past the keyword.
fn step_location(step: &Step) -> PickleLocation {
    let Location { line, column } = step.location;
    let column = step
        .keyword
        .as_deref()
        .map_or(column, |keyword| advance_column(column, keyword));
    PickleLocation { line, column }
}

fn pickle_tags<const N: usize>(groups: [&[Tag]; N]) -> Vec<PickleTag> {
    groups
        .into_iter()
        .flatten()
        .map(|tag| PickleTag {
            name: tag.name.clone(),
            location: tag.location.into(),
        })
        .collect()
}

#[cfg(test)]
mod tests;
