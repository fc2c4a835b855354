//! Gherkin text front end.
//!
//! Parsing is delegated to the `gherkin` crate. Its AST is then adapted into
//! the [`ast`](crate::ast) tree the compiler consumes. Where `gherkin` does
//! not expose a location (tags, table rows and cells, doc strings, exact
//! keyword columns) the front end rescans the raw text, so every location
//! is a 1-based line and a 1-based codepoint column.
//!
//! Rules are flattened: each rule contributes a background holding the
//! feature background steps followed by its own, and its scenarios inherit
//! the rule's tags ahead of their own.

mod docstring;
mod source;
mod table;
mod tags;

use std::borrow::Cow;
use std::error::Error as StdError;
use std::sync::LazyLock;

use gherkin::GherkinEnv;
use regex::Regex;
use tracing::{debug, warn};

use crate::ast::{
    Background, DataTable, DocString, Document, Examples, Feature, Location, Scenario,
    ScenarioDefinition, ScenarioOutline, Step, StepArgument, Tag,
};
use crate::errors::{ParseFailure, SyntaxError};

use source::{FeatureSource, LineContent, LineKind, location_at};

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static LANGUAGE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*language\s*:\s*([A-Za-z0-9_-]+)").expect("valid language header regex")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static REPORTED_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("valid position regex"));

const DEFAULT_LANGUAGE: &str = "en";

/// `Scenario Outline` keywords of every dialect `gherkin` knows, one per line.
const OUTLINE_KEYWORDS: &str = include_str!("outline_keywords.txt");

/// Parse Gherkin `source` text into a [`Document`].
///
/// Text made only of blank lines and comments yields a document without a
/// feature.
///
/// # Errors
///
/// Returns a [`ParseFailure`] carrying every syntax error the parser
/// reported, in order.
///
/// # Examples
/// ```
/// use gherkin_pickles::parse_document;
///
/// let document = parse_document("# nothing here\n").unwrap();
/// assert!(document.feature.is_none());
///
/// let document = parse_document("Feature: Cukes\n").unwrap();
/// assert_eq!(document.feature.map(|f| f.name), Some("Cukes".to_owned()));
/// ```
pub fn parse_document(source: &str) -> Result<Document, ParseFailure> {
    let text = normalise_trailing_newline(source);
    let lines = FeatureSource::new(&text);
    if !has_content(&lines) {
        debug!("source holds no feature");
        return Ok(Document::default());
    }

    let parsed = gherkin::Feature::parse(&*text, GherkinEnv::default())
        .map_err(|err| syntax_failure(&err))?;
    let feature = TreeBuilder { lines: &lines }.feature(&parsed, detect_language(&lines));
    debug!(
        feature = %feature.name,
        children = feature.children.len(),
        "parsed feature"
    );
    Ok(Document {
        feature: Some(feature),
    })
}

fn normalise_trailing_newline(source: &str) -> Cow<'_, str> {
    if source.ends_with('\n') {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(format!("{source}\n"))
    }
}

fn has_content(lines: &FeatureSource<'_>) -> bool {
    lines
        .lines_from(0)
        .any(|(_, line)| !matches!(line.kind(), LineKind::Blank | LineKind::Comment))
}

fn detect_language(lines: &FeatureSource<'_>) -> String {
    lines
        .lines_from(0)
        .take_while(|(_, line)| matches!(line.kind(), LineKind::Blank | LineKind::Comment))
        .find_map(|(_, line)| {
            LANGUAGE_HEADER
                .captures(line.as_str())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_owned())
        })
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
}

fn syntax_failure(err: &gherkin::ParseError) -> ParseFailure {
    let message = err.to_string();
    let location = std::iter::successors(Some(err as &(dyn StdError + 'static)), |&e| e.source())
        .find_map(|e| reported_location(&e.to_string()))
        .unwrap_or_else(|| Location::new(1, 1));
    warn!(
        %message,
        line = location.line,
        column = location.column,
        "feature failed to parse"
    );
    ParseFailure::single(SyntaxError::new(message, location))
}

fn reported_location(message: &str) -> Option<Location> {
    let caps = REPORTED_POSITION.captures(message)?;
    let line = caps.get(1)?.as_str().parse().ok()?;
    let column = caps.get(2)?.as_str().parse().ok()?;
    Some(Location::new(line, column))
}

/// A keyword line: its 0-based index and the keyword's location.
#[derive(Debug, Clone, Copy)]
struct Anchor<'a> {
    line_idx: usize,
    line: LineContent<'a>,
    location: Location,
}

struct TreeBuilder<'s, 'a> {
    lines: &'s FeatureSource<'a>,
}

impl<'a> TreeBuilder<'_, 'a> {
    fn anchor(&self, offset: usize) -> Anchor<'a> {
        match self.lines.keyword_line(offset) {
            Some((line_idx, line)) => Anchor {
                line_idx,
                line,
                location: location_at(line_idx, line, line.indent()),
            },
            None => {
                let line_idx = self.lines.line_index(offset);
                let line = self.lines.line(line_idx).unwrap_or_else(|| LineContent::new(""));
                Anchor {
                    line_idx,
                    line,
                    location: location_at(line_idx, line, 0),
                }
            }
        }
    }

    fn tags(&self, anchor: &Anchor<'_>) -> Vec<Tag> {
        tags::tags_above(self.lines, anchor.line_idx)
    }

    fn feature(&self, feature: &gherkin::Feature, language: String) -> Feature {
        let anchor = self.anchor(feature.span.start);

        let background = feature.background.as_ref().map(|bg| self.background(bg));
        let mut children: Vec<ScenarioDefinition> = background
            .iter()
            .cloned()
            .map(ScenarioDefinition::Background)
            .collect();
        children.extend(
            feature
                .scenarios
                .iter()
                .map(|scenario| self.definition(scenario, &[])),
        );
        self.flatten_rules(feature, background.as_ref(), &mut children);

        Feature {
            location: anchor.location,
            tags: self.tags(&anchor),
            language,
            keyword: feature.keyword.clone(),
            name: feature.name.clone(),
            description: feature.description.clone(),
            children,
        }
    }

    fn flatten_rules(
        &self,
        feature: &gherkin::Feature,
        feature_background: Option<&Background>,
        children: &mut Vec<ScenarioDefinition>,
    ) {
        let mut rule_background_in_effect = false;
        for rule in &feature.rules {
            let anchor = self.anchor(rule.span.start);
            let background = match (feature_background, rule.background.as_ref()) {
                (_, Some(own)) => {
                    let mut own = self.background(own);
                    let mut steps = feature_background.map(|bg| bg.steps.clone()).unwrap_or_default();
                    steps.append(&mut own.steps);
                    own.steps = steps;
                    Some(own)
                }
                (Some(inherited), None) => Some(inherited.clone()),
                (None, None) if rule_background_in_effect => Some(Background {
                    location: anchor.location,
                    keyword: "Background".to_owned(),
                    name: String::new(),
                    description: None,
                    steps: Vec::new(),
                }),
                (None, None) => None,
            };
            rule_background_in_effect = rule.background.is_some();
            children.extend(background.map(ScenarioDefinition::Background));

            let rule_tags = self.tags(&anchor);
            children.extend(
                rule.scenarios
                    .iter()
                    .map(|scenario| self.definition(scenario, &rule_tags)),
            );
        }
    }

    fn background(&self, background: &gherkin::Background) -> Background {
        let anchor = self.anchor(background.span.start);
        Background {
            location: anchor.location,
            keyword: background.keyword.clone(),
            name: background.name.clone(),
            description: background.description.clone(),
            steps: self.steps(&background.steps),
        }
    }

    fn definition(&self, scenario: &gherkin::Scenario, inherited: &[Tag]) -> ScenarioDefinition {
        let anchor = self.anchor(scenario.span.start);
        let mut tags = inherited.to_vec();
        tags.extend(self.tags(&anchor));
        let steps = self.steps(&scenario.steps);

        if !is_outline(scenario) {
            ScenarioDefinition::Scenario(Scenario {
                location: anchor.location,
                tags,
                keyword: scenario.keyword.clone(),
                name: scenario.name.clone(),
                description: scenario.description.clone(),
                steps,
            })
        } else {
            ScenarioDefinition::ScenarioOutline(ScenarioOutline {
                location: anchor.location,
                tags,
                keyword: scenario.keyword.clone(),
                name: scenario.name.clone(),
                description: scenario.description.clone(),
                steps,
                examples: scenario.examples.iter().map(|ex| self.examples(ex)).collect(),
            })
        }
    }

    fn examples(&self, examples: &gherkin::Examples) -> Examples {
        let anchor = self.anchor(examples.span.start);
        let (keyword, name) = split_keyword_line(anchor.line.trim_start());

        let mut rows = examples
            .table
            .as_ref()
            .map(|table| {
                let layouts = table::scan_rows(self.lines, table.span.start, table.rows.len());
                table::build_rows(&table.rows, &layouts, anchor.location)
            })
            .unwrap_or_default()
            .into_iter();
        let table_header = rows.next();

        Examples {
            location: anchor.location,
            tags: self.tags(&anchor),
            keyword,
            name,
            description: None,
            table_header,
            table_body: rows.collect(),
        }
    }

    fn steps(&self, steps: &[gherkin::Step]) -> Vec<Step> {
        steps.iter().map(|step| self.step(step)).collect()
    }

    fn step(&self, step: &gherkin::Step) -> Step {
        let anchor = self.anchor(step.span.start);
        let keyword = step_keyword(anchor.line, &step.keyword, &step.value);
        Step {
            location: anchor.location,
            keyword: Some(keyword),
            text: step.value.clone(),
            argument: self.step_argument(step, &anchor),
        }
    }

    fn step_argument(&self, step: &gherkin::Step, anchor: &Anchor<'_>) -> Option<StepArgument> {
        let below = Location::new(anchor.location.line.saturating_add(1), anchor.location.column);
        if let Some(table) = step.table.as_ref() {
            let layouts = table::scan_rows(self.lines, table.span.start, table.rows.len());
            let rows = table::build_rows(&table.rows, &layouts, below);
            let location = rows.first().map_or(below, |row| row.location);
            return Some(StepArgument::DataTable(DataTable { location, rows }));
        }
        step.docstring.as_ref().map(|content| {
            let head = docstring::find_doc_string(self.lines, anchor.line_idx);
            StepArgument::DocString(DocString {
                location: head.as_ref().map_or(below, |h| h.location),
                content: doc_string_content(content),
                content_type: head.and_then(|h| h.content_type),
            })
        })
    }
}

/// Outline keywords and examples both make a template. An outline without
/// examples therefore compiles to nothing.
fn is_outline(scenario: &gherkin::Scenario) -> bool {
    !scenario.examples.is_empty() || is_outline_keyword(&scenario.keyword)
}

fn is_outline_keyword(keyword: &str) -> bool {
    let keyword = keyword.trim();
    OUTLINE_KEYWORDS.lines().any(|known| known == keyword)
}

/// Doc string body as the lines between its delimiters.
///
/// `gherkin` hands back everything after the opening delimiter, so the rest
/// of that line (the media type) and the indentation of the closing
/// delimiter are dropped here, and the body is dedented.
fn doc_string_content(raw: &str) -> String {
    let mut lines: Vec<&str> = raw.split('\n').skip(1).collect();
    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keyword text as written, including the separator before the step text.
///
/// `gherkin` may or may not keep the trailing space, so the separator is
/// read back from the source line.
fn step_keyword(line: LineContent<'_>, keyword: &str, text: &str) -> String {
    let rest = line.tail(line.indent());
    let bare = keyword.trim_end();
    if let Some(after) = rest.strip_prefix(bare) {
        let separator = after.len() - after.trim_start().len();
        return format!("{bare}{}", after.get(..separator).unwrap_or_default());
    }
    rest.find(text)
        .and_then(|idx| rest.get(..idx))
        .filter(|prefix| !prefix.is_empty() && !text.is_empty())
        .map_or_else(|| format!("{bare} "), str::to_owned)
}

/// Split `Examples: name` into its keyword and name.
fn split_keyword_line(line: &str) -> (String, String) {
    match line.split_once(':') {
        Some((keyword, name)) => (keyword.trim().to_owned(), name.trim().to_owned()),
        None => (line.trim().to_owned(), String::new()),
    }
}
