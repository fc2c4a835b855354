//! Unit tests for pickle compilation.

use super::*;
use crate::pickle::PickleLocation;
use crate::test_support::{
    background, document, examples, outline, row, scenario, step, tag, with_doc_string,
    with_table, STEP_COLUMN,
};
use rstest::{fixture, rstest};

#[expect(clippy::expect_used, reason = "test helper with descriptive failures")]
fn compile_ok(document: &Document) -> Vec<Pickle> {
    compile(document).expect("document should compile")
}

fn loc(line: u32, column: u32) -> PickleLocation {
    PickleLocation { line, column }
}

#[fixture]
fn cukes_outline() -> ScenarioDefinition {
    outline(
        "eating <start> cukes",
        10,
        vec![tag("@outline", 9)],
        vec![
            step("Given ", "there are <start> cukes", 11),
            step("When ", "I eat <eat> cukes", 12),
        ],
        vec![
            examples(
                14,
                vec![tag("@first", 13)],
                Some(&["start", "eat"]),
                &[&["12", "5"], &["20", "5"]],
            ),
            examples(19, vec![tag("@second", 18)], Some(&["start", "eat"]), &[&["7", "1"]]),
        ],
    )
}

#[test]
fn document_without_feature_compiles_to_nothing() {
    assert!(compile_ok(&Document::default()).is_empty());
}

#[test]
fn feature_without_children_compiles_to_nothing() {
    assert!(compile_ok(&document(vec![tag("@a", 1)], Vec::new())).is_empty());
}

#[test]
fn scenario_becomes_single_pickle() {
    let doc = document(
        Vec::new(),
        vec![scenario("eat", 3, Vec::new(), vec![step("Given ", "I have 3 cukes", 4)])],
    );

    let pickles = compile_ok(&doc);

    assert_eq!(
        pickles,
        vec![Pickle {
            name: "eat".to_owned(),
            steps: vec![PickleStep {
                text: "I have 3 cukes".to_owned(),
                arguments: Vec::new(),
                locations: vec![loc(4, STEP_COLUMN + 6)],
            }],
            tags: Vec::new(),
            locations: vec![loc(3, 3)],
        }]
    );
}

#[test]
fn stepless_definitions_are_dropped() {
    let doc = document(
        Vec::new(),
        vec![
            scenario("empty", 2, Vec::new(), Vec::new()),
            outline(
                "empty outline",
                4,
                Vec::new(),
                Vec::new(),
                vec![examples(5, Vec::new(), Some(&["x"]), &[&["1"], &["2"]])],
            ),
            scenario("kept", 9, Vec::new(), vec![step("Given ", "something", 10)]),
        ],
    );

    let names: Vec<_> = compile_ok(&doc).into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["kept"]);
}

#[test]
fn scenario_tags_follow_feature_tags_without_deduplication() {
    let doc = document(
        vec![tag("@a", 1)],
        vec![scenario(
            "tagged",
            4,
            vec![tag("@b", 3), tag("@a", 3)],
            vec![step("Given ", "x", 5)],
        )],
    );

    let pickles = compile_ok(&doc);
    let names: Vec<_> = pickles.iter().flat_map(Pickle::tag_names).collect();
    assert_eq!(names, ["@a", "@b", "@a"]);
}

#[rstest]
fn outline_tags_append_examples_tags(cukes_outline: ScenarioDefinition) {
    let doc = document(vec![tag("@feature", 1)], vec![cukes_outline]);

    let tags: Vec<Vec<String>> = compile_ok(&doc)
        .iter()
        .map(|p| p.tag_names().map(str::to_owned).collect())
        .collect();

    assert_eq!(
        tags,
        vec![
            vec!["@feature", "@outline", "@first"],
            vec!["@feature", "@outline", "@first"],
            vec!["@feature", "@outline", "@second"],
        ]
    );
}

#[rstest]
fn outline_yields_one_pickle_per_row_in_reading_order(cukes_outline: ScenarioDefinition) {
    let doc = document(Vec::new(), vec![cukes_outline]);

    let pickles = compile_ok(&doc);

    let names: Vec<_> = pickles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["eating 12 cukes", "eating 20 cukes", "eating 7 cukes"]
    );
    let texts: Vec<Vec<_>> = pickles
        .iter()
        .map(|p| p.step_texts().collect())
        .collect();
    assert_eq!(
        texts,
        vec![
            vec!["there are 12 cukes", "I eat 5 cukes"],
            vec!["there are 20 cukes", "I eat 5 cukes"],
            vec!["there are 7 cukes", "I eat 1 cukes"],
        ]
    );
}

#[rstest]
fn outline_locations_stack_row_before_template(cukes_outline: ScenarioDefinition) {
    let doc = document(Vec::new(), vec![cukes_outline]);

    let pickles = compile_ok(&doc);
    let Some(first) = pickles.first() else {
        panic!("expected at least one pickle");
    };

    assert_eq!(first.locations, vec![loc(16, 7), loc(10, 3)]);
    let step_locations: Vec<_> = first.steps.iter().map(|s| s.locations.clone()).collect();
    assert_eq!(
        step_locations,
        vec![
            vec![loc(16, 7), loc(11, STEP_COLUMN + 6)],
            vec![loc(16, 7), loc(12, STEP_COLUMN + 5)],
        ]
    );
}

#[test]
fn outline_step_location_matches_documented_example() {
    let doc = document(
        Vec::new(),
        vec![outline(
            "o",
            10,
            Vec::new(),
            vec![step("Given ", "I have <count> cukes", 11)],
            vec![examples(18, Vec::new(), Some(&["count"]), &[&["42"]])],
        )],
    );
    // The header sits on line 19, so the only row is on line 20.
    let pickles = compile_ok(&doc);
    let locations: Vec<_> = pickles
        .iter()
        .flat_map(|p| p.steps.iter().map(|s| s.locations.clone()))
        .collect();
    assert_eq!(
        locations,
        vec![vec![loc(20, 7), loc(11, STEP_COLUMN + 6)]]
    );
}

#[test]
fn headerless_examples_are_skipped() {
    let doc = document(
        Vec::new(),
        vec![outline(
            "o",
            2,
            Vec::new(),
            vec![step("Given ", "<x>", 3)],
            vec![
                examples(5, Vec::new(), None, &[]),
                examples(7, Vec::new(), Some(&["x"]), &[&["only"]]),
            ],
        )],
    );

    let texts: Vec<_> = compile_ok(&doc)
        .iter()
        .flat_map(|p| p.step_texts().map(str::to_owned).collect::<Vec<_>>())
        .collect();
    assert_eq!(texts, ["only"]);
}

#[test]
fn examples_with_header_but_no_rows_yield_nothing() {
    let doc = document(
        Vec::new(),
        vec![outline(
            "o",
            2,
            Vec::new(),
            vec![step("Given ", "<x>", 3)],
            vec![examples(5, Vec::new(), Some(&["x"]), &[])],
        )],
    );
    assert!(compile_ok(&doc).is_empty());
}

#[test]
fn background_steps_prepend_to_scenarios_and_every_outline_row() {
    let doc = document(
        Vec::new(),
        vec![
            background(2, vec![step("Given ", "B1 <x>", 3), step("And ", "B2", 4)]),
            scenario("plain", 6, Vec::new(), vec![step("When ", "S", 7)]),
            outline(
                "outline",
                9,
                Vec::new(),
                vec![step("Then ", "O <x>", 10)],
                vec![examples(12, Vec::new(), Some(&["x"]), &[&["1"], &["2"], &["3"]])],
            ),
        ],
    );

    let pickles = compile_ok(&doc);
    assert_eq!(pickles.len(), 4);
    for pickle in &pickles {
        let texts: Vec<_> = pickle.step_texts().take(2).collect();
        assert_eq!(texts, ["B1 <x>", "B2"], "pickle {}", pickle.name);
        let Some(first) = pickle.steps.first() else {
            panic!("pickle {} has no steps", pickle.name);
        };
        assert_eq!(first.locations, vec![loc(3, STEP_COLUMN + 6)]);
    }
}

#[test]
fn later_background_replaces_earlier_one() {
    let doc = document(
        Vec::new(),
        vec![
            background(2, vec![step("Given ", "first", 3)]),
            scenario("a", 5, Vec::new(), vec![step("When ", "a", 6)]),
            background(8, vec![step("Given ", "second", 9)]),
            scenario("b", 11, Vec::new(), vec![step("When ", "b", 12)]),
        ],
    );

    let texts: Vec<Vec<_>> = compile_ok(&doc)
        .iter()
        .map(|p| p.step_texts().map(str::to_owned).collect())
        .collect();
    assert_eq!(
        texts,
        vec![
            vec!["first".to_owned(), "a".to_owned()],
            vec!["second".to_owned(), "b".to_owned()],
        ]
    );
}

#[test]
fn scenario_before_background_gets_no_background() {
    let doc = document(
        Vec::new(),
        vec![
            scenario("early", 2, Vec::new(), vec![step("When ", "early", 3)]),
            background(5, vec![step("Given ", "bg", 6)]),
        ],
    );
    let pickles = compile_ok(&doc);
    let texts: Vec<_> = pickles.iter().flat_map(Pickle::step_texts).collect();
    assert_eq!(texts, ["early"]);
}

#[test]
fn outline_arguments_are_interpolated() {
    let doc = document(
        Vec::new(),
        vec![outline(
            "o",
            2,
            Vec::new(),
            vec![
                with_table(step("Given ", "a table", 3), &[&["name", "<who>"]]),
                with_doc_string(step("And ", "a doc", 5), "hello <who>"),
            ],
            vec![examples(10, Vec::new(), Some(&["who"]), &[&["world"]])],
        )],
    );

    let pickles = compile_ok(&doc);
    let arguments: Vec<_> = pickles
        .iter()
        .flat_map(|p| p.steps.iter().flat_map(|s| s.arguments.clone()))
        .collect();
    assert_eq!(
        arguments,
        vec![
            PickleArgument::Table(PickleTable {
                rows: vec![PickleRow {
                    cells: vec![
                        PickleCell {
                            location: loc(4, 9),
                            value: "name".to_owned(),
                        },
                        PickleCell {
                            location: loc(4, 13),
                            value: "world".to_owned(),
                        },
                    ],
                }],
            }),
            PickleArgument::String(PickleString {
                location: loc(6, 7),
                content: "hello world".to_owned(),
            }),
        ]
    );
}

#[test]
fn plain_step_arguments_are_copied_verbatim() {
    let doc = document(
        Vec::new(),
        vec![scenario(
            "s",
            2,
            Vec::new(),
            vec![with_doc_string(step("Given ", "doc", 3), "keep <this>")],
        )],
    );
    let pickles = compile_ok(&doc);
    let contents: Vec<_> = pickles
        .iter()
        .flat_map(|p| p.steps.iter().flat_map(|s| s.arguments.clone()))
        .collect();
    assert_eq!(
        contents,
        vec![PickleArgument::String(PickleString {
            location: loc(4, 7),
            content: "keep <this>".to_owned(),
        })]
    );
}

#[test]
fn step_without_keyword_keeps_raw_location() {
    let mut bare = step("Given ", "bare", 3);
    bare.keyword = None;
    let doc = document(Vec::new(), vec![scenario("s", 2, Vec::new(), vec![bare])]);
    let pickles = compile_ok(&doc);
    let locations: Vec<_> = pickles
        .iter()
        .flat_map(|p| p.steps.iter().flat_map(|s| s.locations.clone()))
        .collect();
    assert_eq!(locations, vec![loc(3, STEP_COLUMN)]);
}

#[test]
fn keyword_width_counts_codepoints() {
    let doc = document(
        Vec::new(),
        vec![scenario(
            "s",
            2,
            Vec::new(),
            vec![step("\u{1F952} ", "emoji keyword", 3), step("前提", "cjk", 4)],
        )],
    );
    let pickles = compile_ok(&doc);
    let columns: Vec<_> = pickles
        .iter()
        .flat_map(|p| p.steps.iter().flat_map(|s| s.locations.clone()))
        .map(|l| l.column)
        .collect();
    assert_eq!(columns, [STEP_COLUMN + 2, STEP_COLUMN + 2]);
}

#[test]
fn mismatched_row_width_is_reported() {
    let mut block = examples(5, Vec::new(), Some(&["a", "b"]), &[]);
    block.table_body.push(row(7, &["only one"]));
    let doc = document(
        Vec::new(),
        vec![outline("o", 2, Vec::new(), vec![step("Given ", "<a>", 3)], vec![block])],
    );

    assert_eq!(
        compile(&doc),
        Err(CompileError::RowWidthMismatch {
            line: 7,
            header_width: 2,
            row_width: 1,
        })
    );
}

#[rstest]
fn compiling_twice_yields_identical_pickles(cukes_outline: ScenarioDefinition) {
    let doc = document(
        vec![tag("@a", 1)],
        vec![
            background(2, vec![step("Given ", "bg", 3)]),
            cukes_outline,
        ],
    );
    assert_eq!(compile_ok(&doc), compile_ok(&doc));
}
