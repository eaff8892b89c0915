//! Behaviour-driven tests for indentation and outlines.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::unescape;
use crate::{DefinitionKind, Indenter, NameResolver, OutlineEntry, Parser, SyntaxTree};

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    tree: Option<SyntaxTree>,
    width: Option<u16>,
    reindented: Option<String>,
    outline: Vec<OutlineEntry>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

fn tree(world: &TestWorld) -> &SyntaxTree {
    world.tree.as_ref().expect("no source parsed")
}

fn flatten(entries: &[OutlineEntry]) -> Vec<(DefinitionKind, String)> {
    entries
        .iter()
        .flat_map(|entry| {
            std::iter::once((entry.kind, entry.name.clone())).chain(flatten(&entry.children))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the HCL source {source}")]
fn given_source(world: &mut TestWorld, source: String) {
    let text = unescape(source.trim_matches('"'));
    let mut parser = Parser::new().expect("parser init");
    world.tree = Some(parser.parse(&text).expect("parse").syntax_tree());
}

#[given("an indentation width of {width}")]
fn given_width(world: &mut TestWorld, width: u16) {
    world.width = Some(width);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the source is re-indented")]
fn when_reindented(world: &mut TestWorld) {
    let indenter = world.width.map_or_else(Indenter::default, Indenter::hcl);
    world.reindented = Some(indenter.reindent(tree(world)));
}

#[when("the outline is built")]
fn when_outline(world: &mut TestWorld) {
    world.outline = NameResolver::new().outline(tree(world));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the result is {expected}")]
fn then_result(world: &mut TestWorld, expected: String) {
    let expected_text = unescape(expected.trim_matches('"'));
    assert_eq!(
        world.reindented.as_deref(),
        Some(expected_text.as_str()),
        "unexpected indentation"
    );
}

#[then("the outline contains the block {name}")]
fn then_outline_block(world: &mut TestWorld, name: String) {
    let expected = unescape(name.trim_matches('"'));
    let entries = flatten(&world.outline);
    assert!(
        entries.contains(&(DefinitionKind::Block, expected.clone())),
        "expected block '{expected}' in {entries:?}"
    );
}

#[then("the outline contains the attribute {name}")]
fn then_outline_attribute(world: &mut TestWorld, name: String) {
    let expected = name.trim_matches('"');
    let entries = flatten(&world.outline);
    assert!(
        entries.contains(&(DefinitionKind::Attribute, expected.to_owned())),
        "expected attribute '{expected}' in {entries:?}"
    );
}

#[then("the outline is empty")]
fn then_outline_empty(world: &mut TestWorld) {
    assert!(
        world.outline.is_empty(),
        "expected no entries, got {:?}",
        world.outline
    );
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/indentation.feature")]
fn indentation_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/outline.feature")]
fn outline_behaviour(world: TestWorld) {
    let _ = world;
}
