//! Crate-level integration and BDD tests.

use crate::{Indenter, NameResolver, Parser, TextEdit};

mod behaviour;

/// Expands the `\n` and `\"` escapes used by feature files.
pub(super) fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\\"", "\"")
}

#[test]
fn half_typed_buffers_still_indent_and_outline() {
    let mut parser = Parser::new().expect("parser init");
    let parsed = parser
        .parse("resource \"aws_s3_bucket\" \"logs\" {\nbucket = \n")
        .expect("parse");
    assert!(parsed.has_errors());

    let tree = parsed.syntax_tree();
    let indenter = Indenter::default();
    for line in 0..tree.lines().line_count() {
        let first = indenter.indent_for_line(&tree, line);
        let second = indenter.indent_for_line(&tree, line);
        assert_eq!(first, second);
    }
    // Damaged definitions may lose their names; nothing panics.
    let _outline = NameResolver::new().outline(&tree);
}

#[test]
fn edits_are_visible_to_the_next_query() {
    let mut parser = Parser::new().expect("parser init");
    let first = parser.parse("locals {\n}\n").expect("parse");
    let second = parser
        .reparse(&first, &TextEdit::new(9..9, "region = \"eu\"\n"))
        .expect("reparse");
    let tree = second.syntax_tree();

    assert_eq!(Indenter::default().indent_for_line(&tree, 1), 2);
    let names: Vec<_> = NameResolver::new()
        .outline(&tree)
        .into_iter()
        .flat_map(|entry| entry.children)
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["region"]);
}
