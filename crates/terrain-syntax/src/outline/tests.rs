use super::*;

use rstest::{fixture, rstest};

use crate::{Parser, TreeBuilder};

const MAIN_TF: &str = r#"resource "aws_instance" "web" {
  ami = "abc"
  ebs_block_device {
    size = 8
  }
}

variable "region" {
  default = "eu-west-1"
}

terraform_version = "1.9"
"#;

#[fixture]
fn main_tf() -> SyntaxTree {
    let mut parser = Parser::new().expect("parser init");
    parser.parse(MAIN_TF).expect("parse").syntax_tree()
}

fn parse(source: &str) -> SyntaxTree {
    let mut parser = Parser::new().expect("parser init");
    parser.parse(source).expect("parse").syntax_tree()
}

fn first_block_name(source: &str) -> Option<String> {
    let tree = parse(source);
    let block = tree.root().descendant_of_kind(hcl::BLOCK, 0)?;
    NameResolver::new().resolve_name(block)
}

#[rstest]
#[case::two_labels("resource \"aws_instance\" \"web\" {\n}\n", "aws_instance web")]
#[case::one_label("variable \"region\" {\n}\n", "region")]
#[case::no_label("locals {\n}\n", "locals")]
#[case::escapes_kept("resource \"a\\\"b\" \"c\" {\n}\n", "a\\\"b c")]
fn names_blocks_by_their_labels(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(first_block_name(source).as_deref(), Some(expected));
}

#[rstest]
fn names_attributes_by_their_identifier(main_tf: SyntaxTree) {
    let attribute = main_tf
        .root()
        .descendant_of_kind(hcl::ATTRIBUTE, 0)
        .expect("attribute");
    assert_eq!(
        NameResolver::new().resolve_name(attribute).as_deref(),
        Some("ami")
    );
}

#[rstest]
fn other_nodes_have_no_name(main_tf: SyntaxTree) {
    let resolver = NameResolver::new();
    assert_eq!(resolver.resolve_name(main_tf.root()), None);

    let label = main_tf
        .root()
        .descendant_of_kind(hcl::STRING_LIT, 0)
        .expect("label");
    assert_eq!(resolver.resolve_name(label), None);
}

#[test]
fn attribute_without_identifier_has_no_name() {
    let mut builder = TreeBuilder::new("= 1");
    builder
        .open("config_file", 0..3)
        .open("attribute", 0..3)
        .leaf("expression", 2..3)
        .close()
        .close();
    let tree = builder.finish().expect("tree");
    let attribute = tree.root().child(0).expect("attribute");

    assert_eq!(NameResolver::new().resolve_name(attribute), None);
}

#[test]
fn unterminated_label_is_stripped_of_its_opening_quote() {
    let source = "module \"vpc {";
    let mut builder = TreeBuilder::new(source);
    builder
        .open("config_file", 0..13)
        .open("block", 0..13)
        .leaf("identifier", 0..6)
        .leaf("string_lit", 7..11)
        .leaf("block_start", 12..13)
        .close()
        .close();
    let tree = builder.finish().expect("tree");
    let block = tree.root().child(0).expect("block");

    assert_eq!(
        NameResolver::new().resolve_name(block).as_deref(),
        Some("vpc")
    );
}

#[test]
fn labels_are_not_looked_up_below_direct_children() {
    let source = "a { \"x\" }";
    let mut builder = TreeBuilder::new(source);
    builder
        .open("config_file", 0..9)
        .open("block", 0..9)
        .leaf("identifier", 0..1)
        .open("body", 4..7)
        .leaf("string_lit", 4..7)
        .close()
        .close()
        .close();
    let tree = builder.finish().expect("tree");
    let block = tree.root().child(0).expect("block");

    assert_eq!(NameResolver::new().resolve_name(block).as_deref(), Some("a"));
}

#[rstest]
fn outline_nests_definitions(main_tf: SyntaxTree) {
    let outline = NameResolver::new().outline(&main_tf);
    let summary: Vec<_> = outline
        .iter()
        .map(|entry| (entry.kind, entry.name.as_str(), entry.line))
        .collect();

    assert_eq!(
        summary,
        vec![
            (DefinitionKind::Block, "aws_instance web", 1),
            (DefinitionKind::Block, "region", 8),
            (DefinitionKind::Attribute, "terraform_version", 12),
        ]
    );

    let resource = outline.first().expect("resource");
    let nested: Vec<_> = resource
        .children
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(nested, vec!["ami", "ebs_block_device"]);

    let device = resource.children.get(1).expect("device");
    assert_eq!(device.children.len(), 1);
    assert_eq!(device.children.first().map(|entry| entry.line), Some(4));
}

#[rstest]
fn outline_serializes_without_empty_children(main_tf: SyntaxTree) {
    let outline = NameResolver::new().outline(&main_tf);
    let json = serde_json::to_value(&outline).expect("json");

    let last = json.as_array().and_then(|entries| entries.last()).expect("entry");
    assert_eq!(last.get("kind").and_then(|kind| kind.as_str()), Some("attribute"));
    assert_eq!(
        last.get("name").and_then(|name| name.as_str()),
        Some("terraform_version")
    );
    assert!(last.get("children").is_none());
}

#[rstest]
fn definition_at_finds_the_innermost_definition(main_tf: SyntaxTree) {
    let resolver = NameResolver::new();
    let offset = MAIN_TF.find("size").expect("size");

    let innermost = resolver.definition_at(&main_tf, offset).expect("definition");
    assert_eq!(resolver.resolve_name(innermost).as_deref(), Some("size"));

    let label = MAIN_TF.find("ebs_block_device").expect("device");
    let block = resolver.definition_at(&main_tf, label).expect("block");
    assert_eq!(
        resolver.resolve_name(block).as_deref(),
        Some("ebs_block_device")
    );
}

#[rstest]
fn definition_at_between_definitions_is_none(main_tf: SyntaxTree) {
    let blank_line = MAIN_TF.find("\n\nvariable").expect("gap") + 1;
    assert_eq!(NameResolver::new().definition_at(&main_tf, blank_line), None);
}
