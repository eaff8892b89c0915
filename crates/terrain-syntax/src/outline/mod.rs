//! Structural names for definition-like nodes.
//!
//! The [`NameResolver`] labels attributes and blocks the way an outline or a
//! "go to definition" menu displays them: `ami` for `ami = "..."`,
//! `aws_instance web` for `resource "aws_instance" "web" { ... }`. Label
//! text is taken literally from between the quotes; escapes are not
//! interpreted and interpolations are kept verbatim.

use std::ops::Range;

use serde::Serialize;

use crate::hcl;
use crate::position::slice;
use crate::tree::{Node, SyntaxTree};

/// Kind of definition an outline entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    /// `name = value`.
    Attribute,
    /// `type "label" { ... }`.
    Block,
}

/// One named definition in a file outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Whether the entry is a block or an attribute.
    pub kind: DefinitionKind,
    /// Display name produced by [`NameResolver::resolve_name`].
    pub name: String,
    /// One-based line on which the definition starts.
    pub line: usize,
    /// Byte span of the definition.
    pub byte_range: Range<usize>,
    /// Definitions nested inside this one, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

/// Resolves display names of HCL blocks and attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameResolver;

impl NameResolver {
    /// Creates a resolver for the HCL grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classifies `node` as a definition, if it is one.
    #[must_use]
    pub fn definition_kind(self, node: Node<'_>) -> Option<DefinitionKind> {
        match node.kind() {
            hcl::ATTRIBUTE => Some(DefinitionKind::Attribute),
            hcl::BLOCK => Some(DefinitionKind::Block),
            _ => None,
        }
    }

    /// Returns the display name of an attribute or block node.
    ///
    /// Attributes are named by their first identifier. Blocks are named by
    /// their first string label, joined with the following label when there
    /// is one, and fall back to their type identifier when unlabelled. Any
    /// other node, or a definition too damaged to carry a name, yields
    /// `None`.
    #[must_use]
    pub fn resolve_name(self, node: Node<'_>) -> Option<String> {
        match self.definition_kind(node)? {
            DefinitionKind::Attribute => node
                .child_of_kind(hcl::IDENTIFIER)
                .map(|identifier| identifier.text().to_owned()),
            DefinitionKind::Block => block_name(node),
        }
    }

    /// Builds the nested outline of every named definition in `tree`.
    ///
    /// Definitions that cannot be named are skipped, but their named
    /// descendants are still listed at the skipped node's level.
    #[must_use]
    pub fn outline(self, tree: &SyntaxTree) -> Vec<OutlineEntry> {
        let mut entries = Vec::new();
        self.collect(tree.root(), &mut entries);
        entries
    }

    /// Returns the innermost attribute or block containing byte `offset`.
    #[must_use]
    pub fn definition_at(self, tree: &SyntaxTree, offset: usize) -> Option<Node<'_>> {
        let enclosing = tree.smallest_enclosing(offset);
        std::iter::once(enclosing)
            .chain(enclosing.ancestors())
            .find(|node| self.definition_kind(*node).is_some())
    }

    fn collect(self, node: Node<'_>, entries: &mut Vec<OutlineEntry>) {
        for child in node.children() {
            let named = self
                .definition_kind(child)
                .zip(self.resolve_name(child));
            let Some((kind, name)) = named else {
                self.collect(child, entries);
                continue;
            };

            let mut children = Vec::new();
            if kind == DefinitionKind::Block {
                self.collect(child, &mut children);
            }
            entries.push(OutlineEntry {
                kind,
                name,
                line: child.start_line() + 1,
                byte_range: child.byte_range(),
                children,
            });
        }
    }
}

fn block_name(block: Node<'_>) -> Option<String> {
    let Some(first) = block.descendant_of_kind_within(hcl::STRING_LIT, 1) else {
        return block
            .child_of_kind(hcl::IDENTIFIER)
            .map(|identifier| identifier.text().to_owned());
    };

    let mut name = label_text(first).to_owned();
    if let Some(second) = first
        .next_sibling()
        .filter(|sibling| sibling.is(hcl::STRING_LIT))
    {
        name.push(' ');
        name.push_str(label_text(second));
    }
    Some(name)
}

/// Literal text of a string label without its quotes.
fn label_text(label: Node<'_>) -> &str {
    let delimiters = (
        label.child_of_kind(hcl::QUOTED_TEMPLATE_START),
        label.child_of_kind(hcl::QUOTED_TEMPLATE_END),
    );
    if let (Some(open), Some(close)) = delimiters {
        return slice(label.tree().source(), open.end_byte()..close.start_byte());
    }
    let text = label.text();
    let unopened = text.strip_prefix('"').unwrap_or(text);
    unopened.strip_suffix('"').unwrap_or(unopened)
}

#[cfg(test)]
mod tests;
