//! Tree-sitter parsing wrapper for HCL with error recovery.
//!
//! This module wraps the raw Tree-sitter parser configured with the HCL
//! grammar. Parsing is error-tolerant: half-typed buffers still produce a
//! tree, with `ERROR` and missing nodes marking the damage. Edits can be
//! applied incrementally so that re-parsing after a keystroke reuses the
//! previous tree.

use std::ops::Range;

use tracing::debug;

use crate::error::SyntaxError;
use crate::position::{LineIndex, point_to_one_based};
use crate::tree::SyntaxTree;

/// Tracing target for parser operations.
const PARSER_TARGET: &str = "terrain_syntax::parser";

/// Result of parsing source code.
///
/// Contains the Tree-sitter tree along with the source it was built from.
#[derive(Debug, Clone)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the parsed Tree-sitter tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns whether the parse result contains any syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Collects all syntax errors found in the parse result.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &mut errors);
        errors
    }

    /// Returns the root node of the Tree-sitter tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Copies the parse into an immutable [`SyntaxTree`] arena.
    #[must_use]
    pub fn syntax_tree(&self) -> SyntaxTree {
        SyntaxTree::from_parse(self)
    }
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: u32,
    /// Column number (one-based) where the error starts.
    pub column: u32,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>) -> Self {
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "syntax error".to_owned()
        };
        let (line, column) = point_to_one_based(node.start_position());
        Self {
            byte_range: node.byte_range(),
            line,
            column,
            message,
        }
    }
}

/// A single text replacement applied to a previously parsed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte range of the previous source being replaced.
    pub range: Range<usize>,
    /// Text inserted in place of `range`.
    pub replacement: String,
}

impl TextEdit {
    /// Creates an edit replacing `range` with `replacement`.
    #[must_use]
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Tree-sitter parser configured for HCL.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a new HCL parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser rejects the grammar (an ABI
    /// version mismatch).
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_hcl::LANGUAGE.into())
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses source code and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("parsing failed"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }

    /// Applies `edit` to a previous parse and re-parses incrementally.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::EditOutOfBounds`] when the edit range does not
    /// lie on character boundaries of the previous source, or a parse error
    /// if Tree-sitter fails to produce a tree.
    pub fn reparse(
        &mut self,
        previous: &ParseResult,
        edit: &TextEdit,
    ) -> Result<ParseResult, SyntaxError> {
        let old_source = previous.source();
        let Range { start, end } = edit.range;
        let (Some(prefix), Some(suffix)) = (
            old_source.get(..start).filter(|_| start <= end),
            old_source.get(end..),
        ) else {
            return Err(SyntaxError::EditOutOfBounds {
                start,
                end,
                len: old_source.len(),
            });
        };

        let mut source =
            String::with_capacity(prefix.len() + edit.replacement.len() + suffix.len());
        source.push_str(prefix);
        source.push_str(&edit.replacement);
        source.push_str(suffix);

        let new_end = start + edit.replacement.len();
        let old_lines = LineIndex::new(old_source);
        let new_lines = LineIndex::new(&source);
        let input_edit = tree_sitter::InputEdit {
            start_byte: start,
            old_end_byte: end,
            new_end_byte: new_end,
            start_position: old_lines.point(start),
            old_end_position: old_lines.point(end),
            new_end_position: new_lines.point(new_end),
        };

        let mut old_tree = previous.tree.clone();
        old_tree.edit(&input_edit);

        debug!(
            target: PARSER_TARGET,
            start,
            old_end = end,
            new_end,
            "re-parsing after edit"
        );

        let tree = self
            .inner
            .parse(&source, Some(&old_tree))
            .ok_or_else(|| SyntaxError::parse("incremental parsing failed"))?;

        Ok(ParseResult { tree, source })
    }
}

/// Recursively collects all ERROR and missing nodes from a syntax tree.
fn collect_error_nodes(node: tree_sitter::Node<'_>, errors: &mut Vec<SyntaxErrorInfo>) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node));
    }
    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a = 1\n")]
    #[case("resource \"aws_instance\" \"web\" {\n  ami = \"abc\"\n}\n")]
    #[case("locals {\n  tags = { env = \"dev\" }\n}\n")]
    fn parser_parses_valid_source(#[case] source: &str) {
        let mut parser = Parser::new().expect("parser init");
        let result = parser.parse(source).expect("parse");

        assert!(!result.has_errors());
        assert_eq!(result.root_node().kind(), "config_file");
    }

    #[rstest]
    #[case("resource \"x\" {\n")]
    #[case("a = \n")]
    fn parser_detects_syntax_errors(#[case] source: &str) {
        let mut parser = Parser::new().expect("parser init");
        let result = parser.parse(source).expect("parse");

        assert!(result.has_errors());
        assert!(!result.errors().is_empty());
    }

    #[test]
    fn syntax_error_info_has_line_and_column() {
        let mut parser = Parser::new().expect("parser init");
        let result = parser.parse("a = 1\nb = \n").expect("parse");

        let first_error = result.errors().into_iter().next().expect("has error");
        assert!(first_error.line >= 1);
        assert!(first_error.column >= 1);
    }

    #[test]
    fn reparse_applies_the_edit() {
        let mut parser = Parser::new().expect("parser init");
        let first = parser.parse("a = 1\n").expect("parse");

        let second = parser
            .reparse(&first, &TextEdit::new(4..5, "\"two\""))
            .expect("reparse");

        assert_eq!(second.source(), "a = \"two\"\n");
        assert!(!second.has_errors());
    }

    #[test]
    fn reparse_matches_a_fresh_parse() {
        let mut parser = Parser::new().expect("parser init");
        let first = parser.parse("block {\n}\n").expect("parse");

        let edited = parser
            .reparse(&first, &TextEdit::new(8..8, "  x = 1\n"))
            .expect("reparse");
        let fresh = parser.parse("block {\n  x = 1\n}\n").expect("parse");

        assert_eq!(
            edited.root_node().to_sexp(),
            fresh.root_node().to_sexp()
        );
    }

    #[rstest]
    #[case(3..99)]
    #[case(4..2)]
    fn reparse_rejects_out_of_bounds_edits(#[case] range: Range<usize>) {
        let mut parser = Parser::new().expect("parser init");
        let first = parser.parse("a = 1\n").expect("parse");

        let error = parser
            .reparse(&first, &TextEdit::new(range, "x"))
            .expect_err("edit must be rejected");
        assert!(matches!(error, SyntaxError::EditOutOfBounds { .. }));
    }
}
