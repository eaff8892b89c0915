//! Rule-driven indentation.
//!
//! The [`Indenter`] interprets an ordered table of [`IndentRule`]s. For a node
//! it evaluates each rule against the node, its parent and its grandparent;
//! the first rule whose matcher holds and whose anchor resolves supplies the
//! column. Queries are pure: they only read the tree and never fail, so a
//! half-typed buffer still gets a best-effort answer.

mod rule;

use tracing::trace;

use crate::position::slice;
use crate::tree::{Node, SyntaxTree};

pub use rule::{Anchor, IndentRule, NodeMatcher, hcl_rules};

/// Tracing target for indentation queries.
const INDENT_TARGET: &str = "terrain_syntax::indent";

/// Indentation step used by [`Indenter::default`].
pub const DEFAULT_INDENT_WIDTH: u16 = 2;

/// Comment markers recognised by [`Anchor::PrevAdaptivePrefix`], longest
/// first.
const COMMENT_MARKERS: [&str; 4] = ["/*", "//", "#", "*"];

/// What the rules are evaluated against.
#[derive(Debug, Clone, Copy)]
struct Subject<'t> {
    tree: &'t SyntaxTree,
    node: Option<Node<'t>>,
    parent: Option<Node<'t>>,
    line: usize,
    /// Columns already assigned to the lines before `line` by a re-indent
    /// pass. Lines not covered keep their indentation from the source.
    assigned: &'t [usize],
}

impl<'t> Subject<'t> {
    fn grand_parent(self) -> Option<Node<'t>> {
        self.parent.and_then(Node::parent)
    }

    fn bol_column(self, line: usize) -> usize {
        match self.assigned.get(line) {
            Some(column) if line < self.line => *column,
            _ => leading_whitespace(line_text(self.tree, line)),
        }
    }
}

/// Computes indentation columns from an ordered rule table.
///
/// # Example
///
/// ```
/// use terrain_syntax::{Indenter, Parser};
///
/// let mut parser = Parser::new()?;
/// let parsed = parser.parse("block {\nx = 1\n}\n")?;
/// let tree = parsed.syntax_tree();
///
/// let indenter = Indenter::default();
/// assert_eq!(indenter.indent_for_line(&tree, 1), 2);
/// assert_eq!(indenter.reindent(&tree), "block {\n  x = 1\n}\n");
/// # Ok::<(), terrain_syntax::SyntaxError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indenter {
    rules: Vec<IndentRule>,
}

impl Default for Indenter {
    fn default() -> Self {
        Self::hcl(DEFAULT_INDENT_WIDTH)
    }
}

impl Indenter {
    /// Creates an indenter from an ordered rule table.
    #[must_use]
    pub const fn new(rules: Vec<IndentRule>) -> Self {
        Self { rules }
    }

    /// Creates an indenter with the default HCL rules.
    #[must_use]
    pub fn hcl(width: u16) -> Self {
        Self::new(hcl_rules(width))
    }

    /// Returns the rule table.
    #[must_use]
    pub fn rules(&self) -> &[IndentRule] {
        &self.rules
    }

    /// Computes the column at which `node` should start.
    #[must_use]
    pub fn compute_indent(&self, node: Node<'_>) -> usize {
        self.evaluate(Subject {
            tree: node.tree(),
            node: Some(node),
            parent: node.parent(),
            line: node.start_line(),
            assigned: &[],
        })
    }

    /// Computes the column for the zero-based `line` of the tree's source.
    ///
    /// The subject is the largest node starting at the line's first
    /// non-whitespace byte. Blank lines, and lines whose first character sits
    /// inside a larger node (multi-line comments, heredocs), are evaluated with
    /// no node and the innermost enclosing node as parent.
    #[must_use]
    pub fn indent_for_line(&self, tree: &SyntaxTree, line: usize) -> usize {
        self.indent_line(tree, line, &[])
    }

    fn indent_line(&self, tree: &SyntaxTree, line: usize, assigned: &[usize]) -> usize {
        let Some(range) = tree.lines().line_range(line) else {
            return 0;
        };
        let text = slice(tree.source(), range.clone());
        let first = range.start + (text.len() - text.trim_start().len());

        let node = if first == range.end {
            None
        } else {
            tree.largest_starting_at(first)
        };
        let parent = node.map_or_else(
            || {
                let enclosing = tree.smallest_enclosing(first);
                (!enclosing.is_root() || enclosing.start_byte() != first).then_some(enclosing)
            },
            Node::parent,
        );

        self.evaluate(Subject {
            tree,
            node,
            parent,
            line,
            assigned,
        })
    }

    /// Re-indents every line of the tree's source.
    ///
    /// Lines are processed top to bottom and anchors on earlier lines see the
    /// columns already assigned to them, so nesting is rebuilt even from
    /// flush-left input. Whitespace-only lines become empty, lines whose
    /// column is unchanged are copied verbatim, and line terminators are kept
    /// as they were.
    #[must_use]
    pub fn reindent(&self, tree: &SyntaxTree) -> String {
        let source = tree.source();
        let lines = tree.lines();
        let mut output = String::with_capacity(source.len());
        let mut assigned = Vec::with_capacity(lines.line_count());

        for line in 0..lines.line_count() {
            let Some(range) = lines.line_range(line) else {
                break;
            };
            let text = slice(source, range.clone());
            let content = text.trim_start();
            if content.is_empty() {
                assigned.push(0);
            } else {
                let column = self.indent_line(tree, line, &assigned);
                if column == leading_whitespace(text) {
                    output.push_str(text);
                } else {
                    output.extend(std::iter::repeat_n(' ', column));
                    output.push_str(content);
                }
                assigned.push(column);
            }
            let terminator_end = lines
                .line_range(line + 1)
                .map_or(source.len(), |next| next.start);
            output.push_str(slice(source, range.end..terminator_end));
        }
        output
    }

    fn evaluate(&self, subject: Subject<'_>) -> usize {
        for (index, rule) in self.rules.iter().enumerate() {
            if !matches(&rule.matcher, subject) {
                continue;
            }
            let Some(anchor) = resolve_anchor(rule.anchor, subject) else {
                continue;
            };
            let column = apply_offset(anchor, rule.offset);
            trace!(
                target: INDENT_TARGET,
                rule = index,
                line = subject.line,
                column,
                "indent rule matched"
            );
            return column;
        }

        // No rule: stay flush with the enclosing line, or column 0 at the top.
        subject
            .parent
            .map_or(0, |parent| subject.bol_column(parent.start_line()))
    }
}

fn matches(matcher: &NodeMatcher, subject: Subject<'_>) -> bool {
    match matcher {
        NodeMatcher::NodeIs(kind) => subject.node.is_some_and(|node| node.is(kind)),
        NodeMatcher::ParentIs(kind) => subject.parent.is_some_and(|parent| parent.is(kind)),
        NodeMatcher::GrandParentIs(kind) => subject
            .grand_parent()
            .is_some_and(|grand_parent| grand_parent.is(kind)),
        NodeMatcher::NoParent => subject.parent.is_none(),
        NodeMatcher::FirstOfKindInParent(kind) => match (subject.node, subject.parent) {
            (Some(node), Some(parent)) => {
                node.is(kind) && parent.child_of_kind(kind) == Some(node)
            }
            _ => false,
        },
        NodeMatcher::All(inner) => inner.iter().all(|each| matches(each, subject)),
        NodeMatcher::Any(inner) => inner.iter().any(|each| matches(each, subject)),
        NodeMatcher::Always => true,
    }
}

fn resolve_anchor(anchor: Anchor, subject: Subject<'_>) -> Option<usize> {
    match anchor {
        Anchor::Column0 => Some(0),
        Anchor::ParentBol => subject
            .parent
            .map(|parent| subject.bol_column(parent.start_line())),
        Anchor::GrandParentBol => subject
            .grand_parent()
            .map(|grand_parent| subject.bol_column(grand_parent.start_line())),
        Anchor::PrevAdaptivePrefix => prev_adaptive_prefix(subject),
        Anchor::Current => Some(subject.bol_column(subject.line)),
    }
}

fn apply_offset(anchor: usize, offset: i32) -> usize {
    anchor.saturating_add_signed(isize::try_from(offset).unwrap_or_default())
}

fn line_text(tree: &SyntaxTree, line: usize) -> &str {
    tree.lines()
        .line_range(line)
        .map_or("", |range| slice(tree.source(), range))
}

/// Width of the leading whitespace of `text`; tabs count as one column.
fn leading_whitespace(text: &str) -> usize {
    text.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count()
}

fn prev_adaptive_prefix(subject: Subject<'_>) -> Option<usize> {
    let previous_line = subject.line.checked_sub(1)?;
    let previous = line_text(subject.tree, previous_line);
    let current = line_text(subject.tree, subject.line).trim_start();
    let column = subject.bol_column(previous_line);
    let rest = previous.trim_start_matches([' ', '\t']);

    let Some(marker) = COMMENT_MARKERS
        .iter()
        .copied()
        .find(|marker| rest.starts_with(marker))
    else {
        return Some(column);
    };

    let star_continuation = current.starts_with('*') && matches!(marker, "/*" | "*");
    if star_continuation {
        return Some(if marker == "/*" { column + 1 } else { column });
    }
    if current.starts_with(marker) {
        return Some(column);
    }

    let after_marker = rest.get(marker.len()..).unwrap_or_default();
    Some(column + marker.len() + leading_whitespace(after_marker))
}
