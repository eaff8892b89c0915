//! Indentation rules expressed as data.
//!
//! A rule pairs a [`NodeMatcher`] predicate with an [`Anchor`] and a signed
//! offset. Rule tables are plain vectors, so supporting a new bracket or
//! structure kind is a matter of adding an entry rather than a code path.
//! Rules also round-trip through serde, which lets hosts ship their own
//! tables in configuration files.

use serde::{Deserialize, Serialize};

use crate::hcl;

/// Predicate over the node being indented and its ancestry.
///
/// When a line has no node starting on it (blank lines, lines inside a
/// multi-line comment) only the parent-based predicates can match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "kind", rename_all = "snake_case")]
pub enum NodeMatcher {
    /// The node has the given kind.
    NodeIs(String),
    /// The parent has the given kind.
    ParentIs(String),
    /// The parent's parent has the given kind.
    GrandParentIs(String),
    /// There is no parent (the node is the root).
    NoParent,
    /// The node has the given kind and is the first such child of its parent.
    FirstOfKindInParent(String),
    /// Every inner matcher holds.
    All(Vec<NodeMatcher>),
    /// At least one inner matcher holds.
    Any(Vec<NodeMatcher>),
    /// Always holds; used as a catch-all.
    Always,
}

impl NodeMatcher {
    /// Matches nodes of `kind`.
    #[must_use]
    pub fn node_is(kind: impl Into<String>) -> Self {
        Self::NodeIs(kind.into())
    }

    /// Matches nodes whose parent is of `kind`.
    #[must_use]
    pub fn parent_is(kind: impl Into<String>) -> Self {
        Self::ParentIs(kind.into())
    }

    /// Matches nodes whose grandparent is of `kind`.
    #[must_use]
    pub fn grand_parent_is(kind: impl Into<String>) -> Self {
        Self::GrandParentIs(kind.into())
    }

    /// Matches the first child of `kind` inside its parent.
    #[must_use]
    pub fn first_of_kind_in_parent(kind: impl Into<String>) -> Self {
        Self::FirstOfKindInParent(kind.into())
    }

    /// Matches any of the given node kinds.
    #[must_use]
    pub fn node_is_any(kinds: &[&str]) -> Self {
        Self::Any(kinds.iter().map(|kind| Self::node_is(*kind)).collect())
    }

    /// Matches nodes whose parent is any of the given kinds.
    #[must_use]
    pub fn parent_is_any(kinds: &[&str]) -> Self {
        Self::Any(kinds.iter().map(|kind| Self::parent_is(*kind)).collect())
    }
}

/// Reference column a rule's offset is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Column 0.
    Column0,
    /// Indentation of the line on which the parent starts.
    ParentBol,
    /// Indentation of the line on which the grandparent starts.
    GrandParentBol,
    /// Comment continuation: aligns with the comment marker, or the text
    /// after it, on the previous line.
    PrevAdaptivePrefix,
    /// The line's existing indentation; leaves the line untouched.
    Current,
}

/// One ordered `(matcher, anchor, offset)` entry of a rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentRule {
    /// Predicate selecting the nodes this rule applies to.
    pub matcher: NodeMatcher,
    /// Column the offset is measured from.
    pub anchor: Anchor,
    /// Signed number of columns added to the anchor.
    #[serde(default)]
    pub offset: i32,
}

impl IndentRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(matcher: NodeMatcher, anchor: Anchor, offset: i32) -> Self {
        Self {
            matcher,
            anchor,
            offset,
        }
    }
}

/// Returns the default HCL rule table for an indentation step of `width`
/// columns.
///
/// Closing delimiters align with the line that opened them. Content nested in
/// blocks, calls, tuples, objects and `for` comprehensions is indented one
/// step, as are continuation lines of operators, conditionals and
/// parentheses. Top-level nodes always sit at column 0.
#[must_use]
pub fn hcl_rules(width: u16) -> Vec<IndentRule> {
    let step = i32::from(width);
    vec![
        IndentRule::new(
            NodeMatcher::node_is_any(&[
                hcl::BLOCK_END,
                hcl::OBJECT_END,
                hcl::TUPLE_END,
                hcl::CALL_END,
                hcl::BLOCK_START,
            ]),
            Anchor::ParentBol,
            0,
        ),
        IndentRule::new(
            NodeMatcher::parent_is(hcl::COMMENT),
            Anchor::PrevAdaptivePrefix,
            0,
        ),
        IndentRule::new(
            NodeMatcher::parent_is_any(&[hcl::HEREDOC_TEMPLATE, hcl::TEMPLATE_LITERAL]),
            Anchor::Current,
            0,
        ),
        IndentRule::new(NodeMatcher::NoParent, Anchor::Column0, 0),
        IndentRule::new(NodeMatcher::parent_is(hcl::CONFIG_FILE), Anchor::Column0, 0),
        IndentRule::new(
            NodeMatcher::All(vec![
                NodeMatcher::parent_is(hcl::BODY),
                NodeMatcher::grand_parent_is(hcl::CONFIG_FILE),
            ]),
            Anchor::Column0,
            0,
        ),
        IndentRule::new(NodeMatcher::parent_is(hcl::BODY), Anchor::GrandParentBol, step),
        IndentRule::new(NodeMatcher::parent_is(hcl::BLOCK), Anchor::ParentBol, step),
        IndentRule::new(
            NodeMatcher::parent_is_any(&[
                hcl::OBJECT,
                hcl::TUPLE,
                hcl::FOR_OBJECT_EXPR,
                hcl::FOR_TUPLE_EXPR,
            ]),
            Anchor::ParentBol,
            step,
        ),
        IndentRule::new(
            NodeMatcher::parent_is(hcl::FUNCTION_ARGUMENTS),
            Anchor::GrandParentBol,
            step,
        ),
        IndentRule::new(
            NodeMatcher::parent_is(hcl::FUNCTION_CALL),
            Anchor::ParentBol,
            step,
        ),
        IndentRule::new(NodeMatcher::parent_is(hcl::ATTRIBUTE), Anchor::ParentBol, step),
        IndentRule::new(
            NodeMatcher::parent_is_any(&[
                hcl::BINARY_OPERATION,
                hcl::CONDITIONAL,
                hcl::EXPRESSION,
            ]),
            Anchor::ParentBol,
            step,
        ),
    ]
}
