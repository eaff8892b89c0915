//! Manual construction of syntax trees.
//!
//! Hosts that already own a parse (or tests that want a precise shape) can
//! describe a tree node by node. Nodes are opened and closed in source order;
//! [`TreeBuilder::finish`] checks the span invariants before handing out the
//! arena.

use std::ops::Range;

use super::{NodeData, NodeId, SyntaxTree, push_node};
use crate::error::SyntaxError;

/// Incremental builder for a [`SyntaxTree`].
///
/// # Example
///
/// ```
/// use terrain_syntax::TreeBuilder;
///
/// let source = "a = 1";
/// let mut builder = TreeBuilder::new(source);
/// builder.open("config_file", 0..5);
/// builder.open("attribute", 0..5);
/// builder.leaf("identifier", 0..1);
/// builder.close();
/// builder.close();
/// let tree = builder.finish()?;
/// assert_eq!(tree.root().kind(), "config_file");
/// # Ok::<(), terrain_syntax::SyntaxError>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
    error: Option<SyntaxError>,
}

impl TreeBuilder {
    /// Starts a tree over `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
            open: Vec::new(),
            error: None,
        }
    }

    /// Opens a node; subsequent nodes become its children until
    /// [`close`](Self::close) is called.
    pub fn open(&mut self, kind: &str, range: Range<usize>) -> &mut Self {
        let id = self.push(kind, range);
        self.open.push(id);
        self
    }

    /// Adds a childless node under the currently open node.
    pub fn leaf(&mut self, kind: &str, range: Range<usize>) -> &mut Self {
        self.push(kind, range);
        self
    }

    /// Closes the most recently opened node.
    pub fn close(&mut self) -> &mut Self {
        if self.open.pop().is_none() {
            self.record(SyntaxError::invalid_tree("close without a matching open"));
        }
        self
    }

    /// Validates the collected nodes and returns the tree.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidTree`] when a node is still open, when
    /// there is not exactly one root, or when a span leaves the source, its
    /// parent's span, or overlaps the previous sibling.
    pub fn finish(mut self) -> Result<SyntaxTree, SyntaxError> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        if !self.open.is_empty() {
            return Err(SyntaxError::invalid_tree(format!(
                "{} node(s) left open",
                self.open.len()
            )));
        }
        if self.nodes.is_empty() {
            return Err(SyntaxError::invalid_tree("tree has no root"));
        }
        Ok(SyntaxTree::assemble(self.source, self.nodes))
    }

    fn push(&mut self, kind: &str, range: Range<usize>) -> NodeId {
        let parent = self.open.last().copied();
        if let Err(error) = self.check_span(parent, &range) {
            self.record(error);
        }
        push_node(&mut self.nodes, kind, range, true, parent)
    }

    fn check_span(&self, parent: Option<NodeId>, range: &Range<usize>) -> Result<(), SyntaxError> {
        if range.start > range.end || range.end > self.source.len() {
            return Err(SyntaxError::invalid_tree(format!(
                "span {range:?} is outside the source"
            )));
        }
        let Some(parent) = parent else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(SyntaxError::invalid_tree("tree has more than one root"))
            };
        };
        let Some(parent_data) = self.nodes.get(parent.index()) else {
            return Err(SyntaxError::invalid_tree("unknown parent"));
        };
        if range.start < parent_data.range.start || range.end > parent_data.range.end {
            return Err(SyntaxError::invalid_tree(format!(
                "span {range:?} escapes parent {} {:?}",
                parent_data.kind, parent_data.range
            )));
        }
        let previous = parent_data
            .children
            .last()
            .and_then(|sibling| self.nodes.get(sibling.index()));
        if let Some(previous) = previous {
            if range.start < previous.range.end {
                return Err(SyntaxError::invalid_tree(format!(
                    "span {range:?} overlaps sibling {} {:?}",
                    previous.kind, previous.range
                )));
            }
        }
        Ok(())
    }

    fn record(&mut self, error: SyntaxError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
