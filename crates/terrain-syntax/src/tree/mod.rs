//! Immutable syntax-tree arena.
//!
//! A [`SyntaxTree`] stores every node of a parse in a flat vector addressed by
//! [`NodeId`]. Nodes are laid out in pre-order, so the descendants of a node
//! occupy the contiguous id range that follows it. Traversal never mutates the
//! arena and never needs back-pointers to be kept in sync: a [`Node`] is a
//! `Copy` handle pairing the arena with an id.

mod builder;

use std::fmt;
use std::ops::Range;

use crate::parser::ParseResult;
use crate::position::{LineIndex, slice};

pub use builder::TreeBuilder;

/// Stable index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Id of the root node of every tree.
    pub const ROOT: Self = Self(0);

    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: Box<str>,
    range: Range<usize>,
    named: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position_in_parent: usize,
    subtree_end: NodeId,
}

/// A parsed source text and the arena of its syntax nodes.
#[derive(Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
    lines: LineIndex,
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("nodes", &self.nodes.len())
            .field("lines", &self.lines.line_count())
            .finish_non_exhaustive()
    }
}

impl SyntaxTree {
    /// Copies a Tree-sitter parse into an arena.
    ///
    /// Anonymous tokens (`=`, `,`) are kept so that every byte of the source
    /// belongs to some leaf.
    #[must_use]
    pub fn from_parse(parsed: &ParseResult) -> Self {
        let mut nodes: Vec<NodeData> = Vec::new();
        let mut cursor = parsed.root_node().walk();
        let mut ancestors: Vec<NodeId> = Vec::new();

        loop {
            let node = cursor.node();
            let id = push_node(
                &mut nodes,
                node.kind(),
                node.byte_range(),
                node.is_named(),
                ancestors.last().copied(),
            );

            if cursor.goto_first_child() {
                ancestors.push(id);
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return Self::assemble(parsed.source().to_owned(), nodes);
                }
                ancestors.pop();
            }
        }
    }

    fn assemble(source: String, mut nodes: Vec<NodeData>) -> Self {
        for index in (0..nodes.len()).rev() {
            let end = nodes
                .get(index)
                .and_then(|data| data.children.last())
                .and_then(|last| nodes.get(last.index()))
                .map_or_else(|| NodeId::from_index(index + 1), |last| last.subtree_end);
            if let Some(data) = nodes.get_mut(index) {
                data.subtree_end = end;
            }
        }
        let lines = LineIndex::new(&source);
        Self {
            source,
            nodes,
            lines,
        }
    }

    /// Returns the full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the line index of the source text.
    #[must_use]
    pub const fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the arena holds no nodes.
    ///
    /// Trees built by this crate always contain at least a root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Returns the node with the given id, if it belongs to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Returns the deepest node whose span strictly encloses `offset`
    /// (`start <= offset < end`), falling back to the root.
    #[must_use]
    pub fn smallest_enclosing(&self, offset: usize) -> Node<'_> {
        let mut current = self.root();
        while let Some(child) = current
            .children()
            .find(|child| child.start_byte() <= offset && offset < child.end_byte())
        {
            current = child;
        }
        current
    }

    /// Returns the largest non-root node that starts exactly at `offset`.
    ///
    /// The search descends to the leaf covering `offset`, then climbs while the
    /// parent starts at the same byte and is not the root.
    #[must_use]
    pub fn largest_starting_at(&self, offset: usize) -> Option<Node<'_>> {
        let leaf = self.smallest_enclosing(offset);
        if leaf.is_root() || leaf.start_byte() != offset {
            return None;
        }
        let mut current = leaf;
        while let Some(parent) = current.parent() {
            if parent.is_root() || parent.start_byte() != offset {
                break;
            }
            current = parent;
        }
        Some(current)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "node ids are only minted by the arena that owns them"
    )]
    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

fn push_node(
    nodes: &mut Vec<NodeData>,
    kind: &str,
    range: Range<usize>,
    named: bool,
    parent: Option<NodeId>,
) -> NodeId {
    let id = NodeId::from_index(nodes.len());
    let mut position_in_parent = 0;
    if let Some(parent_data) = parent.and_then(|parent| nodes.get_mut(parent.index())) {
        position_in_parent = parent_data.children.len();
        parent_data.children.push(id);
    }
    nodes.push(NodeData {
        kind: kind.into(),
        range,
        named,
        parent,
        children: Vec::new(),
        position_in_parent,
        subtree_end: id,
    });
    id
}

/// Read-only handle to a node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.kind(), self.byte_range())
    }
}

impl<'t> Node<'t> {
    /// Returns the arena id of this node.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// Returns the tree this node belongs to.
    #[must_use]
    pub const fn tree(self) -> &'t SyntaxTree {
        self.tree
    }

    fn data(self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    fn wrap(self, id: NodeId) -> Self {
        Self {
            tree: self.tree,
            id,
        }
    }

    /// Returns the grammar kind of this node (for example `block`).
    #[must_use]
    pub fn kind(self) -> &'t str {
        &self.data().kind
    }

    /// Returns `true` when the kind of this node is `kind`.
    #[must_use]
    pub fn is(self, kind: &str) -> bool {
        self.kind() == kind
    }

    /// Returns whether the node is a named grammar node rather than an
    /// anonymous token.
    #[must_use]
    pub fn is_named(self) -> bool {
        self.data().named
    }

    /// Returns whether this node is the root of its tree.
    #[must_use]
    pub fn is_root(self) -> bool {
        self.id == NodeId::ROOT
    }

    /// Returns the byte span of this node.
    #[must_use]
    pub fn byte_range(self) -> Range<usize> {
        self.data().range.clone()
    }

    /// Returns the first byte of this node.
    #[must_use]
    pub fn start_byte(self) -> usize {
        self.data().range.start
    }

    /// Returns the byte just past the end of this node.
    #[must_use]
    pub fn end_byte(self) -> usize {
        self.data().range.end
    }

    /// Returns the zero-based line this node starts on.
    #[must_use]
    pub fn start_line(self) -> usize {
        self.tree.lines.line_of_offset(self.start_byte())
    }

    /// Returns the source text covered by this node.
    #[must_use]
    pub fn text(self) -> &'t str {
        slice(&self.tree.source, self.byte_range())
    }

    /// Returns the parent node, or `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.data().parent.map(|id| self.wrap(id))
    }

    /// Returns the children of this node in source order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + 't {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Self { tree, id })
    }

    /// Returns the number of children.
    #[must_use]
    pub fn child_count(self) -> usize {
        self.data().children.len()
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(self, index: usize) -> Option<Self> {
        self.data().children.get(index).map(|&id| self.wrap(id))
    }

    /// Returns the first direct child of the given kind.
    #[must_use]
    pub fn child_of_kind(self, kind: &str) -> Option<Self> {
        self.children().find(|child| child.is(kind))
    }

    /// Returns the sibling that follows this node.
    #[must_use]
    pub fn next_sibling(self) -> Option<Self> {
        let position = self.data().position_in_parent;
        self.parent()?.child(position + 1)
    }

    /// Returns the sibling that precedes this node.
    #[must_use]
    pub fn prev_sibling(self) -> Option<Self> {
        let position = self.data().position_in_parent.checked_sub(1)?;
        self.parent()?.child(position)
    }

    /// Returns every descendant of this node in pre-order, excluding the node
    /// itself.
    pub fn descendants(self) -> impl Iterator<Item = Self> + 't {
        let tree = self.tree;
        let first = self.id.index() + 1;
        let end = self.data().subtree_end.index();
        (first..end).map(move |index| Self {
            tree,
            id: NodeId::from_index(index),
        })
    }

    /// Returns the `occurrence`-th (zero-based) descendant of the given kind,
    /// in pre-order.
    #[must_use]
    pub fn descendant_of_kind(self, kind: &str, occurrence: usize) -> Option<Self> {
        self.descendants()
            .filter(|node| node.is(kind))
            .nth(occurrence)
    }

    /// Returns the first descendant of the given kind no deeper than
    /// `max_depth` levels below this node (`1` means direct children).
    #[must_use]
    pub fn descendant_of_kind_within(self, kind: &str, max_depth: usize) -> Option<Self> {
        if max_depth == 0 {
            return None;
        }
        self.children().find_map(|child| {
            if child.is(kind) {
                Some(child)
            } else {
                child.descendant_of_kind_within(kind, max_depth - 1)
            }
        })
    }

    /// Returns the ancestors of this node, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = Self> + 't {
        std::iter::successors(self.parent(), |node| node.parent())
    }
}
