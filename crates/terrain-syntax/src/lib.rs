//! Syntax-tree driven editing support for HCL (Terraform) sources.
//!
//! This crate provides the tree-walking halves of the Terrain toolchain:
//!
//! - **Parsing** via [`Parser`], an error-tolerant, incremental Tree-sitter
//!   parser for HCL, and [`SyntaxTree`], an immutable arena the rest of the
//!   crate walks
//! - **Indentation** via [`Indenter`], which evaluates an ordered table of
//!   [`IndentRule`]s (data, not code) to compute the column of a node or line
//! - **Outlines** via [`NameResolver`], which labels attributes and blocks for
//!   navigation menus and "go to definition"
//!
//! Indentation and outline queries are pure and synchronous. They read the
//! tree, never mutate it, and degrade gracefully on half-typed input instead
//! of returning errors.
//!
//! # Example
//!
//! ```
//! use terrain_syntax::{Indenter, NameResolver, Parser};
//!
//! let mut parser = Parser::new()?;
//! let parsed = parser.parse("resource \"aws_instance\" \"web\" {\nami = \"abc\"\n}\n")?;
//! let tree = parsed.syntax_tree();
//!
//! let indented = Indenter::default().reindent(&tree);
//! assert_eq!(indented, "resource \"aws_instance\" \"web\" {\n  ami = \"abc\"\n}\n");
//!
//! let outline = NameResolver::new().outline(&tree);
//! assert_eq!(outline[0].name, "aws_instance web");
//! # Ok::<(), terrain_syntax::SyntaxError>(())
//! ```
//!
//! Trees need not come from the bundled parser: [`TreeBuilder`] accepts any
//! node structure whose spans nest, which is how hosts with their own parser
//! plug in.

mod error;
pub mod hcl;
mod indent;
mod outline;
mod parser;
mod position;
mod tree;

pub use error::SyntaxError;
pub use indent::{Anchor, DEFAULT_INDENT_WIDTH, IndentRule, Indenter, NodeMatcher, hcl_rules};
pub use outline::{DefinitionKind, NameResolver, OutlineEntry};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo, TextEdit};
pub use position::LineIndex;
pub use tree::{Node, NodeId, SyntaxTree, TreeBuilder};

#[cfg(test)]
mod tests;
