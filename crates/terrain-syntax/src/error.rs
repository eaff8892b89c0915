//! Error types for syntax-tree operations.
//!
//! Parsing and tree construction are the only fallible operations in this
//! crate. Indentation and outline queries never fail: they degrade to a
//! best-effort answer on malformed input.

use thiserror::Error;

/// Errors from parsing and syntax-tree construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser with the HCL grammar.
    #[error("failed to initialise HCL parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter did not produce a tree for the source.
    #[error("failed to parse HCL: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// An edit referred to a byte range outside the previous source.
    #[error("edit range {start}..{end} is outside the source ({len} bytes)")]
    EditOutOfBounds {
        /// Start of the rejected range.
        start: usize,
        /// End of the rejected range.
        end: usize,
        /// Length of the source the edit was applied to.
        len: usize,
    },

    /// A tree supplied through [`TreeBuilder`](crate::TreeBuilder) breaks the
    /// span invariants.
    #[error("invalid syntax tree: {message}")]
    InvalidTree {
        /// Description of the violated invariant.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates an invalid tree error.
    #[must_use]
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }
}
