//! Node kinds of the `tree-sitter-hcl` grammar used by the default rule
//! tables.

/// Root of every HCL file.
pub const CONFIG_FILE: &str = "config_file";
/// Sequence of attributes and blocks.
pub const BODY: &str = "body";
/// `type "label" { ... }`.
pub const BLOCK: &str = "block";
/// Opening `{` of a block.
pub const BLOCK_START: &str = "block_start";
/// Closing `}` of a block.
pub const BLOCK_END: &str = "block_end";
/// `name = expression`.
pub const ATTRIBUTE: &str = "attribute";
/// Bare identifier.
pub const IDENTIFIER: &str = "identifier";
/// Quoted string literal.
pub const STRING_LIT: &str = "string_lit";
/// Opening quote of a string literal.
pub const QUOTED_TEMPLATE_START: &str = "quoted_template_start";
/// Closing quote of a string literal.
pub const QUOTED_TEMPLATE_END: &str = "quoted_template_end";
/// Literal run inside a template.
pub const TEMPLATE_LITERAL: &str = "template_literal";
/// `<<EOT ... EOT` template.
pub const HEREDOC_TEMPLATE: &str = "heredoc_template";
/// `{ key = value }` object.
pub const OBJECT: &str = "object";
/// Closing `}` of an object.
pub const OBJECT_END: &str = "object_end";
/// `[a, b]` tuple.
pub const TUPLE: &str = "tuple";
/// Closing `]` of a tuple.
pub const TUPLE_END: &str = "tuple_end";
/// `name(args)` call.
pub const FUNCTION_CALL: &str = "function_call";
/// Arguments of a call.
pub const FUNCTION_ARGUMENTS: &str = "function_arguments";
/// Closing `)` of a call; an anonymous token in the grammar.
pub const CALL_END: &str = ")";
/// `#`, `//` or `/* */` comment.
pub const COMMENT: &str = "comment";
/// `[for v in xs : v]` comprehension.
pub const FOR_TUPLE_EXPR: &str = "for_tuple_expr";
/// `{for k, v in m : k => v}` comprehension.
pub const FOR_OBJECT_EXPR: &str = "for_object_expr";
/// Any expression; wraps parenthesised sub-expressions.
pub const EXPRESSION: &str = "expression";
/// `a + b`, `a && b` and the other infix operators.
pub const BINARY_OPERATION: &str = "binary_operation";
/// `cond ? a : b`.
pub const CONDITIONAL: &str = "conditional";
