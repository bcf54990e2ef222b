//! Scanner for nested and custom-delimited literals.
//!
//! Three constructs need state or recursion a grammar cannot express:
//!
//! - Quoted strings `{tag|...|tag}` whose closer must repeat the opener's
//!   tag exactly. The tag is held in the scanner between the opener and
//!   closer tokens.
//! - Comments `(* ... *)` that nest, and inside which string literals,
//!   character literals and quoted strings are skipped as units, so a `*)`
//!   inside `"..."` does not end the comment.
//! - Line directives `# 12 "file.ml"` at the start of a line.
//!
//! [`NestedScanner`] also tracks whether the parser is inside an ordinary
//! `"..."` string, where none of the above apply.

mod comment;
mod quoted;
mod scanner;
mod token;

pub use scanner::NestedScanner;
pub use token::NestedToken;
