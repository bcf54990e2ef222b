//! Lexical-mode scanner for shell grammars.
//!
//! Shell tokenization depends on context a grammar cannot see: whether a
//! heredoc body is pending, whether `)` ends a case item or an extended glob,
//! which of three regex flavors the current operator expects. The host
//! announces what it can accept at each position; [`ShellScanner`] runs a
//! fixed, ordered list of resolvers gated on that set and the first one that
//! applies decides the call.
//!
//! Persistent state is small: the stack of open heredocs and the paren depth
//! of an extended glob interrupted by an expansion.

mod dispatch;
mod extglob;
mod heredoc;
mod nesting;
mod regex;
mod scanner;
mod token;
mod words;

pub use heredoc::{Heredoc, HeredocFlags};
pub use scanner::ShellScanner;
pub use token::ShellToken;
