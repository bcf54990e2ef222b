//! Off-side rule scanner: turns whitespace runs into layout tokens.
//!
//! Grammars with indentation-significant blocks cannot count columns
//! themselves. [`LayoutScanner`] keeps a stack of open indentation widths
//! and, at each line start, emits `NEWLINE` for a sibling line, `INDENT` for
//! a deeper one, and a `DEDENT`/`NEWLINE` pair for every level a shallower
//! line closes.
//!
//! Closing several levels at once produces several pairs. They are handed
//! out one token per call from a small queue, with the not-yet-started
//! dedents kept as a count that survives snapshots.

mod scanner;
mod token;

pub use scanner::LayoutScanner;
pub use token::LayoutToken;
