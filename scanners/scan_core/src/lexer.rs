//! Cursor abstraction handed to a scanner by its host parser.
//!
//! The host owns the character stream; a scanner only sees the current
//! lookahead code point and a handful of operations on it. Every scanner
//! call starts with the token start and end at the cursor.
//!
//! # Token Boundaries
//!
//! - [`consume()`](Lexer::consume) advances and includes the code point in
//!   the token.
//! - [`ignore()`](Lexer::ignore) advances and moves the token start past the
//!   code point, so leading trivia never becomes part of the token.
//! - [`mark_end()`](Lexer::mark_end) freezes the token end at the cursor.
//!   Later input can still be inspected; it is only used to decide.
//!   Without a call to `mark_end()`, the token ends wherever the cursor
//!   stands when the scanner returns.

/// Host-provided cursor over the character stream.
pub trait Lexer {
    /// The current code point, or `'\0'` at end of input.
    ///
    /// Embedded NUL characters also read as `'\0'`; use
    /// [`is_eof()`](Self::is_eof) to tell them apart.
    fn lookahead(&self) -> char;

    /// Advance past the lookahead. With `skip`, the code point is excluded
    /// from the token and the token start moves past it.
    fn advance(&mut self, skip: bool);

    /// Freeze the token end at the current position.
    fn mark_end(&mut self);

    /// Column of the cursor, counted in code points from the line start.
    fn column(&mut self) -> u32;

    /// Returns `true` once the cursor has passed the last code point.
    fn is_eof(&self) -> bool;

    /// Advance past the lookahead, including it in the token.
    #[inline]
    fn consume(&mut self) {
        self.advance(false);
    }

    /// Advance past the lookahead, excluding it from the token.
    #[inline]
    fn ignore(&mut self) {
        self.advance(true);
    }

    /// Returns `true` if the lookahead is `c`.
    #[inline]
    fn at(&self, c: char) -> bool {
        self.lookahead() == c
    }

    /// Returns `true` if the lookahead satisfies `pred`.
    #[inline]
    fn at_class(&self, pred: fn(char) -> bool) -> bool {
        pred(self.lookahead())
    }

    /// Consume while `pred` holds for the lookahead.
    ///
    /// `pred('\0')` must return `false`, otherwise the loop would spin at
    /// end of input.
    #[inline]
    fn consume_while(&mut self, pred: fn(char) -> bool) {
        while pred(self.lookahead()) {
            self.consume();
        }
    }

    /// Ignore while `pred` holds for the lookahead.
    ///
    /// Same contract as [`consume_while()`](Self::consume_while).
    #[inline]
    fn ignore_while(&mut self, pred: fn(char) -> bool) {
        while pred(self.lookahead()) {
            self.ignore();
        }
    }
}
