//! In-memory [`Lexer`] over a UTF-8 string.
//!
//! [`SourceLexer`] plays the host's role outside a real parser: it tracks
//! token boundaries the way a host does, runs one scanner call at a time,
//! and rewinds when the scanner declines. Tests and tools use it to feed
//! scanners without generated parse tables.
//!
//! # Boundary Rules
//!
//! - A call starts with the token start at the cursor and no frozen end.
//! - [`Lexer::ignore()`] moves the token start to the new cursor position.
//! - [`Lexer::mark_end()`] freezes the token end; without it the token ends
//!   at the cursor when the scanner returns.
//! - A frozen end that lies before the token start pulls the start back,
//!   producing an empty token at the frozen end.
//! - A successful call leaves the cursor at the token end; a declined call
//!   leaves it where the call began.

use crate::{ExternalScanner, Lexer, ValidSymbols};

/// Byte range of a token in the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte offset one past the last byte.
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// A token claimed by a scanner: its kind and the exact span consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub span: Span,
}

/// Cursor over an in-memory source string.
#[derive(Clone, Debug)]
pub struct SourceLexer<'a> {
    source: &'a str,
    /// Byte offset of the lookahead.
    pos: u32,
    /// Decoded code point at `pos`, `'\0'` past the end.
    lookahead: char,
    token_start: u32,
    token_end: Option<u32>,
}

impl<'a> SourceLexer<'a> {
    /// Create a lexer positioned at the start of `source`.
    ///
    /// Sources longer than `u32::MAX` bytes are truncated to that length,
    /// matching the span width.
    pub fn new(source: &'a str) -> Self {
        let mut cut = source.len().min(u32::MAX as usize);
        while !source.is_char_boundary(cut) {
            cut -= 1;
        }
        let source = &source[..cut];
        let mut lexer = SourceLexer {
            source,
            pos: 0,
            lookahead: '\0',
            token_start: 0,
            token_end: None,
        };
        lexer.seek(0);
        lexer
    }

    /// The full source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Move the cursor to `pos`, e.g. to replay from a previously visited
    /// token boundary.
    ///
    /// # Contract
    ///
    /// `pos` must lie on a character boundary within the source.
    pub fn seek(&mut self, pos: u32) {
        debug_assert!(
            self.source.is_char_boundary(pos as usize),
            "seek target {pos} is not a character boundary"
        );
        self.pos = pos;
        self.lookahead = self.source[pos as usize..].chars().next().unwrap_or('\0');
        self.token_start = pos;
        self.token_end = None;
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> &'a str {
        &self.source[span.start as usize..span.end as usize]
    }

    /// Run one scanner call at the cursor.
    ///
    /// On success the cursor moves to the token end and the claimed token is
    /// returned. On decline the cursor is rewound to where the call began.
    pub fn scan_token<S>(
        &mut self,
        scanner: &mut S,
        valid: ValidSymbols<S::Token>,
    ) -> Option<Token<S::Token>>
    where
        S: ExternalScanner,
    {
        let call_start = self.pos;
        self.token_start = call_start;
        self.token_end = None;

        if let Some(kind) = scanner.scan(self, valid) {
            let end = self.token_end.unwrap_or(self.pos);
            let start = self.token_start.min(end);
            self.seek(end);
            Some(Token {
                kind,
                span: Span::new(start, end),
            })
        } else {
            self.seek(call_start);
            None
        }
    }

    fn source_len(&self) -> u32 {
        // Bounded by the truncation in `new()`.
        u32::try_from(self.source.len()).unwrap_or(u32::MAX)
    }
}

impl Lexer for SourceLexer<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        self.lookahead
    }

    fn advance(&mut self, skip: bool) {
        if self.is_eof() {
            return;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "UTF-8 width is at most 4 bytes"
        )]
        let width = self.lookahead.len_utf8() as u32;
        self.pos += width;
        self.lookahead = self.source[self.pos as usize..]
            .chars()
            .next()
            .unwrap_or('\0');
        if skip {
            self.token_start = self.pos;
        }
    }

    #[inline]
    fn mark_end(&mut self) {
        self.token_end = Some(self.pos);
    }

    fn column(&mut self) -> u32 {
        let before = &self.source.as_bytes()[..self.pos as usize];
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
        let count = self.source[line_start..self.pos as usize].chars().count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.source_len()
    }
}
