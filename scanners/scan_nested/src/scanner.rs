//! Nested literal scanner state and dispatch.
//!
//! # Snapshot Layout
//!
//! ```text
//! [in string: u8][tag bytes ...]
//! ```
//!
//! The tag runs to the end of the snapshot.

use scan_core::chars::{is_ascii_digit, is_blank, is_space};
use scan_core::{ExternalScanner, Lexer, StateError, StateReader, StateWriter, ValidSymbols};
use tracing::{debug, trace};

use crate::comment::scan_comment;
use crate::quoted::{match_closer, read_opener, starts_opener};
use crate::NestedToken;

/// Scanner for quoted strings, nested comments and line directives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NestedScanner {
    /// Inside an ordinary `"..."` string or a quoted string body.
    in_string: bool,
    /// Tag of the quoted string being parsed; empty otherwise.
    quoted_string_id: String,
}

impl NestedScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_string(&self) -> bool {
        self.in_string
    }

    /// Tag of the open quoted string.
    pub fn quoted_string_id(&self) -> &str {
        &self.quoted_string_id
    }

    fn open_quoted_string(&mut self, lexer: &mut dyn Lexer) -> bool {
        let mut tag = String::new();
        if !read_opener(lexer, &mut tag) {
            return false;
        }
        self.quoted_string_id = tag;
        self.in_string = true;
        debug!(tag = %self.quoted_string_id, "quoted string opened");
        true
    }

    fn close_quoted_string(&mut self, lexer: &mut dyn Lexer) -> bool {
        if !match_closer(lexer, &self.quoted_string_id) {
            return false;
        }
        debug!(tag = %self.quoted_string_id, "quoted string closed");
        self.in_string = false;
        self.quoted_string_id.clear();
        true
    }

    fn dispatch(&mut self, lexer: &mut dyn Lexer, valid: ValidSymbols<NestedToken>) -> Option<NestedToken> {
        if valid.contains(NestedToken::LeftQuotedStringDelim) && lexer.at_class(starts_opener) {
            return self
                .open_quoted_string(lexer)
                .then_some(NestedToken::LeftQuotedStringDelim);
        }
        if valid.contains(NestedToken::RightQuotedStringDelim) && lexer.at('|') {
            lexer.consume();
            return self
                .close_quoted_string(lexer)
                .then_some(NestedToken::RightQuotedStringDelim);
        }
        if self.in_string && valid.contains(NestedToken::StringDelim) && lexer.at('"') {
            lexer.consume();
            self.in_string = false;
            return Some(NestedToken::StringDelim);
        }

        lexer.ignore_while(is_space);

        if !self.in_string
            && valid.contains(NestedToken::LineNumberDirective)
            && lexer.at('#')
            && lexer.column() == 0
        {
            return scan_line_directive(lexer).then_some(NestedToken::LineNumberDirective);
        }
        if !self.in_string && valid.contains(NestedToken::Comment) && lexer.at('(') {
            lexer.consume();
            return scan_comment(lexer).then_some(NestedToken::Comment);
        }
        if !self.in_string && valid.contains(NestedToken::StringDelim) && lexer.at('"') {
            lexer.consume();
            self.in_string = true;
            return Some(NestedToken::StringDelim);
        }
        if valid.contains(NestedToken::NullCharacter) && lexer.at('\0') && !lexer.is_eof() {
            lexer.consume();
            return Some(NestedToken::NullCharacter);
        }
        None
    }
}

/// Scan `# <digits> "<file>" <rest of line>` from the `#`.
fn scan_line_directive(lexer: &mut dyn Lexer) -> bool {
    lexer.consume();
    lexer.consume_while(is_blank);

    if !lexer.at_class(is_ascii_digit) {
        return false;
    }
    lexer.consume_while(is_ascii_digit);
    lexer.consume_while(is_blank);

    if !lexer.at('"') {
        return false;
    }
    lexer.consume();
    while !lexer.is_eof() && !matches!(lexer.lookahead(), '\n' | '\r' | '"') {
        lexer.consume();
    }
    if !lexer.at('"') {
        return false;
    }
    lexer.consume();

    while !lexer.is_eof() && !matches!(lexer.lookahead(), '\n' | '\r') {
        lexer.consume();
    }
    true
}

impl ExternalScanner for NestedScanner {
    type Token = NestedToken;

    fn scan(&mut self, lexer: &mut dyn Lexer, valid: ValidSymbols<NestedToken>) -> Option<NestedToken> {
        let token = self.dispatch(lexer, valid);
        match token {
            Some(kind) => trace!(?kind, in_string = self.in_string, "token"),
            None => trace!("declined"),
        }
        token
    }

    fn serialize(&self, out: &mut StateWriter<'_>) -> Result<(), StateError> {
        out.put_bool(self.in_string)?;
        out.put_bytes(self.quoted_string_id.as_bytes())
    }

    fn deserialize(&mut self, snapshot: &[u8]) -> Result<(), StateError> {
        self.in_string = false;
        self.quoted_string_id.clear();
        if snapshot.is_empty() {
            return Ok(());
        }

        let mut input = StateReader::new(snapshot);
        self.in_string = input.get_bool()?;
        self.quoted_string_id.push_str(input.rest_str()?);
        input.finish()
    }
}

#[cfg(test)]
mod tests;
