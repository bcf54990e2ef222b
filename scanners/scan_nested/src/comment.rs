//! Nested comments.
//!
//! A comment opened by `(*` runs to the matching `*)`. Inside it, these are
//! skipped as units so their contents never open or close a comment:
//!
//! - nested comments, `(* (* *) *)`
//! - string literals, `"*)"`
//! - character literals, `'"'` or `'\x41'`
//! - quoted strings, optionally behind an extension name: `{id|*)|id}`,
//!   `{%ext.name id|...|id}`
//! - identifiers, whose `'` never starts a character literal: `a'b`
//!
//! Nesting is a plain depth counter; the comment ends when it returns to
//! zero.

use scan_core::chars::{is_alnum, is_alpha, is_ascii_digit, is_hex_digit, is_octal_digit, is_space};
use scan_core::Lexer;

use crate::quoted::skip_quoted_string;

/// Scan the rest of a comment after its `(`.
///
/// Returns `false` if no `*` follows or the input ends before every nested
/// comment is closed.
pub(crate) fn scan_comment(lexer: &mut dyn Lexer) -> bool {
    if !lexer.at('*') {
        return false;
    }
    lexer.consume();

    let mut depth: u32 = 1;
    let mut scratch_tag = String::new();
    // A character the literal scan consumed but whose meaning is still
    // undecided, e.g. the `"` in `'"x`.
    let mut pending: Option<char> = None;
    loop {
        let replayed = pending.is_some();
        let c = pending.take().unwrap_or_else(|| lexer.lookahead());
        if !replayed && matches!(c, '(' | '*' | '\'' | '"' | '{') {
            lexer.consume();
        }

        match c {
            '(' => {
                if lexer.at('*') {
                    lexer.consume();
                    depth += 1;
                }
            }
            '*' => {
                if lexer.at(')') {
                    lexer.consume();
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
            }
            '\'' => pending = scan_character(lexer),
            '"' => skip_string(lexer),
            '{' => {
                if lexer.at('%') {
                    lexer.consume();
                    if lexer.at('%') {
                        lexer.consume();
                    }
                    if !skip_extension_name(lexer) {
                        continue;
                    }
                    lexer.consume_while(is_space);
                }
                if skip_quoted_string(lexer, &mut scratch_tag) {
                    lexer.consume();
                }
            }
            '\0' => {
                if lexer.is_eof() {
                    return false;
                }
                if !replayed {
                    lexer.consume();
                }
            }
            _ => {
                if !skip_identifier(lexer) && !replayed {
                    lexer.consume();
                }
            }
        }
    }
}

/// Skip an ordinary string literal after its opening `"`.
fn skip_string(lexer: &mut dyn Lexer) {
    loop {
        match lexer.lookahead() {
            '\\' => {
                lexer.consume();
                lexer.consume();
            }
            '"' => {
                lexer.consume();
                return;
            }
            '\0' if lexer.is_eof() => return,
            _ => lexer.consume(),
        }
    }
}

/// Scan a character literal after its opening `'`.
///
/// Returns the last character read when the literal turns out not to be
/// one, so the caller can act on it; `None` once the closing `'` is
/// consumed or an escape is malformed.
pub(crate) fn scan_character(lexer: &mut dyn Lexer) -> Option<char> {
    let mut last = None;
    match lexer.lookahead() {
        '\\' => {
            lexer.consume();
            let c = lexer.lookahead();
            if is_ascii_digit(c) {
                lexer.consume();
                if !consume_exactly(lexer, 2, is_ascii_digit) {
                    return None;
                }
            } else {
                match c {
                    'x' => {
                        lexer.consume();
                        if !consume_exactly(lexer, 2, is_hex_digit) {
                            return None;
                        }
                    }
                    'o' => {
                        lexer.consume();
                        if !consume_exactly(lexer, 3, is_octal_digit) {
                            return None;
                        }
                    }
                    '\'' | '"' | '\\' | 'n' | 't' | 'b' | 'r' | ' ' => {
                        last = Some(c);
                        lexer.consume();
                    }
                    _ => return None,
                }
            }
        }
        '\'' => {}
        '\0' => {
            if lexer.is_eof() {
                return None;
            }
            lexer.consume();
        }
        c => {
            last = Some(c);
            lexer.consume();
        }
    }

    if lexer.at('\'') {
        lexer.consume();
        return None;
    }
    last
}

fn consume_exactly(lexer: &mut dyn Lexer, count: usize, class: fn(char) -> bool) -> bool {
    for _ in 0..count {
        if !lexer.at_class(class) {
            return false;
        }
        lexer.consume();
    }
    true
}

fn is_identifier_char(c: char) -> bool {
    is_alnum(c) || c == '_' || c == '\''
}

/// Skip one identifier. Identifiers may contain `'`, which must not start
/// a character literal.
fn skip_identifier(lexer: &mut dyn Lexer) -> bool {
    let c = lexer.lookahead();
    if !is_alpha(c) && c != '_' {
        return false;
    }
    lexer.consume();
    lexer.consume_while(is_identifier_char);
    true
}

/// Skip a dotted extension name such as `foo.bar`.
fn skip_extension_name(lexer: &mut dyn Lexer) -> bool {
    while skip_identifier(lexer) {
        if !lexer.at('.') {
            return true;
        }
        lexer.consume();
    }
    false
}
