//! Quoted-string tags.
//!
//! A quoted string is `{tag|...|tag}` where the tag is a possibly empty run
//! of lowercase letters and `_`. The body is opaque; only `|tag}` with the
//! opener's exact tag closes it.

use scan_core::chars::is_lower;
use scan_core::Lexer;

fn is_tag_char(c: char) -> bool {
    is_lower(c) || c == '_'
}

/// Returns `true` if `c` can begin an opener.
pub(crate) fn starts_opener(c: char) -> bool {
    is_tag_char(c) || c == '|'
}

/// Consume `tag|`, replacing `tag` with the characters read.
///
/// Returns `false` if no `|` follows the tag; the tag characters read so
/// far are consumed either way.
pub(crate) fn read_opener(lexer: &mut dyn Lexer, tag: &mut String) -> bool {
    tag.clear();
    while lexer.at_class(is_tag_char) {
        tag.push(lexer.lookahead());
        lexer.consume();
    }
    if !lexer.at('|') {
        return false;
    }
    lexer.consume();
    true
}

/// Consume `tag` and check that `}` follows, leaving the `}` in place.
///
/// Stops at the first character that differs from `tag`.
pub(crate) fn match_closer(lexer: &mut dyn Lexer, tag: &str) -> bool {
    for c in tag.chars() {
        if !lexer.at(c) {
            return false;
        }
        lexer.consume();
    }
    lexer.at('}')
}

/// Skip a whole quoted string from the start of its tag, stopping before
/// the closing `}`.
///
/// `tag` is scratch space. Returns `false` at end of input.
pub(crate) fn skip_quoted_string(lexer: &mut dyn Lexer, tag: &mut String) -> bool {
    if !read_opener(lexer, tag) {
        return false;
    }
    loop {
        match lexer.lookahead() {
            '|' => {
                lexer.consume();
                if match_closer(lexer, tag) {
                    return true;
                }
            }
            '\0' if lexer.is_eof() => return false,
            _ => lexer.consume(),
        }
    }
}
