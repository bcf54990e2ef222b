//! Character classes used by the scanners.
//!
//! Scanners work on code points, so every class takes a `char`. The `'\0'`
//! lookahead reported at end of input belongs to none of these classes,
//! which lets `while class(lexer.lookahead())` loops stop at EOF.
//!
//! Two families exist on purpose: the Unicode-aware classes (`is_alpha`,
//! `is_alnum`, `is_lower`) accept identifiers in any script, while the
//! `is_ascii_*` classes are for places where only ASCII shapes count
//! (operator names, numeric runs, range bounds).

/// Whitespace, including line breaks.
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Horizontal whitespace only: space and tab.
#[inline]
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Alphabetic in any script.
#[inline]
pub fn is_alpha(c: char) -> bool {
    c.is_alphabetic()
}

/// Alphabetic or numeric in any script.
#[inline]
pub fn is_alnum(c: char) -> bool {
    c.is_alphanumeric()
}

/// Lowercase in any script.
#[inline]
pub fn is_lower(c: char) -> bool {
    c.is_lowercase()
}

/// `[A-Za-z]`.
#[inline]
pub fn is_ascii_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// `[0-9]`.
#[inline]
pub fn is_ascii_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// `[A-Za-z0-9]`.
#[inline]
pub fn is_ascii_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// `[0-9A-Fa-f]`.
#[inline]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// `[0-7]`.
#[inline]
pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}
