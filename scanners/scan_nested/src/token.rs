//! Nested literal token kinds.

use scan_core::TokenKind;

/// Tokens known to the nested literal scanner, in the host grammar's
/// external-token order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NestedToken {
    /// A whole `(* ... *)` comment, nested comments included.
    Comment,
    /// `tag|` after the `{` of a quoted string.
    LeftQuotedStringDelim,
    /// `|tag` before the `}` of a quoted string.
    RightQuotedStringDelim,
    /// `"` opening or closing an ordinary string.
    StringDelim,
    /// `# 12 "file"` up to the end of the line.
    LineNumberDirective,
    /// An embedded NUL code point.
    NullCharacter,
}

impl TokenKind for NestedToken {
    const ALL: &'static [Self] = &[
        NestedToken::Comment,
        NestedToken::LeftQuotedStringDelim,
        NestedToken::RightQuotedStringDelim,
        NestedToken::StringDelim,
        NestedToken::LineNumberDirective,
        NestedToken::NullCharacter,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_table() {
        assert_eq!(NestedToken::ALL.len(), 6);
        for (i, &kind) in NestedToken::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(NestedToken::from_index(i), Some(kind));
        }
    }
}
