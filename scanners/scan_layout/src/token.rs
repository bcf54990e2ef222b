//! Layout token kinds.

use scan_core::TokenKind;

/// Tokens produced by the indentation tracker.
///
/// Discriminants are the host grammar's external-token indices.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutToken {
    /// End of a logical line at the current block level.
    Newline = 0,
    /// A line deeper than the enclosing block opens a new block.
    Indent = 1,
    /// One enclosing block closes.
    Dedent = 2,
}

impl TokenKind for LayoutToken {
    const ALL: &'static [Self] = &[LayoutToken::Newline, LayoutToken::Indent, LayoutToken::Dedent];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}
