//! Shell token kinds.

use scan_core::TokenKind;

/// Tokens known to the lexical-mode scanner, in the host grammar's
/// external-token order.
///
/// `ClosingBrace`, `ClosingBracket`, `Newline` and `ErrorRecovery` only
/// steer the resolvers through the acceptance set; they are never emitted.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShellToken {
    /// Delimiter word after a heredoc arrow.
    HeredocStart,
    /// Whole heredoc body without expansions.
    SimpleHeredocBody,
    /// Heredoc body text up to the first expansion.
    HeredocBodyBeginning,
    /// Heredoc body text between expansions.
    HeredocContent,
    /// Closing delimiter line, or the body tail ending at it.
    HeredocEnd,
    /// Digits directly before a redirection.
    FileDescriptor,
    /// Zero-width value of `name=` with nothing after the `=`.
    EmptyValue,
    /// Zero-width glue between adjacent word fragments.
    Concat,
    VariableName,
    /// `-x`-style operator inside a test command.
    TestOperator,
    /// Regex running to the closing `}` of an expansion.
    Regex,
    /// Regex running to an unescaped `/`.
    RegexNoSlash,
    /// Regex running to unescaped whitespace.
    RegexNoSpace,
    /// Lenient word inside `${...}`.
    ExpansionWord,
    ExtglobPattern,
    /// `$` with nothing expandable after it.
    BareDollar,
    /// `{` opening a `{a..b}` range.
    BraceStart,
    /// `##` inside an expansion.
    ImmediateDoubleHash,
    ExternalExpansionSymHash,
    ExternalExpansionSymBang,
    ExternalExpansionSymEqual,
    ClosingBrace,
    ClosingBracket,
    /// `<<`
    HeredocArrow,
    /// `<<-`
    HeredocArrowDash,
    Newline,
    /// Set by the host while it recovers from a syntax error.
    ErrorRecovery,
}

impl TokenKind for ShellToken {
    const ALL: &'static [Self] = &[
        ShellToken::HeredocStart,
        ShellToken::SimpleHeredocBody,
        ShellToken::HeredocBodyBeginning,
        ShellToken::HeredocContent,
        ShellToken::HeredocEnd,
        ShellToken::FileDescriptor,
        ShellToken::EmptyValue,
        ShellToken::Concat,
        ShellToken::VariableName,
        ShellToken::TestOperator,
        ShellToken::Regex,
        ShellToken::RegexNoSlash,
        ShellToken::RegexNoSpace,
        ShellToken::ExpansionWord,
        ShellToken::ExtglobPattern,
        ShellToken::BareDollar,
        ShellToken::BraceStart,
        ShellToken::ImmediateDoubleHash,
        ShellToken::ExternalExpansionSymHash,
        ShellToken::ExternalExpansionSymBang,
        ShellToken::ExternalExpansionSymEqual,
        ShellToken::ClosingBrace,
        ShellToken::ClosingBracket,
        ShellToken::HeredocArrow,
        ShellToken::HeredocArrowDash,
        ShellToken::Newline,
        ShellToken::ErrorRecovery,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl ShellToken {
    /// Kinds that only steer resolvers and are never emitted.
    pub const ACCEPTANCE_ONLY: [ShellToken; 4] = [
        ShellToken::ClosingBrace,
        ShellToken::ClosingBracket,
        ShellToken::Newline,
        ShellToken::ErrorRecovery,
    ];

    /// Returns `true` if this kind can be emitted by a scan.
    pub fn is_emittable(self) -> bool {
        !Self::ACCEPTANCE_ONLY.contains(&self)
    }
}
