//! Open heredoc contexts and the procedures that scan their text.
//!
//! A context is pushed when `<<` or `<<-` is scanned, gets its delimiter
//! from the following word, and is popped when a line matching the
//! delimiter closes the body. Several arrows on one command line stack up
//! before any body is read; the innermost (last pushed) context owns the
//! next body.

use bitflags::bitflags;
use scan_core::chars::{is_ascii_alpha, is_space};
use scan_core::Lexer;
use tracing::debug;

use crate::ShellToken;

bitflags! {
    /// Per-context mode bits, saved one byte each in snapshots.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct HeredocFlags: u8 {
        /// Delimiter was quoted or escaped; `$` in the body is literal.
        const RAW = 1 << 0;
        /// Body text before the first expansion has been returned.
        const STARTED = 1 << 1;
        /// Opened with `<<-`; whitespace before the closing delimiter is allowed.
        const ALLOWS_INDENT = 1 << 2;
    }
}

/// One open heredoc.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Heredoc {
    pub flags: HeredocFlags,
    /// Unquoted delimiter word; empty until the opener's word is scanned.
    pub delimiter: String,
}

/// Which token pair a body scan produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BodyKinds {
    /// First body scan: `HEREDOC_BODY_BEGINNING` before an expansion,
    /// `SIMPLE_HEREDOC_BODY` for a body without one.
    Leading,
    /// After the first expansion: `HEREDOC_CONTENT` between expansions,
    /// `HEREDOC_END` for the tail and closing line.
    Trailing,
}

impl BodyKinds {
    fn middle(self) -> ShellToken {
        match self {
            BodyKinds::Leading => ShellToken::HeredocBodyBeginning,
            BodyKinds::Trailing => ShellToken::HeredocContent,
        }
    }

    fn end(self) -> ShellToken {
        match self {
            BodyKinds::Leading => ShellToken::SimpleHeredocBody,
            BodyKinds::Trailing => ShellToken::HeredocEnd,
        }
    }
}

/// Outcome of a body scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BodyScan {
    Token(ShellToken),
    /// The closing line matched and the context must be popped.
    Closed(ShellToken),
    None,
}

impl Heredoc {
    pub fn new(allows_indent: bool) -> Self {
        let mut flags = HeredocFlags::empty();
        flags.set(HeredocFlags::ALLOWS_INDENT, allows_indent);
        Heredoc {
            flags,
            delimiter: String::new(),
        }
    }

    pub fn is_raw(&self) -> bool {
        self.flags.contains(HeredocFlags::RAW)
    }

    pub fn started(&self) -> bool {
        self.flags.contains(HeredocFlags::STARTED)
    }

    pub fn allows_indent(&self) -> bool {
        self.flags.contains(HeredocFlags::ALLOWS_INDENT)
    }

    /// Forget the delimiter and every mode bit; the context stays open.
    fn clear(&mut self) {
        self.flags = HeredocFlags::empty();
        self.delimiter.clear();
    }

    /// Scan the delimiter word after an arrow.
    ///
    /// A word starting with a quote or backslash makes the body raw.
    pub(crate) fn scan_start(&mut self, lexer: &mut dyn Lexer) -> bool {
        lexer.ignore_while(is_space);
        let raw = matches!(lexer.lookahead(), '\'' | '"' | '\\');
        self.flags.set(HeredocFlags::RAW, raw);
        self.delimiter.clear();
        if scan_word(lexer, &mut self.delimiter) {
            debug!(delimiter = %self.delimiter, raw, "heredoc delimiter");
            true
        } else {
            self.delimiter.clear();
            false
        }
    }

    /// Consume the longest prefix of the line that matches the delimiter.
    /// Returns `true` if the whole delimiter matched.
    ///
    /// An empty delimiter matches immediately.
    pub(crate) fn match_delimiter(&self, lexer: &mut dyn Lexer) -> bool {
        for expected in self.delimiter.chars() {
            if lexer.at('\0') || lexer.at('\n') || !lexer.at(expected) {
                return false;
            }
            lexer.consume();
        }
        true
    }

    /// Scan body text up to an expansion, the closing line, or end of input.
    pub(crate) fn scan_body(&mut self, lexer: &mut dyn Lexer, kinds: BodyKinds) -> BodyScan {
        let mut did_advance = false;
        loop {
            match lexer.lookahead() {
                '\0' => {
                    if lexer.is_eof() && did_advance {
                        self.clear();
                        return BodyScan::Token(kinds.end());
                    }
                    return BodyScan::None;
                }
                '\\' => {
                    did_advance = true;
                    lexer.consume();
                    lexer.consume();
                }
                '$' => {
                    if self.is_raw() {
                        did_advance = true;
                        lexer.consume();
                        continue;
                    }
                    if did_advance {
                        lexer.mark_end();
                        self.flags.insert(HeredocFlags::STARTED);
                        lexer.consume();
                        if is_ascii_alpha(lexer.lookahead()) || lexer.at('{') || lexer.at('(') {
                            return BodyScan::Token(kinds.middle());
                        }
                        continue;
                    }
                    if kinds == BodyKinds::Leading && lexer.column() == 0 {
                        self.flags.insert(HeredocFlags::STARTED);
                        return BodyScan::Token(kinds.middle());
                    }
                    return BodyScan::None;
                }
                '\n' => {
                    if did_advance {
                        lexer.consume();
                    } else {
                        lexer.ignore();
                    }
                    did_advance = true;
                    if self.allows_indent() {
                        lexer.consume_while(is_space);
                    }
                    let kind = if self.started() {
                        kinds.middle()
                    } else {
                        kinds.end()
                    };
                    lexer.mark_end();
                    if self.match_delimiter(lexer) {
                        if kind == ShellToken::HeredocEnd {
                            return BodyScan::Closed(kind);
                        }
                        return BodyScan::Token(kind);
                    }
                }
                _ => {
                    if lexer.column() == 0 {
                        while lexer.at_class(is_space) {
                            lexer.advance(!did_advance);
                        }
                        match kinds {
                            BodyKinds::Trailing => {
                                if self.match_delimiter(lexer) {
                                    return BodyScan::Token(kinds.middle());
                                }
                            }
                            BodyKinds::Leading => {
                                lexer.mark_end();
                                if self.match_delimiter(lexer) {
                                    return BodyScan::Token(kinds.end());
                                }
                            }
                        }
                    }
                    did_advance = true;
                    lexer.consume();
                }
            }
        }
    }
}

/// Consume one shell word and append it, unquoted, to `word`.
///
/// Handles a single leading `'` or `"` quote and backslash escapes; assumes
/// the default field separators. Returns `false` for an empty word or a
/// backslash at end of input.
pub(crate) fn scan_word(lexer: &mut dyn Lexer, word: &mut String) -> bool {
    let quote = match lexer.lookahead() {
        q @ ('\'' | '"') => {
            lexer.consume();
            Some(q)
        }
        _ => None,
    };

    let mut empty = true;
    loop {
        let c = lexer.lookahead();
        let stop = match quote {
            Some(q) => c == q || c == '\r' || c == '\n',
            None => is_space(c),
        };
        if c == '\0' || stop {
            break;
        }
        if c == '\\' {
            lexer.consume();
            if lexer.at('\0') {
                return false;
            }
        }
        empty = false;
        word.push(lexer.lookahead());
        lexer.consume();
    }

    if let Some(q) = quote {
        if lexer.at(q) {
            lexer.consume();
        }
    }
    !empty
}
