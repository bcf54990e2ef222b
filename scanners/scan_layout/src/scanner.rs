//! Indentation-stack automaton.
//!
//! # Decision Per Call
//!
//! 1. A queued token from an earlier decision is handed out first.
//! 2. An owed dedent is started when `DEDENT` is acceptable.
//! 3. Otherwise whitespace and line breaks are skipped and the column of
//!    the next significant character is compared with the innermost open
//!    width: equal after a line break is `NEWLINE`, deeper is `INDENT`,
//!    shallower closes every level above the new width.
//! 4. At end of input, open levels close one per call before a final
//!    `NEWLINE`.
//!
//! # Snapshot Layout
//!
//! ```text
//! [owed dedents: u8][width: u16 LE]...
//! ```
//!
//! The token queue is not part of the snapshot: it only ever holds the
//! zero-width `NEWLINE` paired with a `DEDENT` just returned, which the host
//! requests at the same position before saving again.

use std::cmp::Ordering;
use std::collections::VecDeque;

use scan_core::{ExternalScanner, Lexer, StateError, StateReader, StateWriter, ValidSymbols};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use crate::LayoutToken;

/// Indentation tracker for off-side rule grammars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutScanner {
    /// Open indentation widths, strictly increasing. `indents[0]` is the
    /// zero sentinel and is never popped.
    indents: SmallVec<[u16; 8]>,
    /// Dedents owed but not yet started.
    queued_dedents: u32,
    /// Decided tokens, handed out one per call. Not part of the snapshot.
    tokens: VecDeque<LayoutToken>,
}

impl Default for LayoutScanner {
    fn default() -> Self {
        LayoutScanner {
            indents: smallvec![0],
            queued_dedents: 0,
            tokens: VecDeque::new(),
        }
    }
}

impl LayoutScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open indentation widths, sentinel first.
    pub fn indents(&self) -> &[u16] {
        &self.indents
    }

    /// Number of open blocks above the sentinel.
    pub fn depth(&self) -> usize {
        self.indents.len().saturating_sub(1)
    }

    /// Dedents owed but not yet started.
    pub fn queued_dedents(&self) -> u32 {
        self.queued_dedents
    }

    fn innermost(&self) -> u16 {
        self.indents.last().copied().unwrap_or(0)
    }

    fn push_dedent(&mut self) {
        self.tokens.push_back(LayoutToken::Dedent);
        self.tokens.push_back(LayoutToken::Newline);
    }

    /// Decide the next token(s) and queue them. Queues nothing when no
    /// acceptable token applies.
    fn decide(&mut self, lexer: &mut dyn Lexer, valid: ValidSymbols<LayoutToken>) {
        if valid.contains(LayoutToken::Dedent) && self.queued_dedents > 0 {
            self.queued_dedents -= 1;
            self.push_dedent();
            return;
        }

        let mut skipped_newline = false;
        while matches!(lexer.lookahead(), ' ' | '\t' | '\r' | '\n') {
            skipped_newline |= lexer.at('\n');
            lexer.ignore();
        }

        if lexer.is_eof() {
            if valid.contains(LayoutToken::Dedent) && self.indents.len() > 1 {
                self.indents.pop();
                debug!(depth = self.depth(), "closing block at end of input");
                self.push_dedent();
            } else if valid.contains(LayoutToken::Newline) {
                self.tokens.push_back(LayoutToken::Newline);
            }
            return;
        }

        let width = u16::try_from(lexer.column()).unwrap_or(u16::MAX);
        match width.cmp(&self.innermost()) {
            Ordering::Equal => {
                if skipped_newline && valid.contains(LayoutToken::Newline) {
                    self.tokens.push_back(LayoutToken::Newline);
                }
            }
            Ordering::Greater => {
                if valid.contains(LayoutToken::Indent) {
                    self.indents.push(width);
                    debug!(width, depth = self.depth(), "opening block");
                    self.tokens.push_back(LayoutToken::Indent);
                }
            }
            Ordering::Less => {
                let mut closed = 0u32;
                while self.indents.len() > 1 && self.innermost() > width {
                    self.indents.pop();
                    closed += 1;
                }
                debug!(width, closed, "closing blocks");
                if closed == 0 {
                    return;
                }
                if valid.contains(LayoutToken::Dedent) {
                    self.queued_dedents += closed - 1;
                    self.push_dedent();
                } else {
                    self.queued_dedents += closed;
                }
            }
        }
    }
}

impl ExternalScanner for LayoutScanner {
    type Token = LayoutToken;

    fn scan(
        &mut self,
        lexer: &mut dyn Lexer,
        valid: ValidSymbols<LayoutToken>,
    ) -> Option<LayoutToken> {
        if self.tokens.is_empty() {
            self.decide(lexer, valid);
        }
        let token = *self.tokens.front()?;
        if !valid.contains(token) {
            // Keep it for a call that accepts it.
            return None;
        }
        self.tokens.pop_front();
        trace!(?token, queued = self.tokens.len(), "layout token");
        Some(token)
    }

    fn serialize(&self, out: &mut StateWriter<'_>) -> Result<(), StateError> {
        out.put_count_u8("owed dedent", self.queued_dedents as usize)?;
        for &width in &self.indents {
            out.put_u16(width)?;
        }
        Ok(())
    }

    fn deserialize(&mut self, snapshot: &[u8]) -> Result<(), StateError> {
        self.queued_dedents = 0;
        self.indents.clear();

        if snapshot.is_empty() {
            self.indents.push(0);
            self.tokens.clear();
            return Ok(());
        }

        let mut input = StateReader::new(snapshot);
        self.queued_dedents = u32::from(input.get_u8()?);
        while input.remaining() >= 2 {
            self.indents.push(input.get_u16()?);
        }
        if self.indents.is_empty() {
            self.indents.push(0);
        }
        input.finish()
    }
}

#[cfg(test)]
mod tests;
