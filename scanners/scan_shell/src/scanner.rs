//! Shell scanner state and lifecycle.
//!
//! # Snapshot Layout
//!
//! ```text
//! [glob paren depth: u8][heredoc count: u8]
//! per heredoc: [raw: u8][started: u8][allows indent: u8][len: u32 LE][delimiter]
//! ```
//!
//! Heredocs are saved outermost first, so restoring rebuilds the stack in
//! the same order.

use scan_core::{ExternalScanner, Lexer, StateError, StateReader, StateWriter, ValidSymbols};
use smallvec::SmallVec;
use tracing::debug;

use crate::dispatch::dispatch;
use crate::{Heredoc, HeredocFlags, ShellToken};

/// Lexical-mode scanner for shell grammars.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellScanner {
    /// Paren depth of an extended glob split by an expansion; 0 otherwise.
    pub(crate) last_glob_paren_depth: u8,
    /// Open heredocs, innermost last.
    pub(crate) heredocs: SmallVec<[Heredoc; 2]>,
}

impl ShellScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open heredocs, outermost first.
    pub fn heredocs(&self) -> &[Heredoc] {
        &self.heredocs
    }

    pub fn glob_paren_depth(&self) -> u8 {
        self.last_glob_paren_depth
    }

    pub(crate) fn push_heredoc(&mut self, heredoc: Heredoc) {
        self.heredocs.push(heredoc);
        debug!(
            depth = self.heredocs.len(),
            allows_indent = self.heredocs.last().is_some_and(Heredoc::allows_indent),
            "heredoc opened"
        );
    }

    pub(crate) fn pop_heredoc(&mut self) {
        let closed = self.heredocs.pop();
        debug_assert!(closed.is_some(), "closing a heredoc that was never opened");
        if let Some(heredoc) = closed {
            debug!(
                delimiter = %heredoc.delimiter,
                depth = self.heredocs.len(),
                "heredoc closed"
            );
        }
    }
}

impl ExternalScanner for ShellScanner {
    type Token = ShellToken;

    fn scan(&mut self, lexer: &mut dyn Lexer, valid: ValidSymbols<ShellToken>) -> Option<ShellToken> {
        dispatch(self, lexer, valid)
    }

    fn serialize(&self, out: &mut StateWriter<'_>) -> Result<(), StateError> {
        out.put_u8(self.last_glob_paren_depth)?;
        out.put_count_u8("heredoc", self.heredocs.len())?;
        for heredoc in &self.heredocs {
            out.put_bool(heredoc.is_raw())?;
            out.put_bool(heredoc.started())?;
            out.put_bool(heredoc.allows_indent())?;
            out.put_len_prefixed("heredoc delimiter", heredoc.delimiter.as_bytes())?;
        }
        Ok(())
    }

    fn deserialize(&mut self, snapshot: &[u8]) -> Result<(), StateError> {
        self.last_glob_paren_depth = 0;
        self.heredocs.clear();
        if snapshot.is_empty() {
            return Ok(());
        }

        let mut input = StateReader::new(snapshot);
        self.last_glob_paren_depth = input.get_u8()?;
        let count = input.get_u8()?;
        for _ in 0..count {
            let mut flags = HeredocFlags::empty();
            flags.set(HeredocFlags::RAW, input.get_bool()?);
            flags.set(HeredocFlags::STARTED, input.get_bool()?);
            flags.set(HeredocFlags::ALLOWS_INDENT, input.get_bool()?);
            let delimiter = input.get_str()?.to_owned();
            self.heredocs.push(Heredoc { flags, delimiter });
        }
        input.finish()
    }
}
