//! Per-instance scanner lifecycle.
//!
//! One scanner instance belongs to exactly one parse session. The host
//! creates it (`Default`), calls [`scan()`](ExternalScanner::scan) at token
//! boundaries, saves its state after tokens it may return to, restores state
//! before rescanning from an earlier position, and drops it at the end.
//!
//! All persistent state must round-trip through the snapshot: calls are not
//! monotonic in source position, so nothing outside the snapshot may
//! influence a later scan.

use crate::{Lexer, ScanConfig, StateError, StateWriter, TokenKind, ValidSymbols};

/// A hand-written scanner driven by a host parser.
pub trait ExternalScanner: Default {
    /// Token kinds this scanner knows about, including acceptance-only kinds.
    type Token: TokenKind;

    /// Try to claim one token at the lexer's position.
    ///
    /// Returns `None` to decline; the host then falls back to its own
    /// tokenization. A returned kind is always a member of `valid`.
    fn scan(&mut self, lexer: &mut dyn Lexer, valid: ValidSymbols<Self::Token>)
        -> Option<Self::Token>;

    /// Write the persistent state.
    fn serialize(&self, out: &mut StateWriter<'_>) -> Result<(), StateError>;

    /// Replace the persistent state with a snapshot. An empty snapshot
    /// resets to the initial state.
    fn deserialize(&mut self, snapshot: &[u8]) -> Result<(), StateError>;

    /// Save state into a host buffer, returning the number of bytes written.
    ///
    /// Returns 0 when the state does not fit: the host must treat this
    /// position as not resumable. Restoring the empty snapshot yields the
    /// initial state, never a truncated one.
    fn save_state(&self, buffer: &mut [u8]) -> usize {
        let mut out = StateWriter::new(buffer);
        match self.serialize(&mut out) {
            Ok(()) => out.len(),
            Err(err) => {
                tracing::warn!(%err, "scanner state not saved");
                0
            }
        }
    }

    /// Save state into a fresh buffer sized by [`ScanConfig::global()`].
    fn snapshot(&self) -> Vec<u8> {
        self.snapshot_with(&ScanConfig::global())
    }

    /// Save state into a fresh buffer sized by `config`.
    fn snapshot_with(&self, config: &ScanConfig) -> Vec<u8> {
        let mut buffer = vec![0; config.state_capacity];
        let len = self.save_state(&mut buffer);
        buffer.truncate(len);
        buffer
    }

    /// Restore a snapshot produced by [`save_state()`](Self::save_state).
    ///
    /// # Panics
    ///
    /// Panics if the snapshot is corrupt. A snapshot that disagrees with its
    /// own structure means the host broke the save/restore contract; there
    /// is no state to fall back to.
    fn restore_state(&mut self, snapshot: &[u8]) {
        if let Err(err) = self.deserialize(snapshot) {
            panic!("corrupt scanner snapshot ({} bytes): {err}", snapshot.len());
        }
    }

    /// Return to the initial state; same as restoring an empty snapshot.
    fn reset(&mut self) {
        self.restore_state(&[]);
    }
}
