//! Shared contract for hand-written external scanners.
//!
//! A host parser drives each scanner one token at a time: it hands over a
//! [`Lexer`] positioned at the next token boundary together with the set of
//! token kinds the grammar accepts there ([`ValidSymbols`]). The scanner
//! either claims a token or declines, and its persistent state can be saved
//! to and restored from a byte snapshot at any boundary.
//!
//! This crate holds only the pieces every scanner needs:
//!
//! - [`Lexer`]: the cursor abstraction the host provides
//! - [`SourceLexer`]: an in-memory cursor for tests and standalone use
//! - [`ValidSymbols`] / [`TokenKind`]: per-call acceptance sets
//! - [`StateWriter`] / [`StateReader`]: the snapshot codec
//! - [`ExternalScanner`]: the per-instance lifecycle
//! - [`ScanConfig`]: environment-driven limits

pub mod chars;
mod config;
mod lexer;
mod scanner;
mod source;
mod state;
mod symbols;

pub use config::{ScanConfig, STATE_CAPACITY_ENV};
pub use lexer::Lexer;
pub use scanner::ExternalScanner;
pub use source::{SourceLexer, Span, Token};
pub use state::{StateError, StateReader, StateWriter, SERIALIZATION_BUFFER_SIZE};
pub use symbols::{TokenKind, ValidSymbols};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for scanner debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=scan_shell=trace` (or any other scanner crate).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // `try_init` fails when a host already installed a global
            // subscriber; theirs stays in place.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
        tracing::debug!("subscriber installed at most once");
    }
}
