//! Extended glob patterns: `?(..)`, `*(..)`, `+(..)`, `@(..)`, `!(..)`
//! and case-item patterns.
//!
//! A pattern interrupted by `$(` or `${` is returned in pieces; the paren
//! depth reached so far is kept in the scanner so the next piece balances
//! against it. Any other end of pattern resets that depth.

use scan_core::chars::{is_ascii_alnum, is_space};
use scan_core::Lexer;
use tracing::debug;

use crate::dispatch::{Step, Valid};
use crate::nesting::Nesting;
use crate::{ShellScanner, ShellToken};

fn is_glob_start(c: char) -> bool {
    matches!(c, '?' | '*' | '+' | '@' | '!' | '-' | ')' | '\\' | '.')
}

pub(crate) fn extglob(scanner: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    lexer.ignore_while(is_space);

    if !is_glob_start(lexer.lookahead()) {
        scanner.last_glob_paren_depth = 0;
        return Step::Decline;
    }

    if lexer.at('\\') {
        lexer.consume();
        let c = lexer.lookahead();
        if (is_space(c) || c == '"') && c != '\r' && c != '\n' {
            lexer.consume();
        } else {
            return Step::Decline;
        }
    }

    if lexer.at(')') && scanner.last_glob_paren_depth == 0 {
        lexer.mark_end();
        lexer.consume();
        if lexer.at_class(is_space) {
            return Step::Decline;
        }
    }

    lexer.mark_end();
    lexer.consume();

    // `-word` is an ordinary word unless something special follows.
    if lexer.at('-') {
        lexer.mark_end();
        lexer.consume();
        lexer.consume_while(is_ascii_alnum);
        if matches!(lexer.lookahead(), ')' | '\\' | '.') {
            return Step::Decline;
        }
        lexer.mark_end();
    }

    // Case item: `-)` or `*)`.
    if lexer.at(')') && scanner.last_glob_paren_depth == 0 {
        lexer.mark_end();
        lexer.consume();
        if lexer.at_class(is_space) {
            return Step::Emit(ShellToken::ExtglobPattern);
        }
    }

    if lexer.at_class(is_space) {
        lexer.mark_end();
        scanner.last_glob_paren_depth = 0;
        return Step::Emit(ShellToken::ExtglobPattern);
    }

    if lexer.at('$') {
        lexer.mark_end();
        lexer.consume();
        if lexer.at('{') || lexer.at('(') {
            return Step::Emit(ShellToken::ExtglobPattern);
        }
    }

    if lexer.at('|') {
        lexer.mark_end();
        lexer.consume();
        if matches!(lexer.lookahead(), '\\' | '\r' | '\n') {
            return Step::Emit(ShellToken::ExtglobPattern);
        }
    }

    let c = lexer.lookahead();
    if !is_ascii_alnum(c) && !matches!(c, '(' | '"' | '[' | '?' | '/' | '\\' | '_') {
        return Step::Decline;
    }

    let mut nesting = Nesting::with_parens(u32::from(scanner.last_glob_paren_depth));
    loop {
        let c = lexer.lookahead();
        if c == '\0' {
            return Step::Decline;
        }
        if nesting.ends_at(c) {
            break;
        }

        if c == '$' {
            lexer.mark_end();
            lexer.consume();
            if lexer.at('(') || lexer.at('{') {
                let depth = u8::try_from(nesting.paren).unwrap_or(u8::MAX);
                debug!(depth, "extglob interrupted by expansion");
                scanner.last_glob_paren_depth = depth;
                return Step::Emit(ShellToken::ExtglobPattern);
            }
        }
        if is_space(c) || lexer.at('"') {
            lexer.mark_end();
            scanner.last_glob_paren_depth = 0;
            return Step::Emit(ShellToken::ExtglobPattern);
        }
        if lexer.at('\\') {
            lexer.consume();
            if lexer.at_class(is_space) || lexer.at('"') {
                lexer.consume();
            }
        } else {
            lexer.consume();
        }
        lexer.mark_end();
    }

    scanner.last_glob_paren_depth = 0;
    Step::Emit(ShellToken::ExtglobPattern)
}
