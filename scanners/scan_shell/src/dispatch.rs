//! Ordered resolver table.
//!
//! Every call walks [`RESOLVERS`] front to back. A resolver runs only when
//! its gate admits the acceptance set, and its outcome either decides the
//! call or lets the walk continue. A resolver may also hand the call to a
//! later resolver; the walk then resumes there, gates included, and nothing
//! in between runs.
//!
//! The order is significant: several modes are often acceptable at once and
//! the earlier, more specific resolver wins.

use scan_core::{Lexer, ValidSymbols};
use tracing::trace;

use crate::heredoc::{BodyKinds, BodyScan};
use crate::{extglob, regex, words, ShellScanner, ShellToken};

pub(crate) type Valid = ValidSymbols<ShellToken>;

/// Position of a resolver in [`RESOLVERS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Stage {
    Concat,
    DoubleHash,
    ExpansionSym,
    EmptyValue,
    HeredocBody,
    HeredocEnd,
    HeredocContent,
    HeredocStart,
    TestOperator,
    VariableName,
    BareDollar,
    Regex,
    Extglob,
    ExpansionWord,
    BraceStart,
}

/// Outcome of one resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Claim the token.
    Emit(ShellToken),
    /// Decide the call with no token.
    Decline,
    /// Not this resolver's input; try the next one.
    Next,
    /// Hand the call to a later resolver.
    Resume(Stage),
}

impl Step {
    pub fn emit_if(accept: bool, kind: ShellToken) -> Step {
        if accept {
            Step::Emit(kind)
        } else {
            Step::Decline
        }
    }
}

type Gate = fn(&ShellScanner, Valid) -> bool;
type Run = fn(&mut ShellScanner, &mut dyn Lexer, Valid) -> Step;

struct Resolver {
    stage: Stage,
    gate: Gate,
    run: Run,
}

/// The host sets `ERROR_RECOVERY` while it resynchronizes after a syntax
/// error; most resolvers stay out of the way then.
pub(crate) fn recovering(valid: Valid) -> bool {
    valid.contains(ShellToken::ErrorRecovery)
}

fn open_heredoc(scanner: &ShellScanner) -> Option<bool> {
    scanner.heredocs.last().map(|heredoc| heredoc.started())
}

static RESOLVERS: [Resolver; 15] = [
    Resolver {
        stage: Stage::Concat,
        gate: |_, valid| valid.contains(ShellToken::Concat) && !recovering(valid),
        run: words::concat,
    },
    Resolver {
        stage: Stage::DoubleHash,
        gate: |_, valid| valid.contains(ShellToken::ImmediateDoubleHash) && !recovering(valid),
        run: words::double_hash,
    },
    Resolver {
        stage: Stage::ExpansionSym,
        gate: |_, valid| {
            valid.contains(ShellToken::ExternalExpansionSymHash) && !recovering(valid)
        },
        run: words::expansion_sym,
    },
    Resolver {
        stage: Stage::EmptyValue,
        gate: |_, valid| valid.contains(ShellToken::EmptyValue),
        run: words::empty_value,
    },
    Resolver {
        stage: Stage::HeredocBody,
        gate: |scanner, valid| {
            valid.contains_any(&[
                ShellToken::HeredocBodyBeginning,
                ShellToken::SimpleHeredocBody,
            ]) && open_heredoc(scanner) == Some(false)
                && !recovering(valid)
        },
        run: heredoc_body,
    },
    Resolver {
        stage: Stage::HeredocEnd,
        gate: |scanner, valid| {
            valid.contains(ShellToken::HeredocEnd) && open_heredoc(scanner).is_some()
        },
        run: heredoc_end,
    },
    Resolver {
        stage: Stage::HeredocContent,
        gate: |scanner, valid| {
            valid.contains(ShellToken::HeredocContent)
                && open_heredoc(scanner) == Some(true)
                && !recovering(valid)
        },
        run: heredoc_content,
    },
    Resolver {
        stage: Stage::HeredocStart,
        gate: |scanner, valid| {
            valid.contains(ShellToken::HeredocStart)
                && !recovering(valid)
                && open_heredoc(scanner).is_some()
        },
        run: heredoc_start,
    },
    Resolver {
        stage: Stage::TestOperator,
        gate: |_, valid| {
            valid.contains(ShellToken::TestOperator) && !valid.contains(ShellToken::ExpansionWord)
        },
        run: words::test_operator,
    },
    Resolver {
        stage: Stage::VariableName,
        gate: |_, valid| {
            valid.contains_any(&[
                ShellToken::VariableName,
                ShellToken::FileDescriptor,
                ShellToken::HeredocArrow,
            ]) && !valid.contains(ShellToken::RegexNoSlash)
                && !recovering(valid)
        },
        run: words::variable_name,
    },
    Resolver {
        stage: Stage::BareDollar,
        gate: |_, valid| valid.contains(ShellToken::BareDollar) && !recovering(valid),
        run: |_, lexer, _| {
            if words::bare_dollar(lexer) {
                Step::Emit(ShellToken::BareDollar)
            } else {
                Step::Next
            }
        },
    },
    Resolver {
        stage: Stage::Regex,
        gate: |_, valid| {
            valid.contains_any(&[
                ShellToken::Regex,
                ShellToken::RegexNoSlash,
                ShellToken::RegexNoSpace,
            ]) && !recovering(valid)
        },
        run: regex::regex,
    },
    Resolver {
        stage: Stage::Extglob,
        gate: |_, valid| valid.contains(ShellToken::ExtglobPattern) && !recovering(valid),
        run: extglob::extglob,
    },
    Resolver {
        stage: Stage::ExpansionWord,
        gate: |_, valid| valid.contains(ShellToken::ExpansionWord),
        run: words::expansion_word,
    },
    Resolver {
        stage: Stage::BraceStart,
        gate: |_, valid| valid.contains(ShellToken::BraceStart) && !recovering(valid),
        run: words::brace_start,
    },
];

/// Run one scanner call.
pub(crate) fn dispatch(
    scanner: &mut ShellScanner,
    lexer: &mut dyn Lexer,
    valid: Valid,
) -> Option<ShellToken> {
    let mut index = 0;
    while let Some(resolver) = RESOLVERS.get(index) {
        index += 1;
        if !(resolver.gate)(scanner, valid) {
            continue;
        }
        match (resolver.run)(scanner, lexer, valid) {
            Step::Next => {}
            Step::Resume(stage) => {
                debug_assert!(stage > resolver.stage, "hand-off must move forward");
                trace!(from = ?resolver.stage, to = ?stage, "resolver hand-off");
                index = stage as usize;
            }
            Step::Decline => {
                trace!(stage = ?resolver.stage, "declined");
                return None;
            }
            Step::Emit(kind) => {
                if kind.is_emittable() && valid.contains(kind) {
                    trace!(?kind, stage = ?resolver.stage, "token");
                    return Some(kind);
                }
                trace!(?kind, stage = ?resolver.stage, "claimed kind not acceptable");
                return None;
            }
        }
    }
    None
}

fn body_step(scanner: &mut ShellScanner, scan: BodyScan, valid: Valid) -> Step {
    match scan {
        BodyScan::Token(kind) => Step::Emit(kind),
        // The context must outlive a declined call.
        BodyScan::Closed(kind) if !valid.contains(kind) => Step::Decline,
        BodyScan::Closed(kind) => {
            scanner.pop_heredoc();
            Step::Emit(kind)
        }
        BodyScan::None => Step::Decline,
    }
}

fn heredoc_body(scanner: &mut ShellScanner, lexer: &mut dyn Lexer, valid: Valid) -> Step {
    let Some(heredoc) = scanner.heredocs.last_mut() else {
        return Step::Next;
    };
    let scan = heredoc.scan_body(lexer, BodyKinds::Leading);
    body_step(scanner, scan, valid)
}

fn heredoc_content(scanner: &mut ShellScanner, lexer: &mut dyn Lexer, valid: Valid) -> Step {
    let Some(heredoc) = scanner.heredocs.last_mut() else {
        return Step::Next;
    };
    let scan = heredoc.scan_body(lexer, BodyKinds::Trailing);
    body_step(scanner, scan, valid)
}

fn heredoc_end(scanner: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    let Some(heredoc) = scanner.heredocs.last() else {
        return Step::Next;
    };
    if heredoc.match_delimiter(lexer) {
        scanner.pop_heredoc();
        return Step::Emit(ShellToken::HeredocEnd);
    }
    Step::Next
}

fn heredoc_start(scanner: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    let Some(heredoc) = scanner.heredocs.last_mut() else {
        return Step::Next;
    };
    Step::emit_if(heredoc.scan_start(lexer), ShellToken::HeredocStart)
}
