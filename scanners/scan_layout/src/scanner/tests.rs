use super::*;
use pretty_assertions::assert_eq;
use scan_core::{ScanConfig, SourceLexer};
use LayoutToken::{Dedent, Indent, Newline};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    Layout(LayoutToken),
    Word(String),
}

fn word(text: &str) -> Tok {
    Tok::Word(text.to_string())
}

/// Drive the scanner the way a host would with every layout token
/// acceptable: when the scanner declines, the host claims the next
/// whitespace-delimited word itself. Stops after the final `NEWLINE`.
///
/// With `replay`, state is saved and restored before every call.
fn drive(source: &str, replay: bool) -> (Vec<Tok>, LayoutScanner) {
    let mut lexer = SourceLexer::new(source);
    let mut scanner = LayoutScanner::new();
    let mut out = Vec::new();
    for _ in 0..500 {
        if replay {
            let snapshot = scanner.snapshot();
            scanner.restore_state(&snapshot);
        }
        match lexer.scan_token(&mut scanner, ValidSymbols::all()) {
            Some(token) => {
                assert!(token.span.is_empty() || lexer.text(token.span).trim().is_empty());
                out.push(Tok::Layout(token.kind));
                let finished = token.kind == Newline
                    && lexer.is_eof()
                    && scanner.depth() == 0
                    && scanner.queued_dedents() == 0;
                if finished {
                    break;
                }
            }
            None => {
                if lexer.is_eof() {
                    break;
                }
                let start = lexer.position() as usize;
                while !lexer.is_eof() && !lexer.lookahead().is_whitespace() {
                    lexer.consume();
                }
                out.push(word(&source[start..lexer.position() as usize]));
                let end = lexer.position();
                lexer.seek(end);
            }
        }
    }
    (out, scanner)
}

fn layout(tokens: &[LayoutToken]) -> Vec<Tok> {
    tokens.iter().map(|&t| Tok::Layout(t)).collect()
}

// === Decisions ===

#[test]
fn same_width_after_line_break_is_newline() {
    let (tokens, _) = drive("a\nb\n", false);
    assert_eq!(
        tokens,
        vec![
            word("a"),
            Tok::Layout(Newline),
            word("b"),
            Tok::Layout(Newline)
        ]
    );
}

#[test]
fn nested_blocks_close_one_pair_per_level() {
    let (tokens, scanner) = drive("a\n  b\n    c\nd", false);
    assert_eq!(
        tokens,
        vec![
            word("a"),
            Tok::Layout(Indent),
            word("b"),
            Tok::Layout(Indent),
            word("c"),
            Tok::Layout(Dedent),
            Tok::Layout(Newline),
            Tok::Layout(Dedent),
            Tok::Layout(Newline),
            word("d"),
            Tok::Layout(Newline),
        ]
    );
    assert_eq!(scanner.indents(), &[0]);
}

#[test]
fn dedent_queue_drains_over_successive_calls() {
    let source = "a\n  b\n    c\n      d\ne";
    let mut lexer = SourceLexer::new(source);
    let mut scanner = LayoutScanner::new();
    // Walk up to the last line break, letting the host claim each word.
    for _ in 0..3 {
        let start = lexer.position();
        assert_eq!(lexer.scan_token(&mut scanner, ValidSymbols::all()), None);
        assert_eq!(lexer.position(), start);
        while !lexer.lookahead().is_whitespace() {
            lexer.consume();
        }
        let end = lexer.position();
        lexer.seek(end);
        let token = lexer.scan_token(&mut scanner, ValidSymbols::all());
        assert_eq!(token.map(|t| t.kind), Some(Indent));
    }
    assert_eq!(scanner.indents(), &[0, 2, 4, 6]);
    assert_eq!(lexer.scan_token(&mut scanner, ValidSymbols::all()), None);
    while !lexer.lookahead().is_whitespace() {
        lexer.consume();
    }
    let end = lexer.position();
    lexer.seek(end);

    let first = lexer.scan_token(&mut scanner, ValidSymbols::all());
    assert_eq!(first.map(|t| t.kind), Some(Dedent));
    assert_eq!(scanner.indents(), &[0]);
    assert_eq!(scanner.queued_dedents(), 2);

    let mut rest = Vec::new();
    for _ in 0..5 {
        let token = lexer.scan_token(&mut scanner, ValidSymbols::all());
        let token = token.map(|t| t.kind);
        rest.push(token);
    }
    assert_eq!(
        rest,
        vec![
            Some(Newline),
            Some(Dedent),
            Some(Newline),
            Some(Dedent),
            Some(Newline)
        ]
    );
    assert_eq!(scanner.queued_dedents(), 0);
    assert!(lexer.at('e'));
}

#[test]
fn deeper_line_without_indent_acceptable_changes_nothing() {
    let mut lexer = SourceLexer::new("\n    x");
    let mut scanner = LayoutScanner::new();
    let valid = ValidSymbols::from([Newline, Dedent]);
    assert_eq!(lexer.scan_token(&mut scanner, valid), None);
    assert_eq!(scanner.indents(), &[0]);
    assert_eq!(lexer.position(), 0);
}

#[test]
fn shallower_line_without_dedent_acceptable_owes_every_level() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[0, 0, 0, 2, 0, 4, 0]);
    let mut lexer = SourceLexer::new("\nx");
    let valid = ValidSymbols::from([Newline]);
    assert_eq!(lexer.scan_token(&mut scanner, valid), None);
    assert_eq!(scanner.indents(), &[0]);
    assert_eq!(scanner.queued_dedents(), 2);

    let token = lexer.scan_token(&mut scanner, ValidSymbols::all());
    assert_eq!(token.map(|t| t.kind), Some(Dedent));
    assert_eq!(scanner.queued_dedents(), 1);
}

#[test]
fn shallower_line_between_open_widths_closes_only_deeper_levels() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[0, 0, 0, 2, 0, 6, 0]);
    let mut lexer = SourceLexer::new("\n    x");
    let token = lexer.scan_token(&mut scanner, ValidSymbols::all());
    assert_eq!(token.map(|t| t.kind), Some(Dedent));
    assert_eq!(scanner.indents(), &[0, 2]);
    assert_eq!(scanner.queued_dedents(), 0);
}

#[test]
fn end_of_input_closes_open_blocks_before_final_newline() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[0, 0, 0, 3, 0]);
    let mut lexer = SourceLexer::new("  \n");
    let kinds: Vec<_> = (0..3)
        .map(|_| lexer.scan_token(&mut scanner, ValidSymbols::all()))
        .map(|token| token.map(|t| t.kind))
        .collect();
    assert_eq!(kinds, vec![Some(Dedent), Some(Newline), Some(Newline)]);
    assert_eq!(scanner.depth(), 0);
}

#[test]
fn end_of_input_with_nothing_acceptable_declines() {
    let mut lexer = SourceLexer::new("");
    let mut scanner = LayoutScanner::new();
    assert_eq!(lexer.scan_token(&mut scanner, ValidSymbols::empty()), None);
}

#[test]
fn wide_columns_saturate() {
    let source = format!("\n{}x", " ".repeat(70_000));
    let mut lexer = SourceLexer::new(&source);
    let mut scanner = LayoutScanner::new();
    let token = lexer.scan_token(&mut scanner, ValidSymbols::all());
    assert_eq!(token.map(|t| t.kind), Some(Indent));
    assert_eq!(scanner.indents(), &[0, u16::MAX]);
}

#[test]
fn queued_newline_waits_until_acceptable() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[0, 0, 0, 2, 0]);
    let mut lexer = SourceLexer::new("\nx");
    let token = lexer.scan_token(&mut scanner, ValidSymbols::all());
    assert_eq!(token.map(|t| t.kind), Some(Dedent));
    assert_eq!(
        lexer.scan_token(&mut scanner, ValidSymbols::from([Indent])),
        None
    );
    let token = lexer.scan_token(&mut scanner, ValidSymbols::from([Newline]));
    assert_eq!(token.map(|t| t.kind), Some(Newline));
}

// === Snapshots ===

#[test]
fn snapshot_layout() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[1, 0, 0, 2, 0, 4, 0]);
    assert_eq!(scanner.indents(), &[0, 2, 4]);
    assert_eq!(scanner.queued_dedents(), 1);
    assert_eq!(scanner.snapshot(), vec![1, 0, 0, 2, 0, 4, 0]);
}

#[test]
fn empty_snapshot_restores_sentinel() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[3, 0, 0, 8, 0]);
    scanner.reset();
    assert_eq!(scanner, LayoutScanner::new());
    assert_eq!(scanner.snapshot(), vec![0, 0, 0]);
}

#[test]
fn snapshot_without_widths_gets_sentinel() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[2]);
    assert_eq!(scanner.indents(), &[0]);
    assert_eq!(scanner.queued_dedents(), 2);
}

#[test]
fn odd_width_bytes_are_rejected() {
    let mut scanner = LayoutScanner::new();
    let err = scanner.deserialize(&[0, 0, 0, 4]).unwrap_err();
    assert_eq!(err, StateError::TrailingBytes { offset: 3, extra: 1 });
}

#[test]
#[should_panic(expected = "corrupt scanner snapshot")]
fn restoring_corrupt_snapshot_panics() {
    LayoutScanner::new().restore_state(&[0, 0]);
}

#[test]
fn overflowing_save_reports_zero_bytes() {
    let mut scanner = LayoutScanner::new();
    scanner.restore_state(&[0, 0, 0, 2, 0, 4, 0]);
    let mut buf = [0u8; 4];
    assert_eq!(scanner.save_state(&mut buf), 0);
    let tight = ScanConfig { state_capacity: 6 };
    assert_eq!(scanner.snapshot_with(&tight), Vec::<u8>::new());
}

#[test]
fn replaying_every_call_matches_a_straight_run() {
    let source = "a\n  b\n    c\n  d\n      e\nf\n";
    let (straight, _) = drive(source, false);
    let (replayed, _) = drive(source, true);
    assert_eq!(straight, replayed);
    assert!(straight.contains(&Tok::Layout(Dedent)));
}

#[test]
fn restored_copy_continues_identically() {
    let source = "a\n  b\n    c\nd\n";
    let mut lexer = SourceLexer::new(source);
    let mut scanner = LayoutScanner::new();
    for _ in 0..3 {
        let _ = lexer.scan_token(&mut scanner, ValidSymbols::all());
        lexer.consume();
        let end = lexer.position();
        lexer.seek(end);
    }
    let mut copy = LayoutScanner::new();
    copy.restore_state(&scanner.snapshot());
    assert_eq!(copy.indents(), scanner.indents());
    assert_eq!(copy.snapshot(), scanner.snapshot());

    let mut other = lexer.clone();
    for _ in 0..6 {
        let a = lexer.scan_token(&mut scanner, ValidSymbols::all());
        let b = other.scan_token(&mut copy, ValidSymbols::all());
        assert_eq!(a, b);
        if a.is_none() {
            lexer.consume();
            other.consume();
            let (x, y) = (lexer.position(), other.position());
            lexer.seek(x);
            other.seek(y);
        }
    }
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_layout {
    use super::{drive, layout, Tok};
    use crate::LayoutToken::{Dedent, Indent, Newline};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_indent_is_closed_by_one_dedent(steps in proptest::collection::vec(1usize..5, 1..8)) {
            let mut widths = vec![0usize];
            for step in &steps {
                let next = widths[widths.len() - 1] + step;
                widths.push(next);
            }
            let mut lines = widths.clone();
            lines.extend(widths.iter().rev().skip(1));
            let source: String = lines.iter().map(|w| format!("{}x\n", " ".repeat(*w))).collect();

            let (tokens, scanner) = drive(&source, false);
            let count = |kind| tokens.iter().filter(|t| **t == Tok::Layout(kind)).count();
            prop_assert_eq!(count(Indent), steps.len());
            prop_assert_eq!(count(Dedent), steps.len());
            for pair in tokens.windows(2) {
                if pair[0] == Tok::Layout(Dedent) {
                    prop_assert_eq!(&pair[1..], &layout(&[Newline])[..]);
                }
            }
            prop_assert_eq!(scanner.indents(), &[0u16][..]);
        }
    }
}

#[test]
fn fresh_restore_after_dedent_loses_queued_newline() {
    let mut lexer = SourceLexer::new("a\n  b\nc\n");
    let mut scanner = LayoutScanner::new();
    let mut kinds = Vec::new();
    for _ in 0..2 {
        assert_eq!(lexer.scan_token(&mut scanner, ValidSymbols::all()), None);
        while !lexer.lookahead().is_whitespace() {
            lexer.consume();
        }
        let end = lexer.position();
        lexer.seek(end);
        kinds.push(lexer.scan_token(&mut scanner, ValidSymbols::all()).map(|t| t.kind));
    }
    assert_eq!(kinds, vec![Some(Indent), Some(Dedent)]);

    // The paired NEWLINE is queued in memory only; the byte layout has no
    // room for it, so a fresh instance cannot recover it.
    let snapshot = scanner.snapshot();
    assert_eq!(snapshot, vec![0, 0, 0]);
    let mut fresh = LayoutScanner::new();
    fresh.restore_state(&snapshot);
    let mut other = lexer.clone();

    let live = lexer.scan_token(&mut scanner, ValidSymbols::all());
    assert_eq!(live.map(|t| t.kind), Some(Newline));
    assert_eq!(other.scan_token(&mut fresh, ValidSymbols::all()), None);
}
