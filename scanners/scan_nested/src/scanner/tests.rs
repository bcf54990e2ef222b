use super::*;
use crate::NestedToken as T;
use pretty_assertions::assert_eq;
use scan_core::{ScanConfig, SourceLexer};

fn scan_at(scanner: &mut NestedScanner, source: &str, at: u32, kinds: &[T]) -> Option<(T, String)> {
    let mut lexer = SourceLexer::new(source);
    lexer.seek(at);
    let token = lexer.scan_token(scanner, ValidSymbols::from(kinds))?;
    Some((token.kind, lexer.text(token.span).to_string()))
}

fn scan(scanner: &mut NestedScanner, source: &str, kinds: &[T]) -> Option<(T, String)> {
    scan_at(scanner, source, 0, kinds)
}

fn tok(kind: T, text: &str) -> Option<(T, String)> {
    Some((kind, text.to_string()))
}

fn inside(tag: &str) -> NestedScanner {
    NestedScanner {
        in_string: true,
        quoted_string_id: tag.to_string(),
    }
}

// === Quoted strings ===

#[test]
fn left_delimiter_captures_tag() {
    let mut scanner = NestedScanner::new();
    let kinds = [T::LeftQuotedStringDelim];
    assert_eq!(scan(&mut scanner, "foo|x", &kinds), tok(T::LeftQuotedStringDelim, "foo|"));
    assert_eq!(scanner, inside("foo"));
}

#[test]
fn failed_left_delimiter_keeps_state() {
    let mut scanner = inside("keep");
    assert_eq!(scan(&mut scanner, "foo x", &[T::LeftQuotedStringDelim]), None);
    assert_eq!(scanner, inside("keep"));
}

#[test]
fn right_delimiter_leaves_brace() {
    let mut scanner = inside("foo");
    let kinds = [T::RightQuotedStringDelim];
    assert_eq!(scan(&mut scanner, "|foo}", &kinds), tok(T::RightQuotedStringDelim, "|foo"));
    assert_eq!(scanner, NestedScanner::new());
}

#[test]
fn right_delimiter_needs_same_tag() {
    let mut scanner = inside("foo");
    assert_eq!(scan(&mut scanner, "|bar}", &[T::RightQuotedStringDelim]), None);
    assert_eq!(scanner, inside("foo"));
}

#[test]
fn quoted_string_closes_only_at_own_tag() {
    let source = "{foo|a |bar} b|foo}";
    let mut scanner = NestedScanner::new();
    assert_eq!(
        scan_at(&mut scanner, source, 1, &[T::LeftQuotedStringDelim]),
        tok(T::LeftQuotedStringDelim, "foo|")
    );
    let right = [T::RightQuotedStringDelim];
    assert_eq!(scan_at(&mut scanner, source, 7, &right), None);
    assert_eq!(scan_at(&mut scanner, source, 14, &right), tok(T::RightQuotedStringDelim, "|foo"));
    assert!(!scanner.in_string());
}

#[test]
fn empty_tag() {
    let mut scanner = NestedScanner::new();
    assert_eq!(
        scan(&mut scanner, "|x|}", &[T::LeftQuotedStringDelim]),
        tok(T::LeftQuotedStringDelim, "|")
    );
    assert_eq!(
        scan_at(&mut scanner, "|x|}", 2, &[T::RightQuotedStringDelim]),
        tok(T::RightQuotedStringDelim, "|")
    );
}

// === Strings ===

#[test]
fn string_delimiter_toggles() {
    let source = "\"a (* b\"";
    let mut scanner = NestedScanner::new();
    let kinds = [T::StringDelim, T::Comment];
    assert_eq!(scan(&mut scanner, source, &kinds), tok(T::StringDelim, "\""));
    assert!(scanner.in_string());
    assert_eq!(scan_at(&mut scanner, source, 3, &kinds), None);
    assert_eq!(scan_at(&mut scanner, source, 7, &kinds), tok(T::StringDelim, "\""));
    assert!(!scanner.in_string());
}

// === Comments ===

#[test]
fn comment_after_whitespace() {
    let mut scanner = NestedScanner::new();
    assert_eq!(
        scan(&mut scanner, "  (* a (* b *) c *) x", &[T::Comment]),
        tok(T::Comment, "(* a (* b *) c *)")
    );
}

#[test]
fn unterminated_comment_declines() {
    let mut scanner = NestedScanner::new();
    let mut lexer = SourceLexer::new("(* open");
    assert_eq!(lexer.scan_token(&mut scanner, ValidSymbols::from([T::Comment])), None);
    assert_eq!(lexer.position(), 0);
}

#[test]
fn comment_needs_acceptance() {
    let mut scanner = NestedScanner::new();
    assert_eq!(scan(&mut scanner, "(* a *)", &[T::StringDelim]), None);
}

// === Line directives ===

#[test]
fn line_directive_runs_to_line_end() {
    let mut scanner = NestedScanner::new();
    let kinds = [T::LineNumberDirective];
    assert_eq!(
        scan(&mut scanner, "# 12 \"file.ml\" extra\nlet", &kinds),
        tok(T::LineNumberDirective, "# 12 \"file.ml\" extra")
    );
    assert_eq!(
        scan(&mut scanner, "#7\"f\"", &kinds),
        tok(T::LineNumberDirective, "#7\"f\"")
    );
    assert_eq!(
        scan_at(&mut scanner, "x\n# 3 \"a\"", 1, &kinds),
        tok(T::LineNumberDirective, "# 3 \"a\"")
    );
}

#[test]
fn malformed_directive_declines() {
    let mut scanner = NestedScanner::new();
    let kinds = [T::LineNumberDirective];
    for source in [" # 1 \"f\"", "# x \"f\"", "# 1 f", "# 1 \"f\nx\"", "# 1 \"f"] {
        assert_eq!(scan(&mut scanner, source, &kinds), None, "{source:?}");
    }
}

#[test]
fn directive_inside_string_is_text() {
    let mut scanner = inside("");
    assert_eq!(scan(&mut scanner, "# 1 \"f\"", &[T::LineNumberDirective]), None);
}

// === NUL ===

#[test]
fn embedded_nul_is_a_token() {
    let mut scanner = NestedScanner::new();
    assert_eq!(scan(&mut scanner, "\0x", &[T::NullCharacter]), tok(T::NullCharacter, "\0"));
    assert_eq!(scan(&mut scanner, "", &[T::NullCharacter]), None);
}

// === Snapshots ===

#[test]
fn snapshot_layout() {
    assert_eq!(inside("ab").snapshot(), vec![1, b'a', b'b']);
    assert_eq!(NestedScanner::new().snapshot(), vec![0]);
}

#[test]
fn empty_snapshot_resets() {
    let mut scanner = inside("tag");
    scanner.restore_state(&[]);
    assert_eq!(scanner, NestedScanner::new());
}

#[test]
fn invalid_tag_bytes_are_rejected() {
    assert_eq!(
        NestedScanner::new().deserialize(&[1, 0xFF]),
        Err(StateError::InvalidUtf8 { offset: 1 })
    );
}

#[test]
fn oversized_tag_is_not_resumable() {
    let scanner = inside(&"z".repeat(2000));
    assert!(scanner.snapshot().is_empty());
    assert!(!scanner
        .snapshot_with(&ScanConfig { state_capacity: 4096 })
        .is_empty());
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_nested {
    use super::{inside, NestedScanner, T};
    use proptest::prelude::*;
    use scan_core::{ExternalScanner, SourceLexer, ValidSymbols};

    proptest! {
        #[test]
        fn closer_matches_only_its_own_tag(open in "[a-z_]{0,6}", close in "[a-z_]{0,6}") {
            let source = format!("|{close}}}");
            let mut scanner = inside(&open);
            let mut lexer = SourceLexer::new(&source);
            let kinds = ValidSymbols::from([T::RightQuotedStringDelim]);
            let closed = lexer.scan_token(&mut scanner, kinds).is_some();
            prop_assert_eq!(closed, open == close);
        }

        #[test]
        fn snapshot_round_trips(in_string in any::<bool>(), tag in "[a-z_]{0,40}") {
            let mut scanner = inside(&tag);
            scanner.in_string = in_string;
            let mut restored = NestedScanner::new();
            restored.restore_state(&scanner.snapshot());
            prop_assert_eq!(restored, scanner);
        }
    }
}
