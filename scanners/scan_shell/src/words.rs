//! Word-level resolvers: concatenation, expansion operators, test
//! operators, variable names and the lenient expansion fallbacks.

use scan_core::chars::{is_alnum, is_alpha, is_ascii_alpha, is_ascii_digit, is_space};
use scan_core::Lexer;

use crate::dispatch::{recovering, Stage, Step, Valid};
use crate::{Heredoc, ShellScanner, ShellToken};

/// Zero-width glue between two fragments of one word.
pub(crate) fn concat(_: &mut ShellScanner, lexer: &mut dyn Lexer, valid: Valid) -> Step {
    let c = lexer.lookahead();
    let ends_word = c == '\0'
        || is_space(c)
        || matches!(c, '>' | '<' | ')' | '(' | ';' | '&' | '|')
        || (c == '}' && valid.contains(ShellToken::ClosingBrace))
        || (c == ']' && valid.contains(ShellToken::ClosingBracket));

    if !ends_word {
        match c {
            '`' => {
                // a`b`: glue only if the command substitution ends the word.
                lexer.mark_end();
                lexer.consume();
                while !lexer.at('`') && !lexer.is_eof() {
                    lexer.consume();
                }
                if lexer.is_eof() {
                    return Step::Decline;
                }
                lexer.consume();
                return Step::emit_if(
                    lexer.at_class(is_space) || lexer.is_eof(),
                    ShellToken::Concat,
                );
            }
            '\\' => {
                lexer.mark_end();
                lexer.consume();
                if matches!(lexer.lookahead(), '"' | '\'' | '\\') {
                    return Step::Emit(ShellToken::Concat);
                }
                if lexer.is_eof() {
                    return Step::Decline;
                }
            }
            _ => return Step::Emit(ShellToken::Concat),
        }
    }

    if lexer.at_class(is_space)
        && valid.contains(ShellToken::ClosingBrace)
        && !valid.contains(ShellToken::ExpansionWord)
    {
        return Step::Emit(ShellToken::Concat);
    }
    Step::Next
}

/// `##` inside `${...}` that is not directly closed.
pub(crate) fn double_hash(_: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    if lexer.at('#') {
        lexer.mark_end();
        lexer.consume();
        if lexer.at('#') {
            lexer.consume();
            if !lexer.at('}') {
                lexer.mark_end();
                return Step::Emit(ShellToken::ImmediateDoubleHash);
            }
        }
    }
    Step::Next
}

/// `#`, `!` or `=` run directly before the closing `}` of an expansion.
pub(crate) fn expansion_sym(_: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    let kind = match lexer.lookahead() {
        '#' => ShellToken::ExternalExpansionSymHash,
        '!' => ShellToken::ExternalExpansionSymBang,
        '=' => ShellToken::ExternalExpansionSymEqual,
        _ => return Step::Next,
    };
    lexer.consume();
    lexer.mark_end();
    while matches!(lexer.lookahead(), '#' | '=' | '!') {
        lexer.consume();
    }
    lexer.ignore_while(is_space);
    Step::emit_if(lexer.at('}'), kind)
}

pub(crate) fn empty_value(_: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    let c = lexer.lookahead();
    if is_space(c) || lexer.is_eof() || c == ';' || c == '&' {
        return Step::Emit(ShellToken::EmptyValue);
    }
    Step::Next
}

/// `-f`-style operators inside test commands.
pub(crate) fn test_operator(_: &mut ShellScanner, lexer: &mut dyn Lexer, valid: Valid) -> Step {
    while lexer.at_class(is_space) && !lexer.at('\n') {
        lexer.ignore();
    }

    if lexer.at('\\') {
        if valid.contains(ShellToken::ExtglobPattern) {
            return Step::Resume(Stage::Extglob);
        }
        if valid.contains(ShellToken::RegexNoSpace) {
            return Step::Resume(Stage::Regex);
        }
        lexer.ignore();
        if lexer.is_eof() {
            return Step::Decline;
        }
        if lexer.at('\r') {
            lexer.ignore();
            if lexer.at('\n') {
                lexer.ignore();
            }
        } else if lexer.at('\n') {
            lexer.ignore();
        } else {
            return Step::Decline;
        }
        lexer.ignore_while(is_space);
    }

    if lexer.at('\n') && !valid.contains(ShellToken::Newline) {
        lexer.ignore();
        lexer.ignore_while(is_space);
    }

    if lexer.at('-') {
        lexer.consume();
        let mut advanced_once = false;
        while lexer.at_class(is_ascii_alpha) {
            advanced_once = true;
            lexer.consume();
        }

        if lexer.at_class(is_space) && advanced_once {
            lexer.mark_end();
            lexer.consume();
            if lexer.at('}') && valid.contains(ShellToken::ClosingBrace) {
                // `${x:-word }`: the operator is really the start of a word.
                if valid.contains(ShellToken::ExpansionWord) {
                    lexer.mark_end();
                    return Step::Emit(ShellToken::ExpansionWord);
                }
                return Step::Decline;
            }
            return Step::Emit(ShellToken::TestOperator);
        }
        if lexer.at_class(is_space) && valid.contains(ShellToken::ExtglobPattern) {
            return Step::Emit(ShellToken::ExtglobPattern);
        }
    }

    if valid.contains(ShellToken::BareDollar) && !recovering(valid) && bare_dollar(lexer) {
        return Step::Emit(ShellToken::BareDollar);
    }
    Step::Next
}

/// Variable names, file descriptors and heredoc arrows.
pub(crate) fn variable_name(
    scanner: &mut ShellScanner,
    lexer: &mut dyn Lexer,
    valid: Valid,
) -> Step {
    let expansion_word = valid.contains(ShellToken::ExpansionWord);
    loop {
        let c = lexer.lookahead();
        let blank = matches!(c, ' ' | '\t' | '\r')
            || (c == '\n' && !valid.contains(ShellToken::Newline));
        if blank && !expansion_word {
            lexer.ignore();
        } else if c == '\\' {
            lexer.ignore();
            if lexer.is_eof() {
                lexer.mark_end();
                return Step::Emit(ShellToken::VariableName);
            }
            if lexer.at('\r') {
                lexer.ignore();
            }
            if lexer.at('\n') {
                lexer.ignore();
            } else {
                if lexer.at('\\') && expansion_word {
                    return Step::Resume(Stage::ExpansionWord);
                }
                return Step::Decline;
            }
        } else {
            break;
        }
    }

    // Special parameters are only names when nothing makes them an operand.
    if !expansion_word && matches!(lexer.lookahead(), '*' | '@' | '?' | '-' | '0' | '_') {
        lexer.mark_end();
        lexer.consume();
        if matches!(lexer.lookahead(), '=' | '[' | ':' | '-' | '%' | '#' | '/') {
            return Step::Decline;
        }
        if valid.contains(ShellToken::ExtglobPattern) && lexer.at_class(is_space) {
            lexer.mark_end();
            return Step::Emit(ShellToken::ExtglobPattern);
        }
    }

    if valid.contains(ShellToken::HeredocArrow) && lexer.at('<') {
        lexer.consume();
        if !lexer.at('<') {
            return Step::Decline;
        }
        lexer.consume();
        return match lexer.lookahead() {
            '-' => {
                if !valid.contains(ShellToken::HeredocArrowDash) {
                    return Step::Decline;
                }
                lexer.consume();
                scanner.push_heredoc(Heredoc::new(true));
                Step::Emit(ShellToken::HeredocArrowDash)
            }
            '<' | '=' => Step::Decline,
            _ => {
                scanner.push_heredoc(Heredoc::new(false));
                Step::Emit(ShellToken::HeredocArrow)
            }
        };
    }

    let mut is_number = true;
    let c = lexer.lookahead();
    if is_ascii_digit(c) {
        lexer.consume();
    } else if is_alpha(c) || c == '_' {
        is_number = false;
        lexer.consume();
    } else {
        if c == '{' {
            return Step::Resume(Stage::BraceStart);
        }
        if expansion_word {
            return Step::Resume(Stage::ExpansionWord);
        }
        if valid.contains(ShellToken::ExtglobPattern) {
            return Step::Resume(Stage::Extglob);
        }
        return Step::Decline;
    }

    loop {
        let c = lexer.lookahead();
        if is_ascii_digit(c) {
            lexer.consume();
        } else if is_alpha(c) || c == '_' {
            is_number = false;
            lexer.consume();
        } else {
            break;
        }
    }

    if is_number
        && valid.contains(ShellToken::FileDescriptor)
        && matches!(lexer.lookahead(), '>' | '<')
    {
        return Step::Emit(ShellToken::FileDescriptor);
    }

    if valid.contains(ShellToken::VariableName) {
        let closing_brace = valid.contains(ShellToken::ClosingBrace);
        match lexer.lookahead() {
            '+' => {
                lexer.mark_end();
                lexer.consume();
                return Step::emit_if(
                    matches!(lexer.lookahead(), '=' | ':') || closing_brace,
                    ShellToken::VariableName,
                );
            }
            '/' => return Step::Decline,
            '=' | '[' | '%' | '@' => {
                lexer.mark_end();
                return Step::Emit(ShellToken::VariableName);
            }
            ':' if !closing_brace => {
                lexer.mark_end();
                return Step::Emit(ShellToken::VariableName);
            }
            '#' if !is_number => {
                lexer.mark_end();
                return Step::Emit(ShellToken::VariableName);
            }
            '-' if closing_brace => {
                lexer.mark_end();
                return Step::Emit(ShellToken::VariableName);
            }
            '?' => {
                // `name?x` but not a trailing `name?`
                lexer.mark_end();
                lexer.consume();
                return Step::emit_if(lexer.at_class(is_ascii_alpha), ShellToken::VariableName);
            }
            _ => {}
        }
    }

    Step::Decline
}

/// `$` followed by nothing expandable. Skips blanks on the current line.
pub(crate) fn bare_dollar(lexer: &mut dyn Lexer) -> bool {
    while lexer.at_class(is_space) && !lexer.at('\n') && !lexer.is_eof() {
        lexer.ignore();
    }
    if !lexer.at('$') {
        return false;
    }
    lexer.consume();
    lexer.mark_end();
    lexer.at_class(is_space) || lexer.is_eof() || lexer.at('"')
}

/// Returns `true` if a `$` just consumed starts an expansion.
fn starts_expansion(c: char) -> bool {
    matches!(c, '{' | '(' | '\'') || is_alnum(c)
}

/// Lenient word inside `${...}`, up to the closing `}` or an expansion.
pub(crate) fn expansion_word(_: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    let mut advanced_once = false;
    let mut advanced_space = false;
    loop {
        if lexer.at('"') {
            return Step::Decline;
        }
        if lexer.at('$') {
            lexer.mark_end();
            lexer.consume();
            if starts_expansion(lexer.lookahead()) {
                return Step::emit_if(advanced_once, ShellToken::ExpansionWord);
            }
            advanced_once = true;
        }

        if lexer.at('}') {
            lexer.mark_end();
            return Step::emit_if(advanced_once || advanced_space, ShellToken::ExpansionWord);
        }

        if lexer.at('(') && !(advanced_once || advanced_space) {
            lexer.mark_end();
            lexer.consume();
            while !lexer.at(')') && !lexer.is_eof() {
                if lexer.at('$') {
                    // Some word glued to an expansion; let the grammar take it.
                    lexer.mark_end();
                    lexer.consume();
                    if starts_expansion(lexer.lookahead()) {
                        return Step::emit_if(advanced_once, ShellToken::ExpansionWord);
                    }
                    advanced_once = true;
                } else {
                    let space = lexer.at_class(is_space);
                    advanced_once |= !space;
                    advanced_space |= space;
                    lexer.consume();
                }
            }
            lexer.mark_end();
            if !lexer.at(')') {
                return Step::Decline;
            }
            advanced_once = true;
            lexer.consume();
            lexer.mark_end();
            if lexer.at('}') {
                return Step::Decline;
            }
        }

        if lexer.at('\'') || lexer.is_eof() {
            return Step::Decline;
        }
        let space = lexer.at_class(is_space);
        advanced_once |= !space;
        advanced_space |= space;
        lexer.consume();
    }
}

/// `{` of a `{1..10}` range. Only the brace is claimed.
pub(crate) fn brace_start(_: &mut ShellScanner, lexer: &mut dyn Lexer, _: Valid) -> Step {
    lexer.ignore_while(is_space);
    if !lexer.at('{') {
        return Step::Decline;
    }
    lexer.consume();
    lexer.mark_end();

    lexer.consume_while(is_ascii_digit);
    for _ in 0..2 {
        if !lexer.at('.') {
            return Step::Decline;
        }
        lexer.consume();
    }
    lexer.consume_while(is_ascii_digit);

    Step::emit_if(lexer.at('}'), ShellToken::BraceStart)
}
