//! Regex literals in three flavors.
//!
//! | Kind             | Context                | Ends at                     |
//! |------------------|------------------------|-----------------------------|
//! | `REGEX`          | `${x#pat}`, `${x%pat}` | unopened `)`, `]` or `}`    |
//! | `REGEX_NO_SLASH` | `${x/pat/rep}`         | unescaped `/`               |
//! | `REGEX_NO_SPACE` | `[[ x =~ pat ]]`       | whitespace at paren depth 0 |
//!
//! Patterns are never compiled; only their extent matters. An unopened
//! closer ends every flavor.

use scan_core::chars::{is_alnum, is_space};
use scan_core::Lexer;

use crate::dispatch::{Step, Valid};
use crate::nesting::Nesting;
use crate::{ShellScanner, ShellToken};

pub(crate) fn regex(_: &mut ShellScanner, lexer: &mut dyn Lexer, valid: Valid) -> Step {
    let braced = valid.contains(ShellToken::Regex);
    let no_slash = valid.contains(ShellToken::RegexNoSlash);
    let no_space = valid.contains(ShellToken::RegexNoSpace);

    if braced || no_space {
        lexer.ignore_while(is_space);
    }
    if matches!(lexer.lookahead(), '"' | '\'') {
        return Step::Next;
    }

    if no_slash && lexer.at('$') {
        lexer.mark_end();
        lexer.consume();
        if lexer.at('(') {
            return Step::Decline;
        }
    }
    lexer.mark_end();

    let mut nesting = Nesting::default();
    let mut advanced_once = false;
    // Set once the pattern holds something other than a plain word, so
    // `123` or `$x` stays an ordinary operand.
    let mut significant = false;
    loop {
        let c = lexer.lookahead();
        if c == '\0' {
            return Step::Decline;
        }
        if nesting.ends_at(c) {
            break;
        }

        if braced {
            let was_space = is_space(c);
            lexer.consume();
            advanced_once = true;
            if !was_space || nesting.paren > 0 {
                lexer.mark_end();
            }
        } else if no_slash {
            match c {
                '/' => {
                    lexer.mark_end();
                    return Step::emit_if(advanced_once, ShellToken::RegexNoSlash);
                }
                '\\' => {
                    lexer.consume();
                    if !lexer.is_eof() && !lexer.at('[') && !lexer.at('/') {
                        lexer.consume();
                        lexer.mark_end();
                    }
                }
                _ => {
                    lexer.consume();
                    advanced_once = true;
                    if !is_space(c) {
                        lexer.mark_end();
                    }
                }
            }
        } else if no_space {
            match c {
                '\\' => {
                    significant = true;
                    lexer.consume();
                    if !lexer.is_eof() {
                        lexer.consume();
                    }
                }
                '$' => {
                    lexer.mark_end();
                    lexer.consume();
                    if lexer.at('(') {
                        return Step::Decline;
                    }
                    // A trailing `$` anchors the pattern.
                    if lexer.at_class(is_space) {
                        lexer.mark_end();
                        return Step::Emit(ShellToken::RegexNoSpace);
                    }
                }
                _ => {
                    if is_space(c) && nesting.paren == 0 {
                        lexer.mark_end();
                        return Step::emit_if(significant, ShellToken::RegexNoSpace);
                    }
                    if !is_alnum(c) && !matches!(c, '$' | '-' | '_') {
                        significant = true;
                    }
                    lexer.consume();
                }
            }
        }
    }

    let kind = if no_slash {
        ShellToken::RegexNoSlash
    } else if no_space {
        ShellToken::RegexNoSpace
    } else {
        ShellToken::Regex
    };
    if braced && !advanced_once {
        return Step::Decline;
    }
    Step::Emit(kind)
}
