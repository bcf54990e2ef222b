//! Bracket depth tracking for pattern scans.

/// Open `(`, `[` and `{` groups inside a regex or glob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Nesting {
    pub paren: u32,
    pub bracket: u32,
    pub brace: u32,
}

impl Nesting {
    pub fn with_parens(paren: u32) -> Self {
        Nesting {
            paren,
            ..Nesting::default()
        }
    }

    /// Account for `c`. Returns `true` if `c` closes a group that was never
    /// opened, which ends the pattern.
    pub fn ends_at(&mut self, c: char) -> bool {
        match c {
            '(' => self.paren += 1,
            '[' => self.bracket += 1,
            '{' => self.brace += 1,
            ')' => return close(&mut self.paren),
            ']' => return close(&mut self.bracket),
            '}' => return close(&mut self.brace),
            _ => {}
        }
        false
    }
}

fn close(depth: &mut u32) -> bool {
    if *depth == 0 {
        return true;
    }
    *depth -= 1;
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopened_closer_ends_pattern() {
        let mut nesting = Nesting::default();
        assert!(!nesting.ends_at('('));
        assert!(!nesting.ends_at('{'));
        assert!(!nesting.ends_at(')'));
        assert!(nesting.ends_at(')'));
        assert!(!nesting.ends_at('}'));
        assert!(nesting.ends_at(']'));
    }

    #[test]
    fn resumed_depth_counts_as_open() {
        let mut nesting = Nesting::with_parens(1);
        assert!(!nesting.ends_at(')'));
        assert_eq!(nesting.paren, 0);
        assert!(nesting.ends_at(')'));
    }
}
