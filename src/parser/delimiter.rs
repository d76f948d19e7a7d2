//! Delimiter depth tracking for lookahead scans.
//!
//! The parser decides whether a block statement is a nested element
//! declaration by scanning the rest of its line; only `{` and `:` outside any
//! parentheses or brackets count.

use crate::{SyntaxKind, Token};

/// Tracks nested delimiter depth while scanning tokens.
#[derive(Default, Debug, Clone, Copy)]
pub(crate) struct DelimiterDepths {
    paren: usize,
    bracket: usize,
}

impl DelimiterDepths {
    pub(crate) fn apply(&mut self, kind: SyntaxKind) {
        match kind {
            SyntaxKind::T_LPAREN => self.paren += 1,
            SyntaxKind::T_RPAREN => self.paren = self.paren.saturating_sub(1),
            SyntaxKind::T_LBRACKET => self.bracket += 1,
            SyntaxKind::T_RBRACKET => self.bracket = self.bracket.saturating_sub(1),
            _ => {}
        }
    }

    #[must_use]
    pub(crate) fn is_top_level(&self) -> bool {
        self.paren == 0 && self.bracket == 0
    }
}

/// Returns `true` when the line starting at `tokens[0]` declares an element:
/// an identifier followed, on the same line and at depth zero, by `{` or `:`.
#[must_use]
pub(crate) fn starts_element_declaration(tokens: &[Token]) -> bool {
    let Some((first, rest)) = tokens.split_first() else {
        return false;
    };
    if first.kind != SyntaxKind::T_IDENT || first.has_trailing_newline() {
        return matches!(
            (first.kind, rest.first().map(|t| t.kind)),
            (SyntaxKind::T_IDENT, Some(SyntaxKind::T_LBRACE))
        );
    }
    let mut depths = DelimiterDepths::default();
    for tok in rest {
        match tok.kind {
            SyntaxKind::T_LBRACE | SyntaxKind::T_COLON if depths.is_top_level() => return true,
            SyntaxKind::T_RBRACE | SyntaxKind::T_EOF => return false,
            kind => depths.apply(kind),
        }
        if tok.has_trailing_newline() {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;
    use rstest::rstest;

    #[rstest]
    #[case("Note: 'x'", true)]
    #[case("Indexes {", true)]
    #[case("Ref fk: a.b > c.d", true)]
    #[case("Note\n{", true)]
    #[case("id int [note: 'x']", false)]
    #[case("id int\nNote: 'x'", false)]
    #[case("(id, name) [unique]", false)]
    #[case("active", false)]
    fn detects_nested_elements(#[case] src: &str, #[case] expected: bool) {
        assert_eq!(starts_element_declaration(&tokenize(src).tokens), expected);
    }
}
