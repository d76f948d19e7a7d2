//! Tokens with attached trivia.
//!
//! The tokenizer turns source text into significant [`Token`]s. Whitespace,
//! newlines, comments and unrecognised characters never stand on their own:
//! they ride along as leading or trailing trivia of the nearest significant
//! token, so the token stream covers every byte of the input exactly once.

use crate::{Span, SyntaxKind};

/// A significant token, or a trivia token attached to one.
///
/// Trivia tokens never carry trivia of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Raw source text of the token.
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub leading_trivia: Vec<Token>,
    pub trailing_trivia: Vec<Token>,
    /// Set for tokens that are lexically malformed, or that the parser had to
    /// skip while recovering from a syntax error.
    pub is_invalid: bool,
}

/// Which side of a significant token a trivia token was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaSide {
    Leading,
    Trailing,
}

impl Token {
    #[must_use]
    pub fn new(kind: SyntaxKind, value: impl Into<String>, start: usize) -> Self {
        let value = value.into();
        let end = start + value.len();
        Self {
            kind,
            value,
            start,
            end,
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
            is_invalid: false,
        }
    }

    /// Byte length of the token text, excluding trivia.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.start..self.end
    }

    /// Start offset including leading trivia.
    #[must_use]
    pub fn full_start(&self) -> usize {
        self.leading_trivia.first().map_or(self.start, |t| t.start)
    }

    /// End offset including trailing trivia.
    #[must_use]
    pub fn full_end(&self) -> usize {
        self.trailing_trivia.last().map_or(self.end, |t| t.end)
    }

    #[must_use]
    pub fn full_span(&self) -> Span {
        self.full_start()..self.full_end()
    }

    #[must_use]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Returns `true` when the token ends its line.
    #[must_use]
    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_trivia
            .iter()
            .any(|t| t.kind == SyntaxKind::T_NEWLINE)
    }

    /// Returns `true` when anything separates this token from the next one.
    #[must_use]
    pub fn has_trailing_spaces(&self) -> bool {
        !self.trailing_trivia.is_empty()
    }

    /// Locate the trivia token covering `offset`, if any.
    #[must_use]
    pub fn trivia_at(&self, offset: usize) -> Option<(&Self, TriviaSide)> {
        let covering = |t: &&Self| t.start <= offset && offset < t.end;
        if let Some(t) = self.leading_trivia.iter().find(covering) {
            return Some((t, TriviaSide::Leading));
        }
        self.trailing_trivia
            .iter()
            .find(covering)
            .map(|t| (t, TriviaSide::Trailing))
    }

    /// Content of a string, quoted identifier or function expression with
    /// its delimiters removed and backslash escapes resolved. Other tokens
    /// yield their raw text.
    #[must_use]
    pub fn literal_text(&self) -> String {
        let raw = self.value.as_str();
        let inner = match self.kind {
            SyntaxKind::T_STRING if raw.starts_with("'''") => strip_delimiters(raw, "'''"),
            SyntaxKind::T_STRING => strip_delimiters(raw, "'"),
            SyntaxKind::T_QUOTED_IDENT => strip_delimiters(raw, "\""),
            SyntaxKind::T_FUNCTION_EXPR => strip_delimiters(raw, "`"),
            _ => return raw.to_string(),
        };
        unescape(inner)
    }
}

// Unterminated tokens keep their opening delimiter only.
fn strip_delimiters<'a>(raw: &'a str, delim: &str) -> &'a str {
    let body = raw.strip_prefix(delim).unwrap_or(raw);
    if body.len() >= delim.len() {
        body.strip_suffix(delim).unwrap_or(body)
    } else {
        body
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SyntaxKind::T_STRING, "'abc'", "abc")]
    #[case(SyntaxKind::T_STRING, "'''multi\nline'''", "multi\nline")]
    #[case(SyntaxKind::T_STRING, r"'it\'s'", "it's")]
    #[case(SyntaxKind::T_QUOTED_IDENT, "\"user id\"", "user id")]
    #[case(SyntaxKind::T_FUNCTION_EXPR, "`now()`", "now()")]
    #[case(SyntaxKind::T_STRING, "'open", "open")]
    #[case(SyntaxKind::T_IDENT, "users", "users")]
    fn literal_text_strips_delimiters(
        #[case] kind: SyntaxKind,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(Token::new(kind, raw, 0).literal_text(), expected);
    }

    #[test]
    fn full_span_covers_trivia() {
        let mut tok = Token::new(SyntaxKind::T_IDENT, "id", 2);
        tok.leading_trivia
            .push(Token::new(SyntaxKind::T_WHITESPACE, "  ", 0));
        tok.trailing_trivia
            .push(Token::new(SyntaxKind::T_NEWLINE, "\n", 4));
        assert_eq!(tok.full_span(), 0..5);
        assert!(tok.has_trailing_newline());
        assert_eq!(
            tok.trivia_at(0).map(|(t, side)| (t.kind, side)),
            Some((SyntaxKind::T_WHITESPACE, TriviaSide::Leading))
        );
        assert!(tok.trivia_at(2).is_none());
    }
}
