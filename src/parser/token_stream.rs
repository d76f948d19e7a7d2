//! Cursor over trivia-attached tokens with error tracking.
//!
//! Besides lookahead helpers, the stream owns the bookkeeping
//! that keeps every token in exactly one place: tokens the parser skips are
//! marked invalid and held back until the next consumed token, which receives
//! them as leading trivia.

use crate::parser::{ParsingError, ParsingErrorCode};
use crate::{Span, SyntaxKind, Token};

pub(crate) struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    skipped: Vec<Token>,
    pub(crate) errors: Vec<ParsingError>,
}

impl TokenStream {
    pub(crate) fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != SyntaxKind::T_EOF) {
            let end = tokens.last().map_or(0, Token::full_end);
            tokens.push(Token::new(SyntaxKind::T_EOF, "", end));
        }
        Self {
            tokens,
            pos: 0,
            skipped: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn eof(&self) -> &Token {
        // `new` guarantees a trailing EOF token.
        let last = self.tokens.len().saturating_sub(1);
        self.tokens
            .get(last)
            .unwrap_or_else(|| unreachable!("token stream always ends with EOF"))
    }

    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| self.eof())
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.peek().kind
    }

    pub(crate) fn nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or_else(|| self.eof())
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::T_EOF)
    }

    /// Returns `true` when the current token is the identifier `word`.
    pub(crate) fn at_word(&self, word: &str) -> bool {
        let tok = self.peek();
        tok.kind == SyntaxKind::T_IDENT && tok.value == word
    }

    /// Token just before the cursor, consumed or skipped.
    pub(crate) fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Returns `true` when the previous token ended its line.
    pub(crate) fn after_newline(&self) -> bool {
        self.previous().is_some_and(Token::has_trailing_newline)
    }

    /// Returns `true` when trivia separates the previous token from the
    /// current one.
    pub(crate) fn after_trivia(&self) -> bool {
        self.previous().is_some_and(Token::has_trailing_spaces)
            || !self.peek().leading_trivia.is_empty()
    }

    /// Consume the current token, gluing any held-back skipped tokens onto
    /// its leading trivia.
    pub(crate) fn bump(&mut self) -> Token {
        let mut token = self.peek().clone();
        if token.kind == SyntaxKind::T_EOF {
            log::warn!("parser consumed EOF before the end of the program");
        } else {
            self.pos += 1;
        }
        if !self.skipped.is_empty() {
            let mut leading = std::mem::take(&mut self.skipped);
            leading.append(&mut token.leading_trivia);
            token.leading_trivia = leading;
        }
        token
    }

    pub(crate) fn bump_if(&mut self, kind: SyntaxKind) -> Option<Token> {
        self.at(kind).then(|| self.bump())
    }

    /// Skip the current token, holding it back as invalid trivia for the
    /// next consumed token. EOF is never skipped.
    pub(crate) fn skip_invalid(&mut self) {
        if self.at_eof() {
            return;
        }
        let token = self.peek().clone();
        self.pos += 1;
        self.skipped.extend(flatten_invalid(token));
    }

    /// Skip the current token into a caller-owned bucket, together with any
    /// tokens already held back.
    pub(crate) fn skip_into_bucket(&mut self) -> Vec<Token> {
        let mut out = std::mem::take(&mut self.skipped);
        if !self.at_eof() {
            let token = self.peek().clone();
            self.pos += 1;
            out.extend(flatten_invalid(token));
        }
        out
    }

    /// Hold back an already consumed token that did not make it into the
    /// tree. Anything skipped since it was consumed follows it.
    pub(crate) fn reject(&mut self, token: Token) {
        let mut held = flatten_invalid(token);
        held.append(&mut self.skipped);
        self.skipped = held;
    }

    /// Consume the EOF token, which takes every remaining held-back token.
    pub(crate) fn finish(&mut self) -> Token {
        while !self.at_eof() {
            self.skip_invalid();
        }
        self.bump()
    }

    pub(crate) fn push_error(&mut self, code: ParsingErrorCode, message: impl Into<String>, span: Span) {
        self.errors.push(ParsingError::new(code, message, span));
    }

    pub(crate) fn error_here(&mut self, code: ParsingErrorCode, message: impl Into<String>) {
        let span = self.peek().span();
        self.push_error(code, message, span);
    }

    /// Raw tokens from the cursor onwards, for lookahead scans.
    pub(crate) fn remaining(&self) -> &[Token] {
        self.tokens.get(self.pos..).unwrap_or(&[])
    }
}

// Lay a skipped token out flat: its trivia become siblings so that no trivia
// token ever carries trivia of its own.
fn flatten_invalid(mut token: Token) -> Vec<Token> {
    let leading = std::mem::take(&mut token.leading_trivia);
    let trailing = std::mem::take(&mut token.trailing_trivia);
    token.is_invalid = true;
    let mut out = leading;
    out.push(token);
    out.extend(trailing);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn stream(src: &str) -> TokenStream {
        TokenStream::new(tokenize(src).tokens)
    }

    #[test]
    fn skipped_tokens_lead_the_next_consumed_token() {
        let mut ts = stream("a ) b");
        let _a = ts.bump();
        ts.skip_invalid();
        let b = ts.bump();
        assert_eq!(b.value, "b");
        let invalid: Vec<_> = b
            .leading_trivia
            .iter()
            .filter(|t| t.is_invalid)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(invalid, vec![")"]);
        assert_eq!(b.full_start(), 2);
    }

    #[test]
    fn finish_collects_leftovers_into_eof() {
        let mut ts = stream("a b");
        let eof = ts.finish();
        assert_eq!(eof.kind, SyntaxKind::T_EOF);
        assert_eq!(eof.leading_trivia.iter().filter(|t| t.is_invalid).count(), 2);
    }

    #[test]
    fn rejected_token_precedes_later_skips() {
        let mut ts = stream("- ) b");
        let minus = ts.bump();
        ts.skip_invalid();
        ts.reject(minus);
        let b = ts.bump();
        let invalid: Vec<_> = b
            .leading_trivia
            .iter()
            .filter(|t| t.is_invalid)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(invalid, vec!["-", ")"]);
        assert_eq!(b.full_start(), 0);
    }

    #[test]
    fn previous_tracks_line_ends() {
        let mut ts = stream("a\nb c");
        let _a = ts.bump();
        assert!(ts.after_newline());
        let _b = ts.bump();
        assert!(!ts.after_newline());
        assert!(ts.after_trivia());
    }

}
