//! Lexical analysis for DBML source.
//!
//! `tokenize` converts raw source text into a [`Lexed`] stream of
//! significant [`Token`]s with their trivia attached, terminated by a
//! zero-length `T_EOF` token. Recognition is delegated to `logos`; quoted
//! forms are scanned by callbacks so that an unterminated string still
//! produces a token (flagged invalid) instead of a run of garbage.

use logos::{Lexer, Logos};

use crate::parser::{ParsingError, ParsingErrorCode};
use crate::{SyntaxKind, Token};

/// Byte range for a token within the source.
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[ \t\r\x0C]+")]
    Whitespace,
    #[token("\n")]
    Newline,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment(bool),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[token("\"", |lex| quoted(lex, '"'))]
    QuotedIdent(bool),
    #[token("'", string)]
    String(bool),
    #[token("`", |lex| quoted(lex, '`'))]
    FunctionExpr(bool),
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,
    #[regex(r"#[0-9A-Za-z_]*")]
    Color,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("<>")]
    LtGt,
    #[token("<=")]
    Lte,
    #[token(">=")]
    Gte,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
}

// Scan to the closing `quote` on the same line, honouring backslash escapes.
// Returns whether the closing quote was found.
fn quoted(lex: &mut Lexer<RawToken>, quote: char) -> bool {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' => {
                lex.bump(i);
                return false;
            }
            c if c == quote => {
                lex.bump(i + c.len_utf8());
                return true;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    false
}

// A `'` opening two more quotes starts a multi-line string.
fn string(lex: &mut Lexer<RawToken>) -> bool {
    if lex.remainder().starts_with("''") {
        lex.bump(2);
        return scan_until(lex, "'''");
    }
    quoted(lex, '\'')
}

fn block_comment(lex: &mut Lexer<RawToken>) -> bool {
    scan_until(lex, "*/")
}

fn scan_until(lex: &mut Lexer<RawToken>, terminator: &str) -> bool {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' && terminator == "'''" {
            escaped = true;
            continue;
        }
        if rest.get(i..).is_some_and(|tail| tail.starts_with(terminator)) {
            lex.bump(i + terminator.len());
            return true;
        }
    }
    lex.bump(rest.len());
    false
}

/// Kind of a raw token plus the syntax error to report when it is malformed.
fn classify(raw: RawToken) -> (SyntaxKind, Option<ParsingErrorCode>) {
    use ParsingErrorCode as E;
    use SyntaxKind as K;

    let unterminated = |ok: bool, code| if ok { None } else { Some(code) };
    match raw {
        RawToken::Whitespace => (K::T_WHITESPACE, None),
        RawToken::Newline => (K::T_NEWLINE, None),
        RawToken::LineComment => (K::T_COMMENT, None),
        RawToken::BlockComment(ok) => (K::T_COMMENT, unterminated(ok, E::UnterminatedComment)),
        RawToken::Ident => (K::T_IDENT, None),
        RawToken::QuotedIdent(ok) => (
            K::T_QUOTED_IDENT,
            unterminated(ok, E::UnterminatedQuotedIdentifier),
        ),
        RawToken::String(ok) => (K::T_STRING, unterminated(ok, E::UnterminatedString)),
        RawToken::FunctionExpr(ok) => (
            K::T_FUNCTION_EXPR,
            unterminated(ok, E::UnterminatedFunctionExpression),
        ),
        RawToken::Number => (K::T_NUMBER, None),
        RawToken::Color => (K::T_COLOR, None),
        RawToken::LParen => (K::T_LPAREN, None),
        RawToken::RParen => (K::T_RPAREN, None),
        RawToken::LBrace => (K::T_LBRACE, None),
        RawToken::RBrace => (K::T_RBRACE, None),
        RawToken::LBracket => (K::T_LBRACKET, None),
        RawToken::RBracket => (K::T_RBRACKET, None),
        RawToken::Comma => (K::T_COMMA, None),
        RawToken::Colon => (K::T_COLON, None),
        RawToken::Dot => (K::T_DOT, None),
        RawToken::LtGt => (K::T_LTGT, None),
        RawToken::Lte => (K::T_LTE, None),
        RawToken::Gte => (K::T_GTE, None),
        RawToken::Lt => (K::T_LT, None),
        RawToken::Gt => (K::T_GT, None),
        RawToken::EqEq => (K::T_EQEQ, None),
        RawToken::Neq => (K::T_NEQ, None),
        RawToken::Eq => (K::T_EQ, None),
        RawToken::Bang => (K::T_BANG, None),
        RawToken::Plus => (K::T_PLUS, None),
        RawToken::Minus => (K::T_MINUS, None),
        RawToken::Star => (K::T_STAR, None),
        RawToken::Slash => (K::T_SLASH, None),
        RawToken::Percent => (K::T_PERCENT, None),
    }
}

fn message_for(code: ParsingErrorCode, text: &str) -> String {
    match code {
        ParsingErrorCode::UnknownSymbol => format!("unknown symbol `{text}`"),
        ParsingErrorCode::UnterminatedString => "unterminated string literal".to_string(),
        ParsingErrorCode::UnterminatedQuotedIdentifier => {
            "unterminated quoted identifier".to_string()
        }
        ParsingErrorCode::UnterminatedFunctionExpression => {
            "unterminated function expression".to_string()
        }
        ParsingErrorCode::UnterminatedComment => "unterminated block comment".to_string(),
        other => format!("{other:?}"),
    }
}

/// Output of [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    /// Significant tokens, trivia attached, ending with `T_EOF`.
    pub tokens: Vec<Token>,
    pub errors: Vec<ParsingError>,
}

/// Produce every token, trivia included, without attaching trivia.
///
/// Useful for inspecting the raw lexical structure. The stream does not
/// contain the final `T_EOF` token.
#[must_use]
pub fn tokenize_flat(src: &str) -> Vec<(SyntaxKind, Span)> {
    lex_raw(src, &mut Vec::new())
        .into_iter()
        .map(|tok| (tok.kind, tok.span()))
        .collect()
}

/// Tokenize `src` and attach trivia to the surrounding significant tokens.
///
/// A token's trailing trivia runs up to and including the first newline
/// after it; all remaining trivia leads the next significant token. The
/// result always ends with a `T_EOF` token, even for empty input.
#[must_use]
pub fn tokenize(src: &str) -> Lexed {
    let mut errors = Vec::new();
    let raw = lex_raw(src, &mut errors);
    let tokens = attach_trivia(raw, src.len());
    log::debug!(
        "tokenized {} bytes into {} tokens ({} errors)",
        src.len(),
        tokens.len(),
        errors.len()
    );
    Lexed { tokens, errors }
}

fn lex_raw(src: &str, errors: &mut Vec<ParsingError>) -> Vec<Token> {
    let mut lexer = RawToken::lexer(src);
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "rough capacity estimate"
    )]
    let mut tokens = Vec::with_capacity(src.len() / 3);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let (kind, error) = match result {
            Ok(raw) => classify(raw),
            Err(()) => (SyntaxKind::T_INVALID, Some(ParsingErrorCode::UnknownSymbol)),
        };
        let mut token = Token::new(kind, text, span.start);
        if let Some(code) = error {
            token.is_invalid = true;
            errors.push(ParsingError::new(code, message_for(code, text), span));
        }
        tokens.push(token);
    }
    tokens
}

fn attach_trivia(raw: Vec<Token>, eof_offset: usize) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    let mut pending = Vec::new();
    let mut open_line = false;
    for token in raw {
        if !token.is_trivia() {
            let mut token = token;
            token.leading_trivia = std::mem::take(&mut pending);
            out.push(token);
            open_line = true;
            continue;
        }
        match out.last_mut() {
            Some(last) if open_line => {
                open_line = token.kind != SyntaxKind::T_NEWLINE;
                last.trailing_trivia.push(token);
            }
            _ => pending.push(token),
        }
    }
    let mut eof = Token::new(SyntaxKind::T_EOF, "", eof_offset);
    eof.leading_trivia = pending;
    out.push(eof);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(src: &str) -> Vec<SyntaxKind> {
        tokenize(src).tokens.iter().map(|t| t.kind).collect()
    }

    #[rstest]
    #[case("<>", SyntaxKind::T_LTGT)]
    #[case("<=", SyntaxKind::T_LTE)]
    #[case("'''a\nb'''", SyntaxKind::T_STRING)]
    #[case("''", SyntaxKind::T_STRING)]
    #[case("#fff", SyntaxKind::T_COLOR)]
    #[case("`now()`", SyntaxKind::T_FUNCTION_EXPR)]
    #[case("\"user id\"", SyntaxKind::T_QUOTED_IDENT)]
    #[case("1.5e3", SyntaxKind::T_NUMBER)]
    #[case(" \t\x0C\r", SyntaxKind::T_WHITESPACE)]
    fn single_token(#[case] src: &str, #[case] expected: SyntaxKind) {
        assert_eq!(kinds(src), vec![expected, SyntaxKind::T_EOF]);
    }

    #[test]
    fn trailing_trivia_stops_after_newline() {
        let lexed = tokenize("a // c\n  b");
        let [a, b, _eof] = lexed.tokens.as_slice() else {
            panic!("unexpected tokens: {:?}", lexed.tokens);
        };
        let trailing: Vec<_> = a.trailing_trivia.iter().map(|t| t.kind).collect();
        assert_eq!(
            trailing,
            vec![
                SyntaxKind::T_WHITESPACE,
                SyntaxKind::T_COMMENT,
                SyntaxKind::T_NEWLINE
            ]
        );
        assert_eq!(b.leading_trivia.len(), 1);
        assert_eq!(b.full_start(), 7);
    }

    #[test]
    fn unknown_character_becomes_invalid_trivia() {
        let lexed = tokenize("a $ b");
        assert_eq!(lexed.errors.len(), 1);
        let first = lexed.errors.first().map(|e| (e.code, e.span.clone()));
        assert_eq!(first, Some((ParsingErrorCode::UnknownSymbol, 2..3)));
        let invalid: Vec<_> = lexed
            .tokens
            .iter()
            .flat_map(|t| t.trailing_trivia.iter())
            .filter(|t| t.is_invalid)
            .map(|t| t.kind)
            .collect();
        assert_eq!(invalid, vec![SyntaxKind::T_INVALID]);
    }

    #[test]
    fn identifiers_are_ascii_only() {
        let lexed = tokenize("usér");
        assert!(!lexed.errors.is_empty());
        assert!(lexed.errors.iter().all(|e| e.code == ParsingErrorCode::UnknownSymbol));
        let start = lexed.errors.first().map(|e| e.span.start);
        let end = lexed.errors.last().map(|e| e.span.end);
        assert_eq!((start, end), (Some(2), Some(4)));
        let values: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::T_IDENT)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(values, vec!["us", "r"]);
    }

    #[test]
    fn unterminated_string_is_streamed_invalid() {
        let lexed = tokenize("'abc\nx");
        let codes: Vec<_> = lexed.errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ParsingErrorCode::UnterminatedString]);
        let first = lexed.tokens.first().map(|t| (t.kind, t.is_invalid, t.value.clone()));
        assert_eq!(first, Some((SyntaxKind::T_STRING, true, "'abc".to_string())));
    }

    #[test]
    fn empty_input_yields_eof() {
        let lexed = tokenize("");
        assert_eq!(lexed.tokens.len(), 1);
        assert!(lexed.errors.is_empty());
    }

    #[test]
    fn flat_stream_covers_the_source() {
        let src = "Table t {\n  id int\n}";
        let covered: usize = tokenize_flat(src).iter().map(|(_, s)| s.len()).sum();
        assert_eq!(covered, src.len());
    }
}
