//! Lexing whole sources through the public API.

mod test_util;

use dbml_parse::{SyntaxKind, tokenize, tokenize_flat};
use rstest::rstest;
use test_util::BLOG;

#[test]
fn attached_trivia_is_lossless() {
    let lexed = tokenize(BLOG);
    assert!(lexed.errors.is_empty(), "{:?}", lexed.errors);
    let rebuilt: String = lexed
        .tokens
        .iter()
        .flat_map(|t| {
            t.leading_trivia
                .iter()
                .chain(std::iter::once(t))
                .chain(t.trailing_trivia.iter())
        })
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(rebuilt, BLOG);
    assert_eq!(lexed.tokens.last().map(|t| t.kind), Some(SyntaxKind::T_EOF));
}

#[test]
fn flat_spans_tile_the_source() {
    let tokens = tokenize_flat(BLOG);
    let mut expected_start = 0;
    for (_, span) in &tokens {
        assert_eq!(span.start, expected_start);
        expected_start = span.end;
    }
    assert_eq!(expected_start, BLOG.len());
}

#[rstest]
#[case("", vec![SyntaxKind::T_EOF])]
#[case("Ref: a.b > c.d", vec![
    SyntaxKind::T_IDENT,
    SyntaxKind::T_COLON,
    SyntaxKind::T_IDENT,
    SyntaxKind::T_DOT,
    SyntaxKind::T_IDENT,
    SyntaxKind::T_GT,
    SyntaxKind::T_IDENT,
    SyntaxKind::T_DOT,
    SyntaxKind::T_IDENT,
    SyntaxKind::T_EOF,
])]
#[case("x // only a comment", vec![SyntaxKind::T_IDENT, SyntaxKind::T_EOF])]
fn significant_kinds(#[case] src: &str, #[case] expected: Vec<SyntaxKind>) {
    let kinds: Vec<_> = tokenize(src).tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, expected);
}
