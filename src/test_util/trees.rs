//! Builders and walkers over parsed trees.

use crate::parser::ast::SyntaxNode;
use crate::{Parsed, Token, parse};

/// Parse `src`, asserting that it is free of syntax errors.
///
/// # Panics
/// Panics when parsing reports any error.
#[track_caller]
#[must_use]
pub fn parse_ok(src: &str) -> Parsed {
    let parsed = parse(src);
    assert!(
        parsed.errors().is_empty(),
        "unexpected syntax errors for {src:?}: {:?}",
        parsed.errors()
    );
    parsed
}

/// First top-level element of a parse.
///
/// # Panics
/// Panics when the program is empty.
#[track_caller]
#[must_use]
pub fn first_element(parsed: &Parsed) -> &SyntaxNode {
    parsed
        .elements()
        .first()
        .unwrap_or_else(|| panic!("program has no elements"))
}

/// Every token reachable from `root`, trivia included, in source order.
#[must_use]
pub fn collect_tokens(root: &SyntaxNode) -> Vec<&Token> {
    let mut out = Vec::new();
    for token in root.tokens() {
        out.extend(token.leading_trivia.iter());
        out.push(token);
        out.extend(token.trailing_trivia.iter());
    }
    out
}

/// Rebuild the source text from the tree's tokens.
#[must_use]
pub fn reconstruct_source(root: &SyntaxNode) -> String {
    collect_tokens(root)
        .into_iter()
        .map(|t| t.value.as_str())
        .collect()
}
