//! Helpers over semantic analysis results.

use crate::parser::ast::SyntaxNode;
use crate::{Analysis, Parsed, analyze};

use super::parse_ok;

/// Parse and analyse `src`, asserting that it is free of syntax errors.
///
/// # Panics
/// Panics when parsing reports any error.
#[track_caller]
#[must_use]
pub fn analyze_ok(src: &str) -> (Parsed, Analysis) {
    let parsed = parse_ok(src);
    let analysis = analyze(parsed.program());
    (parsed, analysis)
}

/// Outermost node under `root` spanning exactly the first occurrence of
/// `text` in `src`.
///
/// # Panics
/// Panics when `text` does not occur in `src` or no node spans it.
#[track_caller]
#[must_use]
pub fn node_spanning<'a>(root: &'a SyntaxNode, src: &str, text: &str) -> &'a SyntaxNode {
    let span = span_of(src, text);
    root.descendants()
        .into_iter()
        .find(|n| n.span() == span)
        .unwrap_or_else(|| panic!("no node spans {text:?} at {span:?}"))
}

/// Byte range of the first occurrence of `text` in `src`.
///
/// # Panics
/// Panics when `text` does not occur in `src`.
#[track_caller]
#[must_use]
pub fn span_of(src: &str, text: &str) -> std::ops::Range<usize> {
    let start = src
        .find(text)
        .unwrap_or_else(|| panic!("{text:?} does not occur in the source"));
    start..start + text.len()
}
