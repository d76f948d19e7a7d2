//! Assertion helpers for diagnostics and tree invariants.

use crate::Diagnostic;
use crate::parser::ast::SyntaxNode;

/// Assert that no diagnostics were produced.
///
/// # Examples
///
/// ```
/// use dbml_parse::{parse, test_util::assert_no_errors};
/// assert_no_errors(parse("Table t { id int }").errors());
/// ```
///
/// # Panics
/// Panics if `errors` is not empty.
#[track_caller]
pub fn assert_no_errors<E: std::fmt::Debug>(errors: &[E]) {
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

/// Assert that the diagnostics carry exactly `expected` codes, in order.
///
/// # Panics
/// Panics when the codes differ.
#[track_caller]
pub fn assert_codes<D: Diagnostic + std::fmt::Debug>(diagnostics: &[D], expected: &[u16]) {
    let codes: Vec<u16> = diagnostics.iter().map(Diagnostic::code).collect();
    assert_eq!(codes, expected, "diagnostics: {diagnostics:?}");
}

/// Assert a single diagnostic with `code` covering `start..end`.
///
/// # Panics
/// Panics when there is not exactly one diagnostic, or when its code or span
/// differs.
#[track_caller]
pub fn assert_single_error<D: Diagnostic + std::fmt::Debug>(
    diagnostics: &[D],
    code: u16,
    start: usize,
    end: usize,
) {
    let [only] = diagnostics else {
        panic!("expected one diagnostic, got {diagnostics:?}");
    };
    assert_eq!(only.code(), code, "diagnostic: {only:?}");
    assert_eq!(only.span(), start..end, "diagnostic: {only:?}");
}

/// Assert the span invariants of every node under `root`: the tight span
/// lies within the full span, children follow each other in source order,
/// and the outermost members delimit the parent's spans exactly.
///
/// # Panics
/// Panics on the first node violating an invariant.
#[track_caller]
pub fn assert_span_invariants(root: &SyntaxNode) {
    for node in root.descendants() {
        assert!(
            node.full_start <= node.start && node.start <= node.end && node.end <= node.full_end,
            "span order violated by {:?} node {}",
            node.shape(),
            node.to_sexpr()
        );
        let members = node.members();
        if let (Some(first), Some(last)) = (members.first(), members.last()) {
            assert_eq!(node.start, first.start(), "start of {}", node.to_sexpr());
            assert_eq!(node.end, last.end(), "end of {}", node.to_sexpr());
            assert_eq!(node.full_start, first.full_start(), "full start of {}", node.to_sexpr());
            assert_eq!(node.full_end, last.full_end(), "full end of {}", node.to_sexpr());
        }
        for pair in members.windows(2) {
            if let [a, b] = pair {
                assert!(
                    a.full_end() <= b.full_start(),
                    "overlapping members in {}",
                    node.to_sexpr()
                );
            }
        }
    }
}
