//! Tests for parser components and integration scenarios.

mod elements;
mod recovery;
mod round_trip;

use crate::parser::{Parsed, ParsingErrorCode, parse};

/// Codes of every diagnostic in a parse, in order.
pub(super) fn codes(parsed: &Parsed) -> Vec<ParsingErrorCode> {
    parsed.errors().iter().map(|e| e.code).collect()
}

/// S-expression of the whole program.
pub(super) fn program_sexpr(src: &str) -> String {
    parse(src).program().to_sexpr()
}
