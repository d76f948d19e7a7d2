//! The durable shape shared by every diagnostic the crate reports.
//!
//! Syntax errors ([`crate::parser::ParsingError`]) and semantic errors
//! ([`crate::analyzer::CompileError`]) are separate types, but downstream
//! tooling only relies on the triple exposed here: a numeric code that is
//! never renumbered, a human message, and a half-open byte span.

use crate::Span;

pub trait Diagnostic {
    /// Stable numeric code.
    fn code(&self) -> u16;

    fn message(&self) -> &str;

    /// Half-open byte range into the original source.
    fn span(&self) -> Span;
}

/// Sort diagnostics by start offset, keeping the original order for ties.
pub fn sort_by_position<D: Diagnostic>(diagnostics: &mut [D]) {
    diagnostics.sort_by_key(|d| d.span().start);
}
