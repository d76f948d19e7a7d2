//! Qualified names: destructuring dotted expressions and the queue of
//! references waiting for the resolution pass.

use crate::analyzer::SymbolKind;
use crate::parser::ast::{NodeId, SyntaxNode, SyntaxNodeKind};
use crate::{Span, SyntaxKind};

/// One segment of a qualified name, tagged with the kind it must resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFragment {
    pub kind: SymbolKind,
    pub name: String,
    pub span: Span,
}

/// A reference recorded during validation and resolved once the whole file
/// has been walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedName {
    /// Outermost first, e.g. `[Table users, Column id]`.
    pub fragments: Vec<NameFragment>,
    /// Element whose scope the lookup starts from; `None` at the top level.
    pub owner: Option<NodeId>,
    /// Node that spells the reference.
    pub referee: NodeId,
    pub span: Span,
}

/// A reference found by a registrar, before the validator attaches its
/// owning element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingName {
    pub fragments: Vec<NameFragment>,
    pub referee: NodeId,
    pub span: Span,
}

impl PendingName {
    #[must_use]
    pub fn owned_by(self, owner: Option<NodeId>) -> UnresolvedName {
        UnresolvedName {
            fragments: self.fragments,
            owner,
            referee: self.referee,
            span: self.span,
        }
    }
}

/// Split a name expression (`a`, `"b c"`, `a.b.c`) into its segments.
///
/// Returns `None` for anything that is not a chain of identifiers.
#[must_use]
pub fn destructure(node: &SyntaxNode) -> Option<Vec<(String, Span)>> {
    match &node.kind {
        SyntaxNodeKind::Access(access) => {
            let mut parts = destructure(&access.container)?;
            let member = access.member.variable_token()?;
            parts.push((member.literal_text(), member.span()));
            Some(parts)
        }
        _ => {
            let token = node.variable_token()?;
            Some(vec![(token.literal_text(), token.span())])
        }
    }
}

/// Dotted text of a name expression.
#[must_use]
pub fn qualified_text(node: &SyntaxNode) -> Option<String> {
    let parts = destructure(node)?;
    Some(
        parts
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join("."),
    )
}

/// Tag `parts` with kinds: the last segments take `tail` (aligned to the
/// end), any segments before them are schemas.
#[must_use]
pub fn qualify(parts: Vec<(String, Span)>, tail: &[SymbolKind]) -> Vec<NameFragment> {
    let schemas = parts.len().saturating_sub(tail.len());
    let skip = tail.len().saturating_sub(parts.len());
    let kinds = std::iter::repeat_n(SymbolKind::Schema, schemas).chain(tail.iter().copied().skip(skip));
    parts
        .into_iter()
        .zip(kinds)
        .map(|((name, span), kind)| NameFragment { kind, name, span })
        .collect()
}

/// Returns `true` for a bare identifier or quoted identifier.
#[must_use]
pub fn is_simple_name(node: &SyntaxNode) -> bool {
    node.variable_token().is_some()
}

/// Returns `true` for a bare identifier spelled `word`, ignoring case.
#[must_use]
pub fn is_word(node: &SyntaxNode, word: &str) -> bool {
    node.variable_token()
        .is_some_and(|t| t.kind == SyntaxKind::T_IDENT && t.value.eq_ignore_ascii_case(word))
}
