//! The scope enclosing an offset.

use super::container::ContainerStack;
use crate::analyzer::{Analysis, ScopeKind, SymbolId};
use crate::parser::ast::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeInfo {
    pub kind: ScopeKind,
    /// Innermost enclosing element; `None` at the top level.
    pub element: Option<NodeId>,
    /// Owner of the innermost visible symbol table: the nearest enclosing
    /// element with a symbol, else the public schema.
    pub symbol: SymbolId,
}

pub(super) fn scope_of(stack: &ContainerStack, analysis: &Analysis) -> ScopeInfo {
    let Some(frame) = stack.innermost_element() else {
        return ScopeInfo {
            kind: ScopeKind::TopLevel,
            element: None,
            symbol: analysis.public_schema,
        };
    };
    ScopeInfo {
        kind: frame.element.map_or(ScopeKind::TopLevel, ScopeKind::from),
        element: Some(frame.id),
        symbol: analysis.scope_symbol(Some(frame.id)),
    }
}
