//! Resolution of the names queued during validation.
//!
//! Runs after the whole file has been validated, so references may point
//! forwards. The first fragment of a name is looked up in the scope of the
//! element that spelled it, then in each enclosing element, then in the
//! `public` schema; every later fragment is looked up inside the symbol the
//! previous one resolved to.

use crate::analyzer::names::{NameFragment, UnresolvedName};
use crate::analyzer::{Analysis, CompileError, CompileErrorCode, SymbolId, SymbolKind};
use crate::parser::ast::NodeId;

pub(super) fn bind(analysis: &mut Analysis) {
    let queued = std::mem::take(&mut analysis.unresolved);
    let total = queued.len();
    let mut failed = Vec::new();
    for name in queued {
        match resolve(analysis, &name) {
            Ok(symbol) => {
                log::trace!("resolved {:?} to {symbol:?}", name.span);
                analysis.references.insert(name.referee, symbol);
            }
            Err(fragment) => {
                analysis.errors.push(CompileError {
                    code: not_found_code(fragment.kind),
                    message: format!("cannot find {} `{}`", fragment.kind, fragment.name),
                    span: name.span.clone(),
                    node: Some(name.referee),
                });
                failed.push(name);
            }
        }
    }
    log::debug!(
        "bound {} of {total} references",
        total.saturating_sub(failed.len())
    );
    analysis.unresolved = failed;
}

// On failure, returns the first fragment that could not be found.
fn resolve<'n>(analysis: &Analysis, name: &'n UnresolvedName) -> Result<SymbolId, &'n NameFragment> {
    let Some((first, rest)) = name.fragments.split_first() else {
        unreachable!("registrars never queue empty names")
    };
    let mut current = resolve_first(analysis, first, name.owner).ok_or(first)?;
    for fragment in rest {
        current = analysis
            .symbols
            .lookup(current, fragment.kind, &fragment.name)
            .ok_or(fragment)?;
    }
    Ok(current)
}

fn resolve_first(analysis: &Analysis, fragment: &NameFragment, owner: Option<NodeId>) -> Option<SymbolId> {
    if fragment.kind == SymbolKind::Schema && fragment.name == "public" {
        return Some(analysis.public_schema);
    }
    let mut scope = owner;
    while let Some(node) = scope {
        let found = analysis
            .node_symbols
            .get(&node)
            .and_then(|&symbol| analysis.symbols.lookup(symbol, fragment.kind, &fragment.name));
        if found.is_some() {
            return found;
        }
        scope = analysis.parents.get(&node).copied();
    }
    analysis
        .symbols
        .lookup(analysis.public_schema, fragment.kind, &fragment.name)
}

fn not_found_code(kind: SymbolKind) -> CompileErrorCode {
    match kind {
        SymbolKind::Schema => CompileErrorCode::SchemaNotFound,
        SymbolKind::Table | SymbolKind::TableGroup | SymbolKind::TableGroupField => {
            CompileErrorCode::TableNotFound
        }
        SymbolKind::Column => CompileErrorCode::ColumnNotFound,
        SymbolKind::Enum => CompileErrorCode::EnumNotFound,
        SymbolKind::EnumField => CompileErrorCode::EnumFieldNotFound,
    }
}
