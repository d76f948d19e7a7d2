//! Semantic analysis of a parsed program.
//!
//! [`analyze`] validates every element declaration against its kind's rules,
//! builds the symbol tables while doing so, then resolves the references
//! queued on the way. The tree itself is never modified: everything the
//! analysis learns is recorded in side tables keyed by [`NodeId`].

use std::collections::HashMap;

use crate::parser::ast::{NodeId, SyntaxNode};

mod binder;
pub mod errors;
mod kinds;
pub mod names;
pub mod symbol;
mod validator;

#[cfg(test)]
mod tests;

pub use errors::{CompileError, CompileErrorCode};
pub use kinds::{ElementKind, ScopeKind};
pub use names::{NameFragment, UnresolvedName};
pub use symbol::{Symbol, SymbolArena, SymbolId, SymbolKind, SymbolTable};
pub use validator::{Setting, setting_name};

/// Everything learnt about one program.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Every symbol, reachable from [`Analysis::public_schema`] unless
    /// detached by a failed registration.
    pub symbols: SymbolArena,
    pub public_schema: SymbolId,
    /// Declaration node to declared symbol: elements that register a name,
    /// and field declarations that register a column, enum member or group
    /// entry.
    pub node_symbols: HashMap<NodeId, SymbolId>,
    /// Element to enclosing element.
    pub parents: HashMap<NodeId, NodeId>,
    pub element_kinds: HashMap<NodeId, ElementKind>,
    /// Referring node to resolved symbol.
    pub references: HashMap<NodeId, SymbolId>,
    /// Valid settings per declaring node, in source order.
    pub settings: HashMap<NodeId, Vec<Setting>>,
    /// Names queued during validation; after binding, the ones that failed.
    pub unresolved: Vec<UnresolvedName>,
    /// Validation errors in walk order, then binding errors.
    pub errors: Vec<CompileError>,
}

impl Analysis {
    fn new() -> Self {
        let mut symbols = SymbolArena::default();
        let public_schema = symbols.alloc(SymbolKind::Schema, "public", None);
        Self {
            symbols,
            public_schema,
            node_symbols: HashMap::new(),
            parents: HashMap::new(),
            element_kinds: HashMap::new(),
            references: HashMap::new(),
            settings: HashMap::new(),
            unresolved: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Symbol declared by `node`.
    #[must_use]
    pub fn symbol_of(&self, node: NodeId) -> Option<SymbolId> {
        self.node_symbols.get(&node).copied()
    }

    /// Enclosing element of the element `node`.
    #[must_use]
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied()
    }

    #[must_use]
    pub fn kind_of(&self, node: NodeId) -> Option<ElementKind> {
        self.element_kinds.get(&node).copied()
    }

    #[must_use]
    pub fn settings_of(&self, node: NodeId) -> &[Setting] {
        self.settings.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` when `node` carries the setting `name` (normalised).
    #[must_use]
    pub fn has_setting(&self, node: NodeId, name: &str) -> bool {
        self.settings_of(node).iter().any(|s| s.name == name)
    }

    /// Symbol a referring node resolved to.
    #[must_use]
    pub fn reference(&self, node: NodeId) -> Option<SymbolId> {
        self.references.get(&node).copied()
    }

    /// Walk `path` down from the public schema.
    ///
    /// ```
    /// use dbml_parse::{SymbolKind, analyze, parse};
    ///
    /// let parsed = parse("Table users {\n  id int\n}");
    /// let analysis = analyze(parsed.program());
    /// let id = analysis.lookup_path(&[(SymbolKind::Table, "users"), (SymbolKind::Column, "id")]);
    /// assert!(id.is_some());
    /// ```
    #[must_use]
    pub fn lookup_path(&self, path: &[(SymbolKind, &str)]) -> Option<SymbolId> {
        path.iter().try_fold(self.public_schema, |owner, (kind, name)| {
            self.symbols.lookup(owner, *kind, name)
        })
    }

    /// Symbol owning the innermost table visible from the element `node`:
    /// the nearest enclosing element with a symbol, else the public schema.
    #[must_use]
    pub fn scope_symbol(&self, node: Option<NodeId>) -> SymbolId {
        let mut current = node;
        while let Some(id) = current {
            if let Some(symbol) = self.symbol_of(id) {
                return symbol;
            }
            current = self.parent_of(id);
        }
        self.public_schema
    }
}

/// Validate and bind `program`.
#[must_use]
pub fn analyze(program: &SyntaxNode) -> Analysis {
    let mut analysis = Analysis::new();
    validator::Validator::run(&mut analysis, program);
    let validation_errors = analysis.errors.len();
    log::debug!(
        "validated program with {validation_errors} errors, {} references queued",
        analysis.unresolved.len()
    );
    binder::bind(&mut analysis);
    log::debug!(
        "bound program with {} errors",
        analysis.errors.len().saturating_sub(validation_errors)
    );
    analysis
}
