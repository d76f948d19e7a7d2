//! Symbols and the nested tables that hold them.
//!
//! Symbols live in a [`SymbolArena`] and are addressed by [`SymbolId`].
//! Schemas, tables, enums and table groups own a [`SymbolTable`] mapping
//! kind-qualified indexes (`"table:users"`, `"column:id"`) to member symbols,
//! so a column and a table may share a name inside one scope.

use indexmap::IndexMap;

use crate::parser::ast::NodeId;

/// Handle to a symbol in a [`SymbolArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Schema,
    Table,
    Enum,
    EnumField,
    Column,
    TableGroup,
    TableGroupField,
}

impl SymbolKind {
    const fn tag(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Table => "table",
            Self::Enum => "enum",
            Self::EnumField => "enum field",
            Self::Column => "column",
            Self::TableGroup => "tablegroup",
            Self::TableGroupField => "tablegroup field",
        }
    }

    /// Returns `true` for kinds whose symbols own a nested table.
    #[must_use]
    pub const fn owns_table(self) -> bool {
        matches!(
            self,
            Self::Schema | Self::Table | Self::Enum | Self::TableGroup
        )
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Key of a symbol inside its parent table.
#[must_use]
pub fn symbol_index(kind: SymbolKind, name: &str) -> String {
    format!("{}:{name}", kind.tag())
}

/// Members of a scope, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, SymbolId>,
}

impl SymbolTable {
    #[must_use]
    pub fn get(&self, kind: SymbolKind, name: &str) -> Option<SymbolId> {
        self.entries.get(&symbol_index(kind, name)).copied()
    }

    #[must_use]
    pub fn contains(&self, kind: SymbolKind, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(index, symbol)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Declaring node: an element for schemas' members, a field declaration
    /// for columns and enum members. Implicit schemas have none.
    pub declaration: Option<NodeId>,
    /// Present for kinds that own a table.
    pub table: Option<SymbolTable>,
}

/// Owner of every symbol produced by one analysis.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    /// Allocate a symbol that is not yet a member of any table.
    pub fn alloc(&mut self, kind: SymbolKind, name: &str, declaration: Option<NodeId>) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol {
            kind,
            name: name.to_string(),
            declaration,
            table: kind.owns_table().then(SymbolTable::default),
        });
        log::trace!("allocated {kind} symbol `{name}` as {id:?}");
        id
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    /// The table owned by `owner`, if it owns one.
    #[must_use]
    pub fn table(&self, owner: SymbolId) -> Option<&SymbolTable> {
        self.get(owner).and_then(|s| s.table.as_ref())
    }

    /// Look up `kind:name` inside `owner`'s table.
    #[must_use]
    pub fn lookup(&self, owner: SymbolId, kind: SymbolKind, name: &str) -> Option<SymbolId> {
        self.table(owner).and_then(|t| t.get(kind, name))
    }

    /// Insert `member` under `kind:name` in `owner`'s table.
    ///
    /// # Errors
    /// Returns the symbol already registered under that index; the table is
    /// left unchanged. Returns `Ok(())` without inserting when `owner` has no
    /// table.
    pub fn insert(
        &mut self,
        owner: SymbolId,
        kind: SymbolKind,
        name: &str,
        member: SymbolId,
    ) -> Result<(), SymbolId> {
        let Some(table) = self.symbols.get_mut(owner.0).and_then(|s| s.table.as_mut()) else {
            log::warn!("symbol {owner:?} owns no table; `{name}` not registered");
            return Ok(());
        };
        let index = symbol_index(kind, name);
        if let Some(existing) = table.entries.get(&index) {
            return Err(*existing);
        }
        table.entries.insert(index, member);
        Ok(())
    }

    /// Find or create the schema `name` inside `owner`.
    pub fn schema(&mut self, owner: SymbolId, name: &str) -> SymbolId {
        if let Some(existing) = self.lookup(owner, SymbolKind::Schema, name) {
            return existing;
        }
        let schema = self.alloc(SymbolKind::Schema, name, None);
        // The lookup above guarantees the index is free.
        let _ = self.insert(owner, SymbolKind::Schema, name, schema);
        schema
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_different_kinds_coexist() {
        let mut arena = SymbolArena::default();
        let root = arena.alloc(SymbolKind::Schema, "public", None);
        let table = arena.alloc(SymbolKind::Table, "status", None);
        let enumeration = arena.alloc(SymbolKind::Enum, "status", None);
        assert_eq!(arena.insert(root, SymbolKind::Table, "status", table), Ok(()));
        assert_eq!(arena.insert(root, SymbolKind::Enum, "status", enumeration), Ok(()));
        assert_eq!(arena.lookup(root, SymbolKind::Table, "status"), Some(table));
        assert_eq!(arena.lookup(root, SymbolKind::Enum, "status"), Some(enumeration));
    }

    #[test]
    fn duplicate_insert_keeps_the_original() {
        let mut arena = SymbolArena::default();
        let root = arena.alloc(SymbolKind::Schema, "public", None);
        let first = arena.alloc(SymbolKind::Table, "users", None);
        let second = arena.alloc(SymbolKind::Table, "users", None);
        assert_eq!(arena.insert(root, SymbolKind::Table, "users", first), Ok(()));
        assert_eq!(arena.insert(root, SymbolKind::Table, "users", second), Err(first));
        assert_eq!(arena.lookup(root, SymbolKind::Table, "users"), Some(first));
    }

    #[test]
    fn schemas_are_created_once() {
        let mut arena = SymbolArena::default();
        let root = arena.alloc(SymbolKind::Schema, "public", None);
        let a = arena.schema(root, "auth");
        let b = arena.schema(root, "auth");
        assert_eq!(a, b);
        assert_eq!(arena.table(root).map(SymbolTable::len), Some(1));
    }

    #[test]
    fn columns_own_no_table() {
        let mut arena = SymbolArena::default();
        let column = arena.alloc(SymbolKind::Column, "id", None);
        assert!(arena.table(column).is_none());
    }
}
