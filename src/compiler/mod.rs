//! Memoized queries over one source text.
//!
//! [`Compiler`] owns the source and computes, on demand, its tokens, its
//! parse, its analysis, and per-offset answers for editor tooling: the
//! enclosing nodes, the scope, and the surrounding context. Every query is
//! a pure function of the source and its argument, so results are cached
//! until the next [`Compiler::set_source`], which drops them all.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{Analysis, Lexed, Parsed, analyze, tokenize};

mod container;
mod context;
mod scope;

#[cfg(test)]
mod tests;

pub use container::{ContainerFrame, ContainerStack, TerminalToken, TokenRole};
pub use context::{ContextInfo, ElementContext, ElementSlot, SettingContext, SubfieldContext};
pub use scope::ScopeInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum QueryKey {
    Tokens,
    Parse,
    Analysis,
    Containers(usize),
    Scope(usize),
    Context(usize),
}

#[derive(Debug, Clone)]
enum QueryValue {
    Tokens(Rc<Lexed>),
    Parse(Rc<Parsed>),
    Analysis(Rc<Analysis>),
    Containers(Rc<ContainerStack>),
    Scope(Rc<ScopeInfo>),
    Context(Rc<ContextInfo>),
}

type QueryCache = RefCell<HashMap<QueryKey, QueryValue>>;

/// Query engine over a single compilation unit.
///
/// ```
/// use dbml_parse::{Compiler, ScopeKind};
///
/// let compiler = Compiler::new("Table users {\n  id int\n}");
/// assert!(compiler.analysis().errors().is_empty());
/// assert_eq!(compiler.scope(16).kind, ScopeKind::Table);
/// ```
#[derive(Debug, Default)]
pub struct Compiler {
    source: String,
    cache: QueryCache,
}

macro_rules! memoized {
    ($self:ident, $key:expr, $variant:ident, $compute:expr) => {{
        let key = $key;
        let hit = match $self.cache.borrow().get(&key) {
            Some(QueryValue::$variant(value)) => Some(Rc::clone(value)),
            _ => None,
        };
        hit.map_or_else(
            || {
                log::trace!("query {key:?}: computing");
                let value = Rc::new($compute);
                $self
                    .cache
                    .borrow_mut()
                    .insert(key, QueryValue::$variant(Rc::clone(&value)));
                value
            },
            |value| {
                log::trace!("query {key:?}: cached");
                value
            },
        )
    }};
}

impl Compiler {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            cache: RefCell::default(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace the source, invalidating every cached result.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        let dropped = self.cache.get_mut().len();
        self.cache.get_mut().clear();
        log::debug!("source replaced; {dropped} cached queries dropped");
    }

    /// Number of results currently cached.
    #[must_use]
    pub fn cached_queries(&self) -> usize {
        self.cache.borrow().len()
    }

    #[must_use]
    pub fn tokens(&self) -> Rc<Lexed> {
        memoized!(self, QueryKey::Tokens, Tokens, tokenize(&self.source))
    }

    #[must_use]
    pub fn parse(&self) -> Rc<Parsed> {
        memoized!(
            self,
            QueryKey::Parse,
            Parse,
            Parsed::from_lexed(Lexed::clone(&self.tokens()))
        )
    }

    #[must_use]
    pub fn analysis(&self) -> Rc<Analysis> {
        memoized!(
            self,
            QueryKey::Analysis,
            Analysis,
            analyze(self.parse().program())
        )
    }

    /// Nodes enclosing `offset`, outermost first, and the token there.
    #[must_use]
    pub fn container_stack(&self, offset: usize) -> Rc<ContainerStack> {
        memoized!(self, QueryKey::Containers(offset), Containers, {
            let parsed = self.parse();
            container::locate(parsed.program(), offset).to_stack()
        })
    }

    /// Innermost scope enclosing `offset`.
    #[must_use]
    pub fn scope(&self, offset: usize) -> Rc<ScopeInfo> {
        memoized!(self, QueryKey::Scope(offset), Scope, {
            scope::scope_of(&self.container_stack(offset), &self.analysis())
        })
    }

    /// Element, slot, subfield and setting surrounding `offset`.
    #[must_use]
    pub fn context(&self, offset: usize) -> Rc<ContextInfo> {
        memoized!(self, QueryKey::Context(offset), Context, {
            let parsed = self.parse();
            let located = container::locate(parsed.program(), offset);
            context::context_of(&located, *self.scope(offset))
        })
    }
}
