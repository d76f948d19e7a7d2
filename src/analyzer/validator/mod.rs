//! Rule-driven validation of element declarations.
//!
//! The validator walks the tree once. For each element it looks up the
//! [`rules::ElementRules`] of the element's kind and checks, in order, the
//! context, uniqueness, name, alias, settings, body shape and subfields.
//! Along the way it registers declared names in the symbol tables and
//! queues every reference it meets for the binder.

use std::collections::HashSet;

use crate::analyzer::names::{PendingName, destructure};
use crate::analyzer::{
    Analysis, CompileError, CompileErrorCode as E, ElementKind, ScopeKind, SymbolId, SymbolKind,
};
use crate::parser::ast::{ElementDeclarationNode, NodeId, SyntaxNode, SyntaxNodeKind};
use crate::Span;

mod kinds;
mod predicates;
pub(crate) mod rules;
mod settings;
mod subfield;

pub use settings::{Setting, setting_name};

use rules::{AliasRule, ElementRules, NameRule, NameShape, RuleBook, SettingsRule, Uniqueness};
use subfield::{FieldCount, FieldSite, SubfieldRule};

/// The enclosing element of the one being validated.
#[derive(Debug, Clone, Copy)]
struct Parent {
    id: NodeId,
    kind: ElementKind,
}

pub(super) struct Validator<'a> {
    analysis: &'a mut Analysis,
    rules: &'static RuleBook,
    /// Kinds seen so far that may appear once per file.
    global_kinds: HashSet<ElementKind>,
}

impl<'a> Validator<'a> {
    /// Validate every element of `program`, recording results in `analysis`.
    pub(super) fn run(analysis: &'a mut Analysis, program: &SyntaxNode) {
        let Some(program) = program.as_program() else {
            return;
        };
        let mut validator = Self {
            analysis,
            rules: RuleBook::global(),
            global_kinds: HashSet::new(),
        };
        let mut top_level = HashSet::new();
        for element in &program.body {
            validator.validate_element(element, None, &mut top_level);
        }
    }

    fn report(&mut self, error: CompileError) {
        log::trace!("validation error {:?} at {:?}", error.code, error.span);
        self.analysis.errors.push(error);
    }

    fn queue(&mut self, names: Vec<PendingName>, owner: Option<NodeId>) {
        self.analysis
            .unresolved
            .extend(names.into_iter().map(|n| n.owned_by(owner)));
    }

    fn validate_element(
        &mut self,
        node: &SyntaxNode,
        parent: Option<Parent>,
        local_kinds: &mut HashSet<ElementKind>,
    ) -> bool {
        let Some(element) = node.as_element() else {
            return false;
        };
        let kind = ElementKind::from_keyword(&element.keyword.value);
        let rules = self.rules.get(kind);
        self.analysis.element_kinds.insert(node.id, kind);
        if let Some(parent) = parent {
            self.analysis.parents.insert(node.id, parent.id);
        }

        let mut ok = self.check_context(element, kind, rules, parent);
        if !ok && rules.stops.context {
            return false;
        }

        if !self.check_uniqueness(element, kind, rules, local_kinds) {
            ok = false;
            if rules.stops.uniqueness {
                return false;
            }
        }

        let (name_ok, symbol) = self.validate_name(node, element, rules);
        if let Some(symbol) = symbol {
            self.analysis.node_symbols.insert(node.id, symbol);
        }
        if !name_ok {
            ok = false;
            if rules.stops.name {
                return false;
            }
        }

        if !self.validate_alias(element, rules, symbol) {
            ok = false;
            if rules.stops.alias {
                return false;
            }
        }

        let settings_ok = match (rules.settings, element.attribute_list.as_deref()) {
            (_, None) => true,
            (SettingsRule::Forbidden, Some(list)) => {
                self.report(CompileError::at_node(
                    E::UnexpectedSettings,
                    format!("{} takes no settings", kind.describe()),
                    list,
                ));
                false
            }
            (SettingsRule::Allowed(map), Some(list)) => {
                self.validate_settings(list, map, node.id, Some(node.id))
            }
        };
        if !settings_ok {
            ok = false;
            if rules.stops.settings {
                return false;
            }
        }

        // A missing body has already been reported by the parser.
        let Some(body) = element.body.as_deref() else {
            return ok;
        };
        if !self.check_body_shape(body, kind, rules) {
            return false;
        }

        let site = Parent { id: node.id, kind };
        ok &= match body.as_block() {
            Some(block) => self.validate_block(&block.body, element, rules, site, symbol),
            None => self.validate_subfield(
                body,
                &rules.subfield,
                &FieldSite {
                    holder: body.id,
                    element: node.id,
                    element_symbol: symbol,
                },
            ),
        };
        ok
    }

    fn check_context(
        &mut self,
        element: &ElementDeclarationNode,
        kind: ElementKind,
        rules: &ElementRules,
        parent: Option<Parent>,
    ) -> bool {
        let scope = parent.map_or(ScopeKind::TopLevel, |p| ScopeKind::from(p.kind));
        if rules.context.allowed.contains(&scope) {
            return true;
        }
        let place = parent.map_or_else(
            || "at the top level".to_string(),
            |p| format!("inside {}", p.kind.describe()),
        );
        let message = if kind == ElementKind::Custom {
            format!("unknown element `{}` {place}", element.keyword.value)
        } else {
            format!("{} is not allowed {place}", kind.describe())
        };
        self.report(CompileError::at_token(rules.context.code, message, &element.keyword));
        false
    }

    fn check_uniqueness(
        &mut self,
        element: &ElementDeclarationNode,
        kind: ElementKind,
        rules: &ElementRules,
        local_kinds: &mut HashSet<ElementKind>,
    ) -> bool {
        let (first, code, place) = match rules.uniqueness {
            Uniqueness::Unconstrained => return true,
            Uniqueness::Global(code) => (self.global_kinds.insert(kind), code, "per file"),
            Uniqueness::Local(code) => (local_kinds.insert(kind), code, "per block"),
        };
        if !first {
            self.report(CompileError::at_token(
                code,
                format!("only one {} is allowed {place}", kind.describe()),
                &element.keyword,
            ));
        }
        first
    }

    // Checks the name against the rule and registers it when asked to.
    // Registering kinds always get a symbol so that their members can be
    // validated, even when the name is missing, invalid or taken.
    fn validate_name(
        &mut self,
        node: &SyntaxNode,
        element: &ElementDeclarationNode,
        rules: &ElementRules,
    ) -> (bool, Option<SymbolId>) {
        let name = element.name.as_deref();
        match rules.name {
            NameRule::Forbidden => {
                let Some(name) = name else {
                    return (true, None);
                };
                self.report(CompileError::at_node(
                    E::UnexpectedName,
                    format!("{} cannot have a name", rules.kind.describe()),
                    name,
                ));
                (false, None)
            }
            NameRule::Optional(shape) => {
                let ok = name.is_none_or(|n| self.name_parts(n, shape).is_some());
                (ok, None)
            }
            NameRule::Required { shape, register } => {
                let parts = match name {
                    Some(n) => self.name_parts(n, shape),
                    None => {
                        self.report(CompileError::at_token(
                            E::NameNotFound,
                            format!("{} must have a name", rules.kind.describe()),
                            &element.keyword,
                        ));
                        None
                    }
                };
                let ok = parts.is_some();
                let symbol = register.map(|kind| match (parts, name) {
                    (Some(parts), Some(name)) => self.register_name(node, name, kind, parts),
                    _ => self.analysis.symbols.alloc(kind, "", Some(node.id)),
                });
                (ok, symbol)
            }
        }
    }

    fn name_parts(&mut self, name: &SyntaxNode, shape: NameShape) -> Option<Vec<(String, Span)>> {
        let Some(parts) = destructure(name) else {
            self.report(CompileError::at_node(
                E::InvalidName,
                "a name must be an identifier or a dotted chain of identifiers",
                name,
            ));
            return None;
        };
        if shape == NameShape::Simple && parts.len() > 1 {
            self.report(CompileError::at_node(
                E::UnexpectedComplexName,
                "this name cannot be qualified",
                name,
            ));
            return None;
        }
        Some(parts)
    }

    // Leading segments name schemas, created on demand under `public`.
    fn register_name(
        &mut self,
        node: &SyntaxNode,
        name_node: &SyntaxNode,
        kind: SymbolKind,
        mut parts: Vec<(String, Span)>,
    ) -> SymbolId {
        let symbols = &mut self.analysis.symbols;
        let Some((name, _)) = parts.pop() else {
            return symbols.alloc(kind, "", Some(node.id));
        };
        let mut owner = self.analysis.public_schema;
        for (index, (schema, _)) in parts.iter().enumerate() {
            if index == 0 && schema == "public" {
                continue;
            }
            owner = symbols.schema(owner, schema);
        }
        let symbol = symbols.alloc(kind, &name, Some(node.id));
        if symbols.insert(owner, kind, &name, symbol).is_err() {
            self.report(CompileError::at_node(
                E::DuplicateName,
                format!("{kind} `{name}` is already defined"),
                name_node,
            ));
        }
        symbol
    }

    fn validate_alias(
        &mut self,
        element: &ElementDeclarationNode,
        rules: &ElementRules,
        symbol: Option<SymbolId>,
    ) -> bool {
        let Some(alias) = element.alias.as_deref() else {
            return true;
        };
        let AliasRule::Optional { register } = rules.alias else {
            self.report(CompileError::at_node(
                E::UnexpectedAlias,
                format!("{} cannot have an alias", rules.kind.describe()),
                alias,
            ));
            return false;
        };
        let Some(token) = alias.variable_token() else {
            self.report(CompileError::at_node(
                E::InvalidAlias,
                "an alias must be a simple identifier",
                alias,
            ));
            return false;
        };
        let (Some(kind), Some(symbol)) = (register, symbol) else {
            return true;
        };
        let name = token.literal_text();
        let public = self.analysis.public_schema;
        if self.analysis.symbols.insert(public, kind, &name, symbol).is_err() {
            self.report(CompileError::at_node(
                E::DuplicateName,
                format!("{kind} `{name}` is already defined"),
                alias,
            ));
            return false;
        }
        true
    }

    fn check_body_shape(&mut self, body: &SyntaxNode, kind: ElementKind, rules: &ElementRules) -> bool {
        let complex = body.as_block().is_some();
        let (allowed, code, shape) = if complex {
            (rules.body.complex, E::UnexpectedComplexBody, "a block body")
        } else {
            (rules.body.simple, E::UnexpectedSimpleBody, "a `:` body")
        };
        if !allowed {
            self.report(CompileError::at_node(
                code,
                format!("{} cannot have {shape}", kind.describe()),
                body,
            ));
        }
        allowed
    }

    fn validate_block(
        &mut self,
        statements: &[SyntaxNode],
        element: &ElementDeclarationNode,
        rules: &ElementRules,
        site: Parent,
        symbol: Option<SymbolId>,
    ) -> bool {
        let exactly_one = matches!(
            rules.subfield,
            SubfieldRule::Allowed(field) if field.count == FieldCount::ExactlyOne
        );
        let mut ok = true;
        let mut local_kinds = HashSet::new();
        let mut fields = 0_usize;
        for statement in statements {
            match &statement.kind {
                SyntaxNodeKind::ElementDeclaration(_) => {
                    ok &= self.validate_element(statement, Some(site), &mut local_kinds);
                }
                SyntaxNodeKind::FieldDeclaration(field) => {
                    fields += 1;
                    if exactly_one && fields > 1 {
                        self.report(CompileError::at_node(
                            invalid_code(&rules.subfield),
                            format!("{} takes a single value", rules.kind.describe()),
                            statement,
                        ));
                        ok = false;
                        continue;
                    }
                    let field_site = FieldSite {
                        holder: statement.id,
                        element: site.id,
                        element_symbol: symbol,
                    };
                    ok &= self.validate_subfield(&field.value, &rules.subfield, &field_site);
                }
                _ => {}
            }
        }
        if exactly_one && fields == 0 {
            self.report(CompileError::at_token(
                invalid_code(&rules.subfield),
                format!("{} needs a value", rules.kind.describe()),
                &element.keyword,
            ));
            ok = false;
        }
        ok
    }
}

fn invalid_code(rule: &SubfieldRule) -> E {
    match rule {
        SubfieldRule::Forbidden(code) => *code,
        SubfieldRule::Allowed(field) => field.invalid,
    }
}
