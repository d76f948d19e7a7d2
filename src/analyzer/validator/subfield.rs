//! Subfields: the non-element statements of a body (columns, enum members,
//! indexes, relationships, notes), and the value of a simple body.
//!
//! A subfield is split into positional arguments and an optional trailing
//! setting list, then checked against the element's [`SubfieldRule`].

use super::Validator;
use super::predicates::Registrar;
use super::settings::SettingMap;
use crate::analyzer::names::qualified_text;
use crate::analyzer::{CompileError, CompileErrorCode, SymbolId, SymbolKind};
use crate::parser::ast::{NodeId, NodeShape, SyntaxNode};

#[derive(Clone, Copy)]
pub(crate) enum SubfieldRule {
    /// Only nested elements are allowed; any subfield reports the code.
    Forbidden(CompileErrorCode),
    Allowed(FieldRule),
}

#[derive(Clone, Copy)]
pub(crate) struct FieldRule {
    /// Reported when the subfield has the wrong shape or arity.
    pub invalid: CompileErrorCode,
    pub arity: Arity,
    pub args: &'static [ArgRule],
    /// Accepted trailing setting list, if any.
    pub settings: Option<&'static SettingMap>,
    pub register: Option<FieldRegistration>,
    pub count: FieldCount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    fn admits(self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

#[derive(Clone, Copy)]
pub(crate) struct ArgRule {
    pub check: fn(&SyntaxNode) -> bool,
    pub code: CompileErrorCode,
    pub registrar: Option<Registrar>,
}

/// Registers the argument at `arg` into the owning element's table.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldRegistration {
    pub arg: usize,
    pub kind: SymbolKind,
    pub duplicate: CompileErrorCode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldCount {
    Any,
    ExactlyOne,
}

// Positional terms and trailing list of a subfield.
fn split_terms(node: &SyntaxNode) -> (Vec<&SyntaxNode>, Option<&SyntaxNode>) {
    let mut terms = node.application_terms();
    let settings = match terms.last() {
        Some(last) if terms.len() > 1 && last.shape() == NodeShape::List => terms.pop(),
        _ => None,
    };
    (terms, settings)
}

/// Where a subfield sits: the node that holds its symbol and settings, the
/// element it belongs to, and that element's symbol.
pub(super) struct FieldSite {
    pub holder: NodeId,
    pub element: NodeId,
    pub element_symbol: Option<SymbolId>,
}

impl Validator<'_> {
    pub(super) fn validate_subfield(
        &mut self,
        node: &SyntaxNode,
        rule: &SubfieldRule,
        site: &FieldSite,
    ) -> bool {
        let rule = match rule {
            SubfieldRule::Forbidden(code) => {
                self.report(CompileError::at_node(*code, "unexpected field here", node));
                return false;
            }
            SubfieldRule::Allowed(rule) => rule,
        };
        let (terms, settings) = split_terms(node);
        if !rule.arity.admits(terms.len()) {
            self.report(CompileError::at_node(
                rule.invalid,
                format!(
                    "expected {} term(s), found {}",
                    rule.arity.max,
                    terms.len()
                ),
                node,
            ));
            return false;
        }

        let mut ok = true;
        for (term, arg) in terms.iter().zip(rule.args) {
            if !(arg.check)(term) {
                self.report(CompileError::at_node(arg.code, "invalid field value", term));
                ok = false;
                continue;
            }
            if let Some(registrar) = arg.registrar {
                self.queue(registrar(term), Some(site.element));
            }
        }

        if let Some(registration) = rule.register {
            let valid = terms
                .get(registration.arg)
                .filter(|term| rule.args.get(registration.arg).is_some_and(|a| (a.check)(term)));
            if let Some(term) = valid {
                self.register_field(term, registration, site);
            }
        }

        if let Some(list) = settings {
            match rule.settings {
                Some(map) => {
                    ok &= self.validate_settings(list, map, site.holder, Some(site.element));
                }
                None => {
                    self.report(CompileError::at_node(
                        CompileErrorCode::UnexpectedSettings,
                        "this field takes no settings",
                        list,
                    ));
                    ok = false;
                }
            }
        }
        ok
    }

    fn register_field(&mut self, term: &SyntaxNode, registration: FieldRegistration, site: &FieldSite) {
        let Some(owner) = site.element_symbol else {
            unreachable!("field registration configured for an element without a symbol table")
        };
        let Some(name) = qualified_text(term) else {
            return;
        };
        let symbols = &mut self.analysis.symbols;
        let symbol = symbols.alloc(registration.kind, &name, Some(site.holder));
        if symbols.insert(owner, registration.kind, &name, symbol).is_err() {
            self.report(CompileError::at_node(
                registration.duplicate,
                format!("duplicate {} `{name}`", registration.kind),
                term,
            ));
        }
        self.analysis.node_symbols.insert(site.holder, symbol);
    }
}
