//! `TableGroup name { users, auth.sessions }`.

use super::super::predicates as p;
use super::super::rules::{
    AliasRule, BodyRule, ContextRule, ElementRules, NameRule, NameShape, SettingsRule, Stops,
    Uniqueness,
};
use super::super::subfield::{
    ArgRule, Arity, FieldCount, FieldRegistration, FieldRule, SubfieldRule,
};
use crate::analyzer::{CompileErrorCode as E, ElementKind, ScopeKind, SymbolKind};

static GROUP_ARGS: [ArgRule; 1] = [ArgRule {
    check: p::table_reference,
    code: E::InvalidTableGroupField,
    registrar: Some(p::table_names),
}];

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::TableGroup,
    context: ContextRule {
        allowed: &[ScopeKind::TopLevel],
        code: E::InvalidTableGroupContext,
    },
    uniqueness: Uniqueness::Unconstrained,
    name: NameRule::Required {
        shape: NameShape::Simple,
        register: Some(SymbolKind::TableGroup),
    },
    alias: AliasRule::Forbidden,
    settings: SettingsRule::Forbidden,
    body: BodyRule {
        simple: false,
        complex: true,
    },
    subfield: SubfieldRule::Allowed(FieldRule {
        invalid: E::InvalidTableGroupField,
        arity: Arity::exactly(1),
        args: &GROUP_ARGS,
        settings: None,
        register: Some(FieldRegistration {
            arg: 0,
            kind: SymbolKind::TableGroupField,
            duplicate: E::DuplicateTableGroupFieldName,
        }),
        count: FieldCount::Any,
    }),
    stops: Stops::CONTEXT,
};
