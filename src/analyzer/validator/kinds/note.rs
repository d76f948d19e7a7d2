//! `Note: 'text'` or `Note { 'text' }`.

use super::super::predicates as p;
use super::super::rules::{
    AliasRule, BodyRule, ContextRule, ElementRules, NameRule, NameShape, SettingsRule, Stops,
    Uniqueness,
};
use super::super::subfield::{ArgRule, Arity, FieldCount, FieldRule, SubfieldRule};
use crate::analyzer::{CompileErrorCode as E, ElementKind, ScopeKind};

static NOTE_ARGS: [ArgRule; 1] = [ArgRule {
    check: p::string_arg,
    code: E::InvalidNote,
    registrar: None,
}];

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::Note,
    context: ContextRule {
        allowed: &[
            ScopeKind::TopLevel,
            ScopeKind::Table,
            ScopeKind::TableGroup,
            ScopeKind::Project,
        ],
        code: E::InvalidNoteContext,
    },
    uniqueness: Uniqueness::Unconstrained,
    name: NameRule::Optional(NameShape::Simple),
    alias: AliasRule::Forbidden,
    settings: SettingsRule::Forbidden,
    body: BodyRule {
        simple: true,
        complex: true,
    },
    subfield: SubfieldRule::Allowed(FieldRule {
        invalid: E::InvalidNote,
        arity: Arity::exactly(1),
        args: &NOTE_ARGS,
        settings: None,
        register: None,
        count: FieldCount::ExactlyOne,
    }),
    stops: Stops::CONTEXT,
};
