//! Free-form `key: 'value'` entries inside a project.

use super::super::predicates as p;
use super::super::rules::{
    AliasRule, BodyRule, ContextRule, ElementRules, NameRule, SettingsRule, Stops, Uniqueness,
};
use super::super::subfield::{ArgRule, Arity, FieldCount, FieldRule, SubfieldRule};
use crate::analyzer::{CompileErrorCode as E, ElementKind, ScopeKind};

static VALUE_ARGS: [ArgRule; 1] = [ArgRule {
    check: p::string_arg,
    code: E::InvalidCustomValue,
    registrar: None,
}];

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::Custom,
    context: ContextRule {
        allowed: &[ScopeKind::Project],
        code: E::UnknownElement,
    },
    uniqueness: Uniqueness::Unconstrained,
    name: NameRule::Forbidden,
    alias: AliasRule::Forbidden,
    settings: SettingsRule::Forbidden,
    body: BodyRule {
        simple: true,
        complex: false,
    },
    subfield: SubfieldRule::Allowed(FieldRule {
        invalid: E::InvalidCustomValue,
        arity: Arity::exactly(1),
        args: &VALUE_ARGS,
        settings: None,
        register: None,
        count: FieldCount::ExactlyOne,
    }),
    stops: Stops::CONTEXT,
};
