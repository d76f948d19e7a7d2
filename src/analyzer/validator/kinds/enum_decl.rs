//! `Enum schema.name { member [note: '...'] }`.

use phf::phf_map;

use super::super::predicates as p;
use super::super::rules::{
    AliasRule, BodyRule, ContextRule, ElementRules, NameRule, NameShape, SettingsRule, Stops,
    Uniqueness,
};
use super::super::settings::{SettingMap, SettingRule};
use super::super::subfield::{
    ArgRule, Arity, FieldCount, FieldRegistration, FieldRule, SubfieldRule,
};
use crate::analyzer::{CompileErrorCode as E, ElementKind, ScopeKind, SymbolKind};

static MEMBER_SETTINGS: SettingMap = phf_map! {
    "note" => SettingRule::new(p::string_value),
};

static MEMBER_ARGS: [ArgRule; 1] = [ArgRule {
    check: p::simple_name,
    code: E::InvalidEnumField,
    registrar: None,
}];

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::Enum,
    context: ContextRule {
        allowed: &[ScopeKind::TopLevel, ScopeKind::Project],
        code: E::InvalidEnumContext,
    },
    uniqueness: Uniqueness::Unconstrained,
    name: NameRule::Required {
        shape: NameShape::Qualified,
        register: Some(SymbolKind::Enum),
    },
    alias: AliasRule::Forbidden,
    settings: SettingsRule::Forbidden,
    body: BodyRule {
        simple: false,
        complex: true,
    },
    subfield: SubfieldRule::Allowed(FieldRule {
        invalid: E::InvalidEnumField,
        arity: Arity::exactly(1),
        args: &MEMBER_ARGS,
        settings: Some(&MEMBER_SETTINGS),
        register: Some(FieldRegistration {
            arg: 0,
            kind: SymbolKind::EnumField,
            duplicate: E::DuplicateEnumFieldName,
        }),
        count: FieldCount::Any,
    }),
    stops: Stops::CONTEXT,
};
