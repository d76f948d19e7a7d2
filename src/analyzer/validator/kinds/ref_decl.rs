//! `Ref name: a.b > c.d [delete: cascade]`, or the same inside braces.

use phf::phf_map;

use super::super::predicates as p;
use super::super::rules::{
    AliasRule, BodyRule, ContextRule, ElementRules, NameRule, NameShape, SettingsRule, Stops,
    Uniqueness,
};
use super::super::settings::{SettingMap, SettingRule};
use super::super::subfield::{ArgRule, Arity, FieldCount, FieldRule, SubfieldRule};
use crate::analyzer::{CompileErrorCode as E, ElementKind, ScopeKind};

static REF_SETTINGS: SettingMap = phf_map! {
    "delete" => SettingRule::new(p::ref_action),
    "update" => SettingRule::new(p::ref_action),
    "color" => SettingRule::new(p::color_value),
};

static REF_ARGS: [ArgRule; 1] = [ArgRule {
    check: p::relationship,
    code: E::InvalidRef,
    registrar: Some(p::relationship_names),
}];

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::Ref,
    context: ContextRule {
        allowed: &[ScopeKind::TopLevel, ScopeKind::Table, ScopeKind::Project],
        code: E::InvalidRefContext,
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
        invalid: E::InvalidRef,
        arity: Arity::exactly(1),
        args: &REF_ARGS,
        settings: Some(&REF_SETTINGS),
        register: None,
        count: FieldCount::ExactlyOne,
    }),
    stops: Stops::CONTEXT,
};
