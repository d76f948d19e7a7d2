//! `Indexes { (a, b) [unique], `lower(name)` [type: hash] }` inside a table.

use phf::phf_map;

use super::super::predicates as p;
use super::super::rules::{
    AliasRule, BodyRule, ContextRule, ElementRules, NameRule, SettingsRule, Stops, Uniqueness,
};
use super::super::settings::{SettingMap, SettingRule};
use super::super::subfield::{ArgRule, Arity, FieldCount, FieldRule, SubfieldRule};
use crate::analyzer::{CompileErrorCode as E, ElementKind, ScopeKind};

static INDEX_SETTINGS: SettingMap = phf_map! {
    "pk" => SettingRule::new(p::flag),
    "unique" => SettingRule::new(p::flag),
    "name" => SettingRule::new(p::name_value),
    "type" => SettingRule::new(p::index_type),
    "note" => SettingRule::new(p::string_value),
};

static INDEX_ARGS: [ArgRule; 1] = [ArgRule {
    check: p::index_column,
    code: E::InvalidIndex,
    registrar: Some(p::index_column_names),
}];

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::Indexes,
    context: ContextRule {
        allowed: &[ScopeKind::Table],
        code: E::InvalidIndexesContext,
    },
    uniqueness: Uniqueness::Local(E::IndexesRedefined),
    name: NameRule::Forbidden,
    alias: AliasRule::Forbidden,
    settings: SettingsRule::Forbidden,
    body: BodyRule {
        simple: false,
        complex: true,
    },
    subfield: SubfieldRule::Allowed(FieldRule {
        invalid: E::InvalidIndex,
        arity: Arity::exactly(1),
        args: &INDEX_ARGS,
        settings: Some(&INDEX_SETTINGS),
        register: None,
        count: FieldCount::Any,
    }),
    stops: Stops::CONTEXT,
};
