//! `Table name as alias [settings] { columns, Note, Indexes, Ref }`.

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

static TABLE_SETTINGS: SettingMap = phf_map! {
    "headercolor" => SettingRule::new(p::color_value),
    "note" => SettingRule::new(p::string_value),
};

static COLUMN_SETTINGS: SettingMap = phf_map! {
    "note" => SettingRule::new(p::string_value),
    "ref" => SettingRule {
        check: p::relationship_value,
        allow_duplicates: true,
        registrar: Some(p::relationship_names),
    },
    "primary key" => SettingRule::new(p::flag),
    "pk" => SettingRule::new(p::flag),
    "null" => SettingRule::new(p::flag),
    "not null" => SettingRule::new(p::flag),
    "unique" => SettingRule::new(p::flag),
    "increment" => SettingRule::new(p::flag),
    "default" => SettingRule {
        check: p::default_value,
        allow_duplicates: false,
        registrar: Some(p::enum_member_names),
    },
};

static COLUMN_ARGS: [ArgRule; 2] = [
    ArgRule {
        check: p::simple_name,
        code: E::InvalidColumnName,
        registrar: None,
    },
    ArgRule {
        check: p::column_type,
        code: E::InvalidColumnType,
        registrar: Some(p::enum_type_names),
    },
];

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::Table,
    context: ContextRule {
        allowed: &[ScopeKind::TopLevel],
        code: E::InvalidTableContext,
    },
    uniqueness: Uniqueness::Unconstrained,
    name: NameRule::Required {
        shape: NameShape::Qualified,
        register: Some(SymbolKind::Table),
    },
    alias: AliasRule::Optional {
        register: Some(SymbolKind::Table),
    },
    settings: SettingsRule::Allowed(&TABLE_SETTINGS),
    body: BodyRule {
        simple: false,
        complex: true,
    },
    subfield: SubfieldRule::Allowed(FieldRule {
        invalid: E::InvalidColumn,
        arity: Arity::exactly(2),
        args: &COLUMN_ARGS,
        settings: Some(&COLUMN_SETTINGS),
        register: Some(FieldRegistration {
            arg: 0,
            kind: SymbolKind::Column,
            duplicate: E::DuplicateColumnName,
        }),
        count: FieldCount::Any,
    }),
    stops: Stops::CONTEXT,
};
