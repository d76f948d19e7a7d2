//! `Project name { database_type: 'PostgreSQL', Note: '...', Table ... }`.
//!
//! A project body holds only nested elements; custom `key: value` entries
//! parse as elements of kind [`ElementKind::Custom`].

use super::super::rules::{
    AliasRule, BodyRule, ContextRule, ElementRules, NameRule, NameShape, SettingsRule, Stops,
    Uniqueness,
};
use super::super::subfield::SubfieldRule;
use crate::analyzer::{CompileErrorCode as E, ElementKind, ScopeKind};

pub(in crate::analyzer::validator) static RULES: ElementRules = ElementRules {
    kind: ElementKind::Project,
    context: ContextRule {
        allowed: &[ScopeKind::TopLevel],
        code: E::InvalidProjectContext,
    },
    uniqueness: Uniqueness::Global(E::ProjectRedefined),
    name: NameRule::Optional(NameShape::Simple),
    alias: AliasRule::Forbidden,
    settings: SettingsRule::Forbidden,
    body: BodyRule {
        simple: false,
        complex: true,
    },
    subfield: SubfieldRule::Forbidden(E::InvalidProjectField),
    stops: Stops::CONTEXT,
};
