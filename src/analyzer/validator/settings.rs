//! Setting lists: `[pk, note: 'x', ref: > users.id]`.

use std::collections::HashSet;

use super::Validator;
use super::predicates::Registrar;
use crate::analyzer::CompileErrorCode as E;
use crate::analyzer::CompileError;
use crate::parser::ast::{NodeId, SyntaxNode, SyntaxNodeKind};
use crate::Span;

/// Per-name setting tables, keyed by the normalised setting name.
pub(crate) type SettingMap = phf::Map<&'static str, SettingRule>;

#[derive(Clone, Copy)]
pub(crate) struct SettingRule {
    /// Validity of the value; `None` when the setting has no value.
    pub check: fn(Option<&SyntaxNode>) -> bool,
    pub allow_duplicates: bool,
    pub registrar: Option<Registrar>,
}

impl SettingRule {
    pub(crate) const fn new(check: fn(Option<&SyntaxNode>) -> bool) -> Self {
        Self {
            check,
            allow_duplicates: false,
            registrar: None,
        }
    }
}

/// A validated setting recorded against its declaring node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Lower-case, single-spaced name (`primary key`).
    pub name: String,
    pub span: Span,
    pub value: Option<NodeId>,
}

/// Normalised spelling of a setting name.
#[must_use]
pub fn setting_name(node: &SyntaxNode) -> Option<String> {
    match &node.kind {
        SyntaxNodeKind::IdentifierStream(s) => Some(
            s.identifiers
                .iter()
                .map(|t| t.value.to_ascii_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    }
}

impl Validator<'_> {
    /// Validate the attributes of `list` against `map`, recording the valid
    /// ones on `holder`. References found in values are queued with `owner`
    /// as their lookup scope.
    pub(super) fn validate_settings(
        &mut self,
        list: &SyntaxNode,
        map: &'static SettingMap,
        holder: NodeId,
        owner: Option<NodeId>,
    ) -> bool {
        let Some(list) = list.as_list() else {
            return true;
        };
        let mut ok = true;
        let mut seen = HashSet::new();
        let mut recorded = Vec::new();
        for node in &list.elements {
            let Some(attr) = node.as_attribute() else {
                continue;
            };
            let Some(name) = attr.name.as_deref().and_then(setting_name) else {
                self.report(CompileError::at_node(E::InvalidSettings, "setting without a name", node));
                ok = false;
                continue;
            };
            let Some(rule) = map.get(name.as_str()) else {
                self.report(CompileError::at_node(
                    E::UnknownSetting,
                    format!("unknown setting `{name}`"),
                    node,
                ));
                ok = false;
                continue;
            };
            let value = attr.value.as_deref();
            if !(rule.check)(value) {
                self.report(CompileError::at_node(
                    E::InvalidSettingValue,
                    format!("invalid value for setting `{name}`"),
                    node,
                ));
                ok = false;
                continue;
            }
            if !seen.insert(name.clone()) && !rule.allow_duplicates {
                self.report(CompileError::at_node(
                    E::DuplicateSetting,
                    format!("setting `{name}` is already set"),
                    node,
                ));
                ok = false;
                continue;
            }
            if let (Some(registrar), Some(value)) = (rule.registrar, value) {
                self.queue(registrar(value), owner);
            }
            recorded.push(Setting {
                name,
                span: node.span(),
                value: value.map(|v| v.id),
            });
        }
        self.analysis
            .settings
            .entry(holder)
            .or_default()
            .extend(recorded);
        ok
    }
}
