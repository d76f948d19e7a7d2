//! Declarative per-kind validation rules.
//!
//! Each element kind is described by one [`ElementRules`] record along seven
//! axes (context, uniqueness, name, alias, settings, body shape, subfields),
//! interpreted by the generic validator. Restrictions carry their error code
//! in the variant that imposes them, so a rule cannot be configured without
//! one. Cross-field consistency is checked once, when the [`RuleBook`] is
//! built.

use std::sync::LazyLock;

use super::kinds;
use super::settings::SettingMap;
use super::subfield::SubfieldRule;
use crate::analyzer::{CompileErrorCode, ElementKind, ScopeKind, SymbolKind};

#[derive(Clone, Copy)]
pub(crate) struct ElementRules {
    pub kind: ElementKind,
    pub context: ContextRule,
    pub uniqueness: Uniqueness,
    pub name: NameRule,
    pub alias: AliasRule,
    pub settings: SettingsRule,
    pub body: BodyRule,
    pub subfield: SubfieldRule,
    pub stops: Stops,
}

#[derive(Clone, Copy)]
pub(crate) struct ContextRule {
    pub allowed: &'static [ScopeKind],
    pub code: CompileErrorCode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Uniqueness {
    Unconstrained,
    /// At most once per file.
    Global(CompileErrorCode),
    /// At most once per enclosing body.
    Local(CompileErrorCode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameShape {
    Simple,
    Qualified,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameRule {
    Forbidden,
    Optional(NameShape),
    Required {
        shape: NameShape,
        register: Option<SymbolKind>,
    },
}

impl NameRule {
    pub(crate) const fn registers(self) -> Option<SymbolKind> {
        match self {
            Self::Required { register, .. } => register,
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AliasRule {
    Forbidden,
    /// A simple alias, registered as a second index for the element's own
    /// symbol when `register` is set.
    Optional { register: Option<SymbolKind> },
}

#[derive(Clone, Copy)]
pub(crate) enum SettingsRule {
    Forbidden,
    Allowed(&'static SettingMap),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BodyRule {
    pub simple: bool,
    pub complex: bool,
}

/// Stages that end validation of the element when they fail. A body of the
/// wrong shape is never walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Stops {
    pub context: bool,
    pub uniqueness: bool,
    pub name: bool,
    pub alias: bool,
    pub settings: bool,
}

impl Stops {
    pub(crate) const CONTEXT: Self = Self {
        context: true,
        uniqueness: false,
        name: false,
        alias: false,
        settings: false,
    };
}

/// A rule table that violates the invariants the validator relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleConfigError {
    #[error("no rules for {0:?}")]
    MissingKind(ElementKind),
    #[error("{0:?} is configured twice")]
    DuplicateKind(ElementKind),
    #[error("{0:?} is not allowed in any context")]
    EmptyContext(ElementKind),
    #[error("{0:?} allows neither a simple nor a complex body")]
    NoBodyShape(ElementKind),
    #[error("{kind:?} accepts up to {max} arguments but has {rules} argument rules")]
    ArityMismatch {
        kind: ElementKind,
        max: usize,
        rules: usize,
    },
    #[error("{0:?} registers a field argument that does not exist")]
    RegistrationOutOfRange(ElementKind),
    #[error("{0:?} registers fields but owns no symbol table")]
    RegistrationWithoutTable(ElementKind),
}

/// Rules for every element kind.
pub(crate) struct RuleBook {
    rules: Vec<&'static ElementRules>,
}

const ALL_KINDS: [ElementKind; 8] = [
    ElementKind::Table,
    ElementKind::Enum,
    ElementKind::Ref,
    ElementKind::Note,
    ElementKind::Project,
    ElementKind::Indexes,
    ElementKind::TableGroup,
    ElementKind::Custom,
];

static RULE_BOOK: LazyLock<RuleBook> = LazyLock::new(|| {
    RuleBook::build().unwrap_or_else(|e| unreachable!("invalid validator rule book: {e}"))
});

impl RuleBook {
    /// The process-wide rule book, checked on first use.
    pub(crate) fn global() -> &'static Self {
        &RULE_BOOK
    }

    /// Build the book from the per-kind rule tables.
    ///
    /// # Errors
    /// Returns the first [`RuleConfigError`] found in the tables.
    pub(crate) fn build() -> Result<Self, RuleConfigError> {
        Self::from_rules(vec![
            &kinds::table::RULES,
            &kinds::enum_decl::RULES,
            &kinds::ref_decl::RULES,
            &kinds::note::RULES,
            &kinds::project::RULES,
            &kinds::indexes::RULES,
            &kinds::table_group::RULES,
            &kinds::custom::RULES,
        ])
    }

    pub(crate) fn from_rules(rules: Vec<&'static ElementRules>) -> Result<Self, RuleConfigError> {
        for kind in ALL_KINDS {
            match rules.iter().filter(|r| r.kind == kind).count() {
                0 => return Err(RuleConfigError::MissingKind(kind)),
                1 => {}
                _ => return Err(RuleConfigError::DuplicateKind(kind)),
            }
        }
        for rule in &rules {
            check(rule)?;
        }
        log::debug!("validator rule book built for {} element kinds", rules.len());
        Ok(Self { rules })
    }

    pub(crate) fn get(&self, kind: ElementKind) -> &'static ElementRules {
        self.rules
            .iter()
            .copied()
            .find(|r| r.kind == kind)
            .unwrap_or_else(|| unreachable!("rule book covers every element kind"))
    }
}

fn check(rule: &ElementRules) -> Result<(), RuleConfigError> {
    let kind = rule.kind;
    if rule.context.allowed.is_empty() {
        return Err(RuleConfigError::EmptyContext(kind));
    }
    if !rule.body.simple && !rule.body.complex {
        return Err(RuleConfigError::NoBodyShape(kind));
    }
    let SubfieldRule::Allowed(field) = rule.subfield else {
        return Ok(());
    };
    if field.arity.max != field.args.len() || field.arity.min > field.arity.max {
        return Err(RuleConfigError::ArityMismatch {
            kind,
            max: field.arity.max,
            rules: field.args.len(),
        });
    }
    if let Some(registration) = field.register {
        if registration.arg >= field.args.len() {
            return Err(RuleConfigError::RegistrationOutOfRange(kind));
        }
        if !rule.name.registers().is_some_and(SymbolKind::owns_table) {
            return Err(RuleConfigError::RegistrationWithoutTable(kind));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leak(rule: ElementRules) -> &'static ElementRules {
        Box::leak(Box::new(rule))
    }

    fn book_with(replacement: ElementRules) -> Result<RuleBook, RuleConfigError> {
        let mut rules: Vec<&'static ElementRules> = RuleBook::global()
            .rules
            .iter()
            .copied()
            .filter(|r| r.kind != replacement.kind)
            .collect();
        rules.push(leak(replacement));
        RuleBook::from_rules(rules)
    }

    #[test]
    fn shipped_rules_are_consistent() {
        assert!(RuleBook::build().is_ok());
    }

    #[test]
    fn missing_kind_is_rejected() {
        let rules = vec![&kinds::table::RULES];
        assert!(matches!(
            RuleBook::from_rules(rules),
            Err(RuleConfigError::MissingKind(_))
        ));
    }

    #[test]
    fn body_shape_is_required() {
        let mut rule = *RuleBook::global().get(ElementKind::Note);
        rule.body = BodyRule {
            simple: false,
            complex: false,
        };
        assert!(matches!(
            book_with(rule),
            Err(RuleConfigError::NoBodyShape(ElementKind::Note))
        ));
    }

    #[test]
    fn field_registration_needs_a_table() {
        let mut rule = *RuleBook::global().get(ElementKind::Table);
        rule.name = NameRule::Optional(NameShape::Qualified);
        assert_eq!(
            book_with(rule).err(),
            Some(RuleConfigError::RegistrationWithoutTable(ElementKind::Table))
        );
    }

    #[test]
    fn arity_must_match_argument_rules() {
        let mut rule = *RuleBook::global().get(ElementKind::Enum);
        if let SubfieldRule::Allowed(field) = &mut rule.subfield {
            field.arity = super::super::subfield::Arity::exactly(3);
        }
        assert!(matches!(
            book_with(rule),
            Err(RuleConfigError::ArityMismatch { .. })
        ));
    }
}
