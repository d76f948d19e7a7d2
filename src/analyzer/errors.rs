//! Semantic errors reported by the validator and the binder.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::parser::ast::{NodeId, SyntaxNode};
use crate::{Diagnostic, Span, Token};

/// Numeric taxonomy of semantic errors.
///
/// 3000-3999 are validation errors, 4000-4999 binding errors. Discriminants
/// are part of the public contract and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u16)]
pub enum CompileErrorCode {
    InvalidName = 3000,
    UnexpectedName = 3001,
    NameNotFound = 3002,
    DuplicateName = 3003,
    UnexpectedComplexName = 3004,
    InvalidAlias = 3005,
    UnexpectedAlias = 3006,
    UnexpectedSettings = 3007,
    InvalidSettings = 3008,
    UnknownSetting = 3009,
    InvalidSettingValue = 3010,
    DuplicateSetting = 3011,
    UnexpectedSimpleBody = 3012,
    UnexpectedComplexBody = 3013,

    InvalidTableContext = 3020,
    InvalidEnumContext = 3021,
    InvalidRefContext = 3022,
    InvalidNoteContext = 3023,
    InvalidProjectContext = 3024,
    InvalidIndexesContext = 3025,
    InvalidTableGroupContext = 3026,
    UnknownElement = 3027,

    ProjectRedefined = 3030,
    IndexesRedefined = 3031,

    InvalidColumn = 3040,
    InvalidColumnName = 3041,
    InvalidColumnType = 3042,
    DuplicateColumnName = 3043,
    InvalidEnumField = 3044,
    DuplicateEnumFieldName = 3045,
    InvalidRef = 3046,
    InvalidIndex = 3047,
    InvalidNote = 3048,
    InvalidTableGroupField = 3049,
    DuplicateTableGroupFieldName = 3050,
    InvalidProjectField = 3051,
    InvalidCustomValue = 3052,

    SchemaNotFound = 4000,
    TableNotFound = 4001,
    ColumnNotFound = 4002,
    EnumNotFound = 4003,
    EnumFieldNotFound = 4004,
}

impl CompileErrorCode {
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        <Self as num_traits::FromPrimitive>::from_u16(code)
    }

    #[must_use]
    pub fn to_u16(self) -> u16 {
        <Self as num_traits::ToPrimitive>::to_u16(&self).unwrap_or_default()
    }

    /// Returns `true` for errors raised while resolving references.
    #[must_use]
    pub fn is_binding_error(self) -> bool {
        self.to_u16() >= 4000
    }
}

/// Valid syntax with an invalid meaning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    pub code: CompileErrorCode,
    pub message: String,
    pub span: Span,
    /// The node the error is about, when there is one.
    pub node: Option<NodeId>,
}

impl CompileError {
    #[must_use]
    pub fn new(code: CompileErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            node: None,
        }
    }

    /// An error spanning `node`.
    #[must_use]
    pub fn at_node(code: CompileErrorCode, message: impl Into<String>, node: &SyntaxNode) -> Self {
        Self {
            code,
            message: message.into(),
            span: node.span(),
            node: Some(node.id),
        }
    }

    #[must_use]
    pub fn at_token(code: CompileErrorCode, message: impl Into<String>, token: &Token) -> Self {
        Self::new(code, message, token.span())
    }
}

impl Diagnostic for CompileError {
    fn code(&self) -> u16 {
        self.code.to_u16()
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn span(&self) -> Span {
        self.span.clone()
    }
}
