//! Syntax errors reported by the tokenizer and the parser.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::{Diagnostic, Span};

/// Numeric taxonomy of syntax errors.
///
/// Discriminants are part of the public contract and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u16)]
pub enum ParsingErrorCode {
    UnknownSymbol = 1000,
    UnterminatedString = 1001,
    UnterminatedQuotedIdentifier = 1002,
    UnterminatedFunctionExpression = 1003,
    UnterminatedComment = 1004,
    UnexpectedToken = 1005,
    UnexpectedEof = 1006,
    ExpectedExpression = 1007,
    ExpectedElementType = 1008,
    ExpectedElementBody = 1009,
    InvalidElementName = 1010,
    InvalidElementAlias = 1011,
    MissingClosingDelimiter = 1012,
    ExpectedSpace = 1013,
    ExpectedNewline = 1014,
    EmptyAttributeName = 1015,
    ExpectedAttributeValue = 1016,
    ExpectedMember = 1017,
    NestingTooDeep = 1018,
}

impl ParsingErrorCode {
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        <Self as num_traits::FromPrimitive>::from_u16(code)
    }

    #[must_use]
    pub fn to_u16(self) -> u16 {
        <Self as num_traits::ToPrimitive>::to_u16(&self).unwrap_or_default()
    }
}

/// A malformed token sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParsingError {
    pub code: ParsingErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParsingError {
    #[must_use]
    pub fn new(code: ParsingErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }
}

impl Diagnostic for ParsingError {
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
