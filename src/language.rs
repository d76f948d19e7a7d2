//! Token kinds for DBML source.
//!
//! `SyntaxKind` tags every token produced by the tokenizer. Node shapes are
//! not listed here: the syntax tree is an owned enum (see
//! [`crate::parser::ast::SyntaxNodeKind`]) so node variants carry their own
//! payloads.

/// Every token kind the DBML tokenizer can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[expect(non_camel_case_types, reason = "token naming follows the T_* convention")]
pub enum SyntaxKind {
    // Trivia
    T_WHITESPACE,
    T_NEWLINE,
    T_COMMENT,
    T_INVALID,
    // Names and literals
    T_IDENT,
    T_QUOTED_IDENT,
    T_STRING,
    T_NUMBER,
    T_COLOR,
    T_FUNCTION_EXPR,
    // Punctuation
    T_LPAREN,
    T_RPAREN,
    T_LBRACE,
    T_RBRACE,
    T_LBRACKET,
    T_RBRACKET,
    T_COMMA,
    T_COLON,
    T_DOT,
    // Operators
    T_LT,
    T_GT,
    T_LTE,
    T_GTE,
    T_LTGT,
    T_EQ,
    T_EQEQ,
    T_NEQ,
    T_BANG,
    T_PLUS,
    T_MINUS,
    T_STAR,
    T_SLASH,
    T_PERCENT,
    // End of input
    T_EOF,
}

impl SyntaxKind {
    /// Returns `true` for tokens that never reach the parser as significant
    /// tokens and are attached as trivia instead.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::T_WHITESPACE | Self::T_NEWLINE | Self::T_COMMENT | Self::T_INVALID
        )
    }

    /// Returns `true` for the operators that relate two columns in a `Ref`.
    #[must_use]
    pub const fn is_relationship_op(self) -> bool {
        matches!(self, Self::T_LT | Self::T_GT | Self::T_MINUS | Self::T_LTGT)
    }

    /// The closing delimiter paired with an opening one.
    #[must_use]
    pub const fn closing_delimiter(self) -> Option<Self> {
        match self {
            Self::T_LPAREN => Some(Self::T_RPAREN),
            Self::T_LBRACE => Some(Self::T_RBRACE),
            Self::T_LBRACKET => Some(Self::T_RBRACKET),
            _ => None,
        }
    }

    /// Returns `true` for `)`, `]` and `}`.
    #[must_use]
    pub const fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::T_RPAREN | Self::T_RBRACE | Self::T_RBRACKET)
    }

    /// Source spelling used in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::T_WHITESPACE => "whitespace",
            Self::T_NEWLINE => "newline",
            Self::T_COMMENT => "comment",
            Self::T_INVALID => "invalid character",
            Self::T_IDENT => "identifier",
            Self::T_QUOTED_IDENT => "quoted identifier",
            Self::T_STRING => "string",
            Self::T_NUMBER => "number",
            Self::T_COLOR => "color",
            Self::T_FUNCTION_EXPR => "function expression",
            Self::T_LPAREN => "`(`",
            Self::T_RPAREN => "`)`",
            Self::T_LBRACE => "`{`",
            Self::T_RBRACE => "`}`",
            Self::T_LBRACKET => "`[`",
            Self::T_RBRACKET => "`]`",
            Self::T_COMMA => "`,`",
            Self::T_COLON => "`:`",
            Self::T_DOT => "`.`",
            Self::T_LT => "`<`",
            Self::T_GT => "`>`",
            Self::T_LTE => "`<=`",
            Self::T_GTE => "`>=`",
            Self::T_LTGT => "`<>`",
            Self::T_EQ => "`=`",
            Self::T_EQEQ => "`==`",
            Self::T_NEQ => "`!=`",
            Self::T_BANG => "`!`",
            Self::T_PLUS => "`+`",
            Self::T_MINUS => "`-`",
            Self::T_STAR => "`*`",
            Self::T_SLASH => "`/`",
            Self::T_PERCENT => "`%`",
            Self::T_EOF => "end of input",
        }
    }
}
