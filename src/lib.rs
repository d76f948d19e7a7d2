//! Library crate for dbml-parse.
//!
//! Front-end for DBML schema files: lexing with trivia attachment, a
//! recovering Pratt parser, a rule-driven validator and binder, and an
//! offset-to-context query engine for editor tooling.

#![forbid(unsafe_code)]

pub mod analyzer;
pub mod compiler;
pub mod diagnostics;
pub mod language;
pub mod parser;
pub mod token;
pub mod tokenizer;

// Only expose test utilities to tests and opt-in consumers.
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_util;

pub use analyzer::{
    Analysis, CompileError, CompileErrorCode, ElementKind, ScopeKind, Symbol, SymbolId,
    SymbolKind, analyze,
};
pub use compiler::{Compiler, ContainerStack, ContextInfo, ScopeInfo};
pub use diagnostics::Diagnostic;
pub use language::SyntaxKind;
pub use parser::{Parsed, Parser, ParsingError, ParsingErrorCode, ast, parse, parse_expression};
pub use token::{Token, TriviaSide};
pub use tokenizer::{Lexed, Span, tokenize, tokenize_flat};
