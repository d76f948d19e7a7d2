//! Recursive-descent and Pratt parser producing the DBML syntax tree.
//!
//! Element declarations are parsed by recursive descent (`element.rs`);
//! expressions by binding-power climbing (`expression/`). The parser never
//! fails: it always returns a best-effort [`ast::SyntaxNode`] for the whole
//! program together with the syntax errors it recovered from.

use crate::diagnostics::sort_by_position;
use crate::{Lexed, SyntaxKind, Token, tokenize};

pub mod ast;
mod context;
mod delimiter;
mod element;
mod errors;
mod expression;
mod token_stream;

#[cfg(test)]
mod tests;

pub use errors::{ParsingError, ParsingErrorCode};

use ast::SyntaxNode;
use context::{MAX_NESTING_DEPTH, ParsingContextStack};
use token_stream::TokenStream;

/// Result of a parse operation.
#[derive(Debug, Clone)]
pub struct Parsed {
    program: SyntaxNode,
    errors: Vec<ParsingError>,
}

impl Parsed {
    /// The `Program` root node.
    #[must_use]
    pub fn program(&self) -> &SyntaxNode {
        &self.program
    }

    /// Lexical and syntax errors, ordered by position.
    #[must_use]
    pub fn errors(&self) -> &[ParsingError] {
        &self.errors
    }

    /// Top-level element declarations.
    #[must_use]
    pub fn elements(&self) -> &[SyntaxNode] {
        self.program.as_program().map_or(&[], |p| p.body.as_slice())
    }

    /// Parse an already tokenized source.
    #[must_use]
    pub fn from_lexed(lexed: Lexed) -> Self {
        let (program, parse_errors) = Parser::new(lexed.tokens).parse();
        let mut errors = lexed.errors;
        errors.extend(parse_errors);
        sort_by_position(&mut errors);
        log::debug!(
            "parsed {} bytes with {} errors",
            program.full_end,
            errors.len()
        );
        Self { program, errors }
    }
}

/// Tokenize and parse a whole DBML source.
#[must_use]
pub fn parse(src: &str) -> Parsed {
    Parsed::from_lexed(tokenize(src))
}

/// Parse a single normal-form expression.
///
/// # Errors
/// Returns every lexical and syntax error when the source is not exactly one
/// well-formed expression.
#[must_use = "discarding the Result will ignore parse errors"]
pub fn parse_expression(src: &str) -> Result<SyntaxNode, Vec<ParsingError>> {
    let lexed = tokenize(src);
    let mut parser = Parser::new(lexed.tokens);
    let expr = parser.normal_expression();
    if !parser.ts.at_eof() {
        let tok = parser.ts.peek().clone();
        parser.ts.push_error(
            ParsingErrorCode::UnexpectedToken,
            format!("unexpected {}", tok.kind.describe()),
            tok.span(),
        );
    }
    let mut errors = lexed.errors;
    errors.append(&mut parser.ts.errors);
    match expr {
        Some(expr) if errors.is_empty() => Ok(expr),
        _ => {
            sort_by_position(&mut errors);
            Err(errors)
        }
    }
}

/// Parser over a lexed token stream.
pub struct Parser {
    ts: TokenStream,
    contexts: ParsingContextStack,
}

impl Parser {
    /// Wrap `tokens`, which should end with `T_EOF`; one is appended
    /// otherwise.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            ts: TokenStream::new(tokens),
            contexts: ParsingContextStack::default(),
        }
    }

    /// Parse the whole program.
    #[must_use]
    pub fn parse(mut self) -> (SyntaxNode, Vec<ParsingError>) {
        let program = self.parse_program();
        (program, self.ts.errors)
    }

    // Report `code` at the current token and skip it.
    fn reject_current(&mut self, code: ParsingErrorCode, message: impl Into<String>) {
        self.ts.error_here(code, message);
        self.ts.skip_invalid();
    }

    // Past the nesting limit: report at the current token, then skip the
    // rest of the nested construct. Skipping stops before the closer of the
    // enclosing frame, and at the end of the line in a statement.
    fn skip_nested(&mut self) {
        self.ts.error_here(
            ParsingErrorCode::NestingTooDeep,
            format!("nesting deeper than {MAX_NESTING_DEPTH} levels"),
        );
        let mut balance = 0usize;
        let mut skipped = false;
        loop {
            let kind = self.ts.peek_kind();
            let line_done = skipped && self.contexts.line_sensitive() && self.ts.after_newline();
            if kind == SyntaxKind::T_EOF || (balance == 0 && line_done) {
                break;
            }
            if kind.is_closing_delimiter() {
                let Some(inner) = balance.checked_sub(1) else {
                    break;
                };
                balance = inner;
            } else if kind.closing_delimiter().is_some() {
                balance += 1;
            }
            self.ts.skip_invalid();
            skipped = true;
        }
    }

    fn unexpected_message(&self) -> String {
        format!("unexpected {}", self.ts.peek_kind().describe())
    }

    // Returns `true` when the current token ends whatever statement or
    // sequence is being parsed.
    fn at_boundary(&self) -> bool {
        let kind = self.ts.peek_kind();
        kind == SyntaxKind::T_EOF || self.contexts.is_jumping() || self.contexts.closes_any(kind)
    }
}
