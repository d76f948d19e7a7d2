//! Element declarations, block bodies and statement-level expressions.
//!
//! ```text
//! Program            = ElementDeclaration* EOF
//! ElementDeclaration = IDENT name? ("as" alias)? list? (":" statement | block)
//! block              = "{" (ElementDeclaration | statement)* "}"
//! statement          = expression (SPACE expression)*   -- up to the newline
//! ```

use super::Parser;
use super::ast::{
    BlockNode, ElementDeclarationNode, FieldDeclarationNode, FunctionApplicationNode, ProgramNode,
    SyntaxNode, SyntaxNodeKind,
};
use super::context::{ParsingContext, StrayCloser};
use super::delimiter::starts_element_declaration;
use super::errors::ParsingErrorCode as E;
use crate::SyntaxKind;

impl Parser {
    pub(super) fn parse_program(&mut self) -> SyntaxNode {
        let mut body = Vec::new();
        let mut invalid = Vec::new();
        while !self.ts.at_eof() {
            let before = self.ts.position();
            if self.ts.at(SyntaxKind::T_IDENT) {
                body.push(self.parse_element());
                if !self.ts.at_eof() && !self.ts.after_newline() {
                    self.ts.error_here(
                        E::ExpectedNewline,
                        "an element declaration must end its line",
                    );
                    while !self.ts.at_eof() && !self.ts.after_newline() {
                        invalid.extend(self.ts.skip_into_bucket());
                    }
                }
            } else {
                self.ts.error_here(
                    E::ExpectedElementType,
                    format!(
                        "expected an element declaration, found {}",
                        self.ts.peek_kind().describe()
                    ),
                );
                invalid.extend(self.ts.skip_into_bucket());
            }
            if self.ts.position() == before {
                invalid.extend(self.ts.skip_into_bucket());
            }
        }
        let eof = self.ts.finish();
        SyntaxNode::new(SyntaxNodeKind::Program(ProgramNode { body, eof, invalid }))
    }

    /// Parse one element declaration; the current token is its keyword.
    pub(super) fn parse_element(&mut self) -> SyntaxNode {
        let keyword = self.ts.bump();
        let mut element = ElementDeclarationNode {
            keyword,
            name: None,
            as_token: None,
            alias: None,
            attribute_list: None,
            body_colon: None,
            body: None,
        };

        if !self.at_element_header_stop() {
            element.name = self.parse_header_part(E::InvalidElementName, "element name", true);
        }
        if self.ts.at_word("as") {
            element.as_token = Some(self.ts.bump());
            element.alias = self.parse_header_part(E::InvalidElementAlias, "alias", false);
        }
        if self.ts.at(SyntaxKind::T_LBRACKET) {
            element.attribute_list = Some(Box::new(self.parse_list()));
        }

        if !self.at_body_start() {
            self.ts.error_here(
                E::ExpectedElementBody,
                format!(
                    "expected `:` or `{{` to start the body of `{}`",
                    element.keyword.value
                ),
            );
            while !self.at_body_start() && !self.at_boundary() && !self.at_next_element() {
                self.ts.skip_invalid();
            }
        }
        if let Some(colon) = self.ts.bump_if(SyntaxKind::T_COLON) {
            element.body_colon = Some(colon);
            element.body = self.parse_statement().map(Box::new);
        } else if self.ts.at(SyntaxKind::T_LBRACE) {
            element.body = Some(Box::new(self.parse_block()));
        }
        SyntaxNode::new(SyntaxNodeKind::ElementDeclaration(element))
    }

    fn at_body_start(&self) -> bool {
        matches!(
            self.ts.peek_kind(),
            SyntaxKind::T_COLON | SyntaxKind::T_LBRACE
        )
    }

    // At the top level, a fresh line opening another declaration ends any
    // skipping so that one broken header never swallows the next element.
    fn at_next_element(&self) -> bool {
        self.contexts.depth() == 0
            && self.ts.after_newline()
            && starts_element_declaration(self.ts.remaining())
    }

    fn at_element_header_stop(&self) -> bool {
        self.at_body_start() || self.ts.at(SyntaxKind::T_LBRACKET) || self.ts.at_word("as")
    }

    // Name or alias, resynchronising to the rest of the header on failure.
    fn parse_header_part(
        &mut self,
        code: E,
        what: &str,
        stop_at_as: bool,
    ) -> Option<Box<SyntaxNode>> {
        let errors_before = self.ts.errors.len();
        let part = self.normal_expression();
        let resync = |p: &Self| {
            p.at_body_start()
                || p.ts.at(SyntaxKind::T_LBRACKET)
                || (stop_at_as && p.ts.at_word("as"))
                || p.at_boundary()
                || p.at_next_element()
        };
        if !resync(&*self) {
            if self.ts.errors.len() == errors_before {
                self.ts.error_here(code, format!("invalid {what}"));
            } else if let Some(last) = self.ts.errors.last_mut() {
                last.code = code;
                last.message = format!("invalid {what}: {}", last.message);
            }
            while !resync(&*self) {
                self.ts.skip_invalid();
            }
        }
        part.map(Box::new)
    }

    pub(super) fn parse_block(&mut self) -> SyntaxNode {
        let open = self.ts.bump();
        let frame = self.contexts.push(ParsingContext::BlockExpression);
        let mut body = Vec::new();
        let close = loop {
            if self.contexts.is_jumping() && !self.contexts.land(frame) {
                self.report_unclosed(&open.span(), ParsingContext::BlockExpression);
                break None;
            }
            match self.ts.peek_kind() {
                SyntaxKind::T_RBRACE => break Some(self.ts.bump()),
                SyntaxKind::T_EOF => {
                    self.report_unclosed(&open.span(), ParsingContext::BlockExpression);
                    break None;
                }
                kind if kind.is_closing_delimiter() => {
                    match self.contexts.stray_closer(frame, kind) {
                        StrayCloser::Jump(jump) => {
                            self.report_unclosed(&open.span(), ParsingContext::BlockExpression);
                            self.contexts.raise(jump);
                            break None;
                        }
                        StrayCloser::Unmatched => {
                            let message = self.unexpected_message();
                            self.reject_current(E::UnexpectedToken, message);
                        }
                    }
                }
                _ => self.parse_block_statement(&mut body),
            }
        };
        self.contexts.pop(frame);
        SyntaxNode::new(SyntaxNodeKind::Block(BlockNode { open, body, close }))
    }

    fn parse_block_statement(&mut self, body: &mut Vec<SyntaxNode>) {
        let before = self.ts.position();
        let errors_before = self.ts.errors.len();
        if starts_element_declaration(self.ts.remaining()) {
            let level = self.contexts.nesting();
            if self.contexts.enter() {
                body.push(self.parse_element());
                self.contexts.leave_to(level);
            } else {
                self.skip_nested();
            }
        } else if let Some(value) = self.parse_statement() {
            body.push(SyntaxNode::new(SyntaxNodeKind::FieldDeclaration(
                FieldDeclarationNode {
                    value: Box::new(value),
                },
            )));
        }
        if self.ts.position() == before {
            if self.ts.errors.len() == errors_before {
                let message = self.unexpected_message();
                self.ts.error_here(E::UnexpectedToken, message);
            }
            self.ts.skip_invalid();
            return;
        }
        self.finish_line();
    }

    // A statement must be followed by a newline or by the end of the block.
    fn finish_line(&mut self) {
        let done = |p: &Self| p.ts.after_newline() || p.at_boundary();
        if done(&*self) {
            return;
        }
        self.ts
            .error_here(E::ExpectedNewline, "expected a new line after the statement");
        while !done(&*self) {
            self.ts.skip_invalid();
        }
    }

    /// Parse a statement-level expression: one normal-form expression, or a
    /// function application of several separated by spaces up to the end of
    /// the line.
    pub(super) fn parse_statement(&mut self) -> Option<SyntaxNode> {
        let callee = self.normal_expression()?;
        let mut args = Vec::new();
        while !self.ts.after_newline()
            && !self.at_boundary()
            && !self.ts.peek_kind().is_closing_delimiter()
            && !self.ts.at(SyntaxKind::T_COMMA)
        {
            if !self.ts.after_trivia() {
                self.ts.error_here(
                    E::ExpectedSpace,
                    "expected a space between the terms of an application",
                );
            }
            let Some(arg) = self.normal_expression() else {
                break;
            };
            args.push(arg);
        }
        if args.is_empty() {
            return Some(callee);
        }
        Some(SyntaxNode::new(SyntaxNodeKind::FunctionApplication(
            FunctionApplicationNode {
                callee: Box::new(callee),
                args,
            },
        )))
    }

    pub(super) fn report_unclosed(&mut self, open: &crate::Span, context: ParsingContext) {
        self.ts.push_error(
            E::MissingClosingDelimiter,
            format!(
                "missing {} to close this {}",
                context.closer().describe(),
                context.opener().describe()
            ),
            open.clone(),
        );
    }
}
