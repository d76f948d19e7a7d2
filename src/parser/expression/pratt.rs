//! Core binding-power loop.
//!
//! `expression_bp(min_bp)` parses one operand, then repeatedly extends it
//! with calls and infix operators whose left binding power exceeds `min_bp`.
//! A call is a postfix `(` glued to its callee; with trivia in between the
//! parenthesis starts a separate term of a function application instead.
//!
//! In a line-oriented statement an operator may not end its line: the
//! operator is rejected and the next line parses on its own.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::precedence::{CALL_BINDING_POWER, infix_binding_power};
use crate::parser::ast::{CallNode, SyntaxNode, SyntaxNodeKind};
use crate::parser::errors::ParsingErrorCode;

impl Parser {
    /// Parse an expression excluding bare function application.
    pub(crate) fn normal_expression(&mut self) -> Option<SyntaxNode> {
        self.expression_bp(0)
    }

    /// Parse an expression whose operators bind tighter than `min_bp`.
    ///
    /// Every call counts as one level of nesting, and so does every operator
    /// folded into the left operand. Past the limit the rest of the nested
    /// construct is skipped.
    pub(crate) fn expression_bp(&mut self, min_bp: u8) -> Option<SyntaxNode> {
        let level = self.contexts.nesting();
        if !self.contexts.enter() {
            self.skip_nested();
            return None;
        }
        let expr = self.fold_operators(min_bp);
        self.contexts.leave_to(level);
        expr
    }

    fn fold_operators(&mut self, min_bp: u8) -> Option<SyntaxNode> {
        let mut lhs = self.parse_prefix()?;
        loop {
            if self.contexts.is_jumping() {
                break;
            }
            let kind = self.ts.peek_kind();
            let is_call = kind == SyntaxKind::T_LPAREN && !self.ts.after_trivia();
            let r_bp = if is_call {
                if CALL_BINDING_POWER <= min_bp {
                    break;
                }
                None
            } else {
                let Some((l_bp, r_bp)) = infix_binding_power(kind) else {
                    break;
                };
                if l_bp <= min_bp {
                    break;
                }
                if self.at_line_final_operator() {
                    self.reject_line_final_operator();
                    break;
                }
                Some(r_bp)
            };
            if !self.contexts.enter() {
                self.skip_nested();
                break;
            }
            lhs = match r_bp {
                None => self.parse_call(lhs),
                Some(r_bp) => match self.parse_infix(lhs, r_bp) {
                    Ok(node) => node,
                    Err(lhs) => return Some(lhs),
                },
            };
        }
        Some(lhs)
    }

    /// Returns `true` when the current operator ends a line-oriented
    /// statement, so its operand would have to come from the next line.
    pub(super) fn at_line_final_operator(&self) -> bool {
        self.contexts.line_sensitive() && self.ts.peek().has_trailing_newline()
    }

    /// Report the operator at the cursor as missing its operand and skip it,
    /// leaving the next line to the enclosing statement loop.
    pub(super) fn reject_line_final_operator(&mut self) {
        let op = self.ts.bump();
        let (code, message) = if op.kind == SyntaxKind::T_DOT {
            (
                ParsingErrorCode::ExpectedMember,
                "expected a member name after `.` on the same line".to_string(),
            )
        } else {
            (
                ParsingErrorCode::ExpectedExpression,
                format!("expected an expression after `{}` on the same line", op.value),
            )
        };
        self.ts.push_error(code, message, op.span());
        self.ts.reject(op);
    }

    fn parse_call(&mut self, callee: SyntaxNode) -> SyntaxNode {
        let arguments = self.parse_tuple();
        SyntaxNode::new(SyntaxNodeKind::Call(CallNode {
            callee: Box::new(callee),
            arguments: Box::new(arguments),
        }))
    }
}
