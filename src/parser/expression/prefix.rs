//! Operands and prefix operators for the Pratt parser.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::precedence::prefix_binding_power;
use crate::parser::ast::{
    FunctionExpressionNode, LiteralNode, PrefixNode, PrimaryNode, SyntaxNode, SyntaxNodeKind,
    VariableNode,
};
use crate::parser::errors::ParsingErrorCode;

impl Parser {
    pub(super) fn parse_prefix(&mut self) -> Option<SyntaxNode> {
        let kind = self.ts.peek_kind();
        if let Some(bp) = prefix_binding_power(kind) {
            if self.at_line_final_operator() {
                self.reject_line_final_operator();
                return None;
            }
            let op = self.ts.bump();
            let Some(operand) = self.expression_bp(bp) else {
                self.ts.reject(op);
                return None;
            };
            return Some(SyntaxNode::new(SyntaxNodeKind::Prefix(PrefixNode {
                op,
                expression: Box::new(operand),
            })));
        }
        match kind {
            SyntaxKind::T_LPAREN => Some(self.parse_tuple()),
            SyntaxKind::T_LBRACKET => Some(self.parse_list()),
            SyntaxKind::T_IDENT | SyntaxKind::T_QUOTED_IDENT => {
                let variable = self.ts.bump();
                Some(primary(SyntaxNodeKind::Variable(VariableNode { variable })))
            }
            SyntaxKind::T_NUMBER | SyntaxKind::T_STRING | SyntaxKind::T_COLOR => {
                let literal = self.ts.bump();
                Some(primary(SyntaxNodeKind::Literal(LiteralNode { literal })))
            }
            SyntaxKind::T_FUNCTION_EXPR => {
                let value = self.ts.bump();
                Some(SyntaxNode::new(SyntaxNodeKind::FunctionExpression(
                    FunctionExpressionNode { value },
                )))
            }
            SyntaxKind::T_EOF => {
                self.ts.error_here(
                    ParsingErrorCode::UnexpectedEof,
                    "expected an expression, found the end of the file",
                );
                None
            }
            other => {
                self.ts.error_here(
                    ParsingErrorCode::ExpectedExpression,
                    format!("expected an expression, found {}", other.describe()),
                );
                None
            }
        }
    }
}

fn primary(inner: SyntaxNodeKind) -> SyntaxNode {
    SyntaxNode::new(SyntaxNodeKind::Primary(PrimaryNode {
        expression: Box::new(SyntaxNode::new(inner)),
    }))
}
