//! Infix operator handling for the Pratt parser.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::{AccessNode, InfixNode, SyntaxNode, SyntaxNodeKind};
use crate::parser::errors::ParsingErrorCode;

impl Parser {
    /// Consume the operator at the cursor and its right operand.
    ///
    /// When the right operand is missing the operator is rejected as invalid
    /// and the left operand is handed back unchanged.
    pub(super) fn parse_infix(
        &mut self,
        lhs: SyntaxNode,
        r_bp: u8,
    ) -> Result<SyntaxNode, SyntaxNode> {
        let op = self.ts.bump();
        let Some(rhs) = self.expression_bp(r_bp) else {
            if op.kind == SyntaxKind::T_DOT {
                if let Some(last) = self
                    .ts
                    .errors
                    .last_mut()
                    .filter(|e| e.code != ParsingErrorCode::NestingTooDeep)
                {
                    last.code = ParsingErrorCode::ExpectedMember;
                    last.message = "expected a member name after `.`".to_string();
                }
            }
            self.ts.reject(op);
            return Err(lhs);
        };
        let kind = if op.kind == SyntaxKind::T_DOT {
            SyntaxNodeKind::Access(AccessNode {
                container: Box::new(lhs),
                dot: op,
                member: Box::new(rhs),
            })
        } else {
            SyntaxNodeKind::Infix(InfixNode {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            })
        };
        Ok(SyntaxNode::new(kind))
    }
}
