//! Syntax tree types for DBML.
//!
//! The tree is a closed sum type ([`SyntaxNodeKind`]) so every walk over it
//! is an exhaustive `match`. Nodes own their children; upward links (element
//! to parent element, element to symbol) live in side tables keyed by
//! [`NodeId`] inside the analyzer.

mod node;
pub(crate) mod precedence;
mod sexpr;

pub use node::{
    AccessNode, AttributeNode, BlockNode, CallNode, ElementDeclarationNode, FieldDeclarationNode,
    FunctionApplicationNode, FunctionExpressionNode, IdentifierStreamNode, InfixNode, ListNode,
    LiteralNode, Member, NodeId, NodeShape, PrefixNode, PrimaryNode, ProgramNode, SyntaxNode,
    SyntaxNodeKind, TupleNode, VariableNode,
};
