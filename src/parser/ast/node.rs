//! Owned syntax tree for DBML.
//!
//! Every node is a [`SyntaxNode`]: an id, a tight span (first to last
//! significant token), a full span (including attached trivia) and a
//! [`SyntaxNodeKind`] payload. Spans are computed once, at construction, from
//! the node's member chain, so they can never disagree with the children.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{Span, Token};

/// Process-unique node identifier, increasing in allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub id: NodeId,
    pub start: usize,
    pub end: usize,
    pub full_start: usize,
    pub full_end: usize,
    pub kind: SyntaxNodeKind,
}

#[derive(Debug, Clone)]
pub enum SyntaxNodeKind {
    Program(ProgramNode),
    ElementDeclaration(ElementDeclarationNode),
    FieldDeclaration(FieldDeclarationNode),
    Attribute(AttributeNode),
    IdentifierStream(IdentifierStreamNode),
    Primary(PrimaryNode),
    Literal(LiteralNode),
    Variable(VariableNode),
    Prefix(PrefixNode),
    Infix(InfixNode),
    Access(AccessNode),
    Call(CallNode),
    FunctionExpression(FunctionExpressionNode),
    FunctionApplication(FunctionApplicationNode),
    Block(BlockNode),
    List(ListNode),
    Tuple(TupleNode),
    Group(TupleNode),
}

/// Payload-free tag of a [`SyntaxNodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    Program,
    ElementDeclaration,
    FieldDeclaration,
    Attribute,
    IdentifierStream,
    Primary,
    Literal,
    Variable,
    Prefix,
    Infix,
    Access,
    Call,
    FunctionExpression,
    FunctionApplication,
    Block,
    List,
    Tuple,
    Group,
}

#[derive(Debug, Clone)]
pub struct ProgramNode {
    pub body: Vec<SyntaxNode>,
    pub eof: Token,
    /// Tokens skipped at the top level while recovering from errors.
    pub invalid: Vec<Token>,
}

/// `Keyword name as alias [settings] : body` or `... { body }`.
#[derive(Debug, Clone)]
pub struct ElementDeclarationNode {
    pub keyword: Token,
    pub name: Option<Box<SyntaxNode>>,
    pub as_token: Option<Token>,
    pub alias: Option<Box<SyntaxNode>>,
    pub attribute_list: Option<Box<SyntaxNode>>,
    pub body_colon: Option<Token>,
    /// A [`SyntaxNodeKind::Block`] for complex bodies, any expression for
    /// simple ones.
    pub body: Option<Box<SyntaxNode>>,
}

/// One non-element statement of a block body.
#[derive(Debug, Clone)]
pub struct FieldDeclarationNode {
    pub value: Box<SyntaxNode>,
}

/// `name words : value` inside a `[...]` list.
#[derive(Debug, Clone)]
pub struct AttributeNode {
    pub name: Option<Box<SyntaxNode>>,
    pub colon: Option<Token>,
    pub value: Option<Box<SyntaxNode>>,
}

#[derive(Debug, Clone)]
pub struct IdentifierStreamNode {
    pub identifiers: Vec<Token>,
}

#[derive(Debug, Clone)]
pub struct PrimaryNode {
    pub expression: Box<SyntaxNode>,
}

#[derive(Debug, Clone)]
pub struct LiteralNode {
    pub literal: Token,
}

#[derive(Debug, Clone)]
pub struct VariableNode {
    pub variable: Token,
}

#[derive(Debug, Clone)]
pub struct PrefixNode {
    pub op: Token,
    pub expression: Box<SyntaxNode>,
}

#[derive(Debug, Clone)]
pub struct InfixNode {
    pub op: Token,
    pub left: Box<SyntaxNode>,
    pub right: Box<SyntaxNode>,
}

#[derive(Debug, Clone)]
pub struct AccessNode {
    pub container: Box<SyntaxNode>,
    pub dot: Token,
    pub member: Box<SyntaxNode>,
}

#[derive(Debug, Clone)]
pub struct CallNode {
    pub callee: Box<SyntaxNode>,
    /// A [`SyntaxNodeKind::Tuple`] or [`SyntaxNodeKind::Group`].
    pub arguments: Box<SyntaxNode>,
}

#[derive(Debug, Clone)]
pub struct FunctionExpressionNode {
    pub value: Token,
}

#[derive(Debug, Clone)]
pub struct FunctionApplicationNode {
    pub callee: Box<SyntaxNode>,
    pub args: Vec<SyntaxNode>,
}

#[derive(Debug, Clone)]
pub struct BlockNode {
    pub open: Token,
    pub body: Vec<SyntaxNode>,
    pub close: Option<Token>,
}

#[derive(Debug, Clone)]
pub struct ListNode {
    pub open: Token,
    pub elements: Vec<SyntaxNode>,
    pub commas: Vec<Token>,
    pub close: Option<Token>,
}

/// Shared by tuples and single-element groups.
#[derive(Debug, Clone)]
pub struct TupleNode {
    pub open: Token,
    pub elements: Vec<SyntaxNode>,
    pub commas: Vec<Token>,
    pub close: Option<Token>,
}

/// One entry of a node's member chain.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Node(&'a SyntaxNode),
    Token(&'a Token),
}

impl Member<'_> {
    #[must_use]
    pub fn start(&self) -> usize {
        match self {
            Self::Node(n) => n.start,
            Self::Token(t) => t.start,
        }
    }

    #[must_use]
    pub fn end(&self) -> usize {
        match self {
            Self::Node(n) => n.end,
            Self::Token(t) => t.end,
        }
    }

    #[must_use]
    pub fn full_start(&self) -> usize {
        match self {
            Self::Node(n) => n.full_start,
            Self::Token(t) => t.full_start(),
        }
    }

    #[must_use]
    pub fn full_end(&self) -> usize {
        match self {
            Self::Node(n) => n.full_end,
            Self::Token(t) => t.full_end(),
        }
    }
}

fn push_node<'a>(out: &mut Vec<Member<'a>>, node: Option<&'a SyntaxNode>) {
    if let Some(n) = node {
        out.push(Member::Node(n));
    }
}

fn push_token<'a>(out: &mut Vec<Member<'a>>, token: Option<&'a Token>) {
    if let Some(t) = token {
        out.push(Member::Token(t));
    }
}

// Elements and separators of a delimited sequence, in source order.
fn delimited<'a>(
    out: &mut Vec<Member<'a>>,
    open: &'a Token,
    elements: &'a [SyntaxNode],
    commas: &'a [Token],
    close: Option<&'a Token>,
) {
    out.push(Member::Token(open));
    let mut inner: Vec<Member<'a>> = elements
        .iter()
        .map(Member::Node)
        .chain(commas.iter().map(Member::Token))
        .collect();
    inner.sort_by_key(Member::start);
    out.extend(inner);
    push_token(out, close);
}

impl SyntaxNodeKind {
    /// Children and tokens in source order.
    #[must_use]
    pub fn members(&self) -> Vec<Member<'_>> {
        let mut out = Vec::new();
        match self {
            Self::Program(p) => {
                out.extend(p.body.iter().map(Member::Node));
                out.extend(p.invalid.iter().map(Member::Token));
                out.sort_by_key(Member::start);
                out.push(Member::Token(&p.eof));
            }
            Self::ElementDeclaration(e) => {
                out.push(Member::Token(&e.keyword));
                push_node(&mut out, e.name.as_deref());
                push_token(&mut out, e.as_token.as_ref());
                push_node(&mut out, e.alias.as_deref());
                push_node(&mut out, e.attribute_list.as_deref());
                push_token(&mut out, e.body_colon.as_ref());
                push_node(&mut out, e.body.as_deref());
            }
            Self::FieldDeclaration(f) => out.push(Member::Node(&f.value)),
            Self::Attribute(a) => {
                push_node(&mut out, a.name.as_deref());
                push_token(&mut out, a.colon.as_ref());
                push_node(&mut out, a.value.as_deref());
            }
            Self::IdentifierStream(s) => out.extend(s.identifiers.iter().map(Member::Token)),
            Self::Primary(p) => out.push(Member::Node(&p.expression)),
            Self::Literal(l) => out.push(Member::Token(&l.literal)),
            Self::Variable(v) => out.push(Member::Token(&v.variable)),
            Self::Prefix(p) => {
                out.push(Member::Token(&p.op));
                out.push(Member::Node(&p.expression));
            }
            Self::Infix(i) => {
                out.push(Member::Node(&i.left));
                out.push(Member::Token(&i.op));
                out.push(Member::Node(&i.right));
            }
            Self::Access(a) => {
                out.push(Member::Node(&a.container));
                out.push(Member::Token(&a.dot));
                out.push(Member::Node(&a.member));
            }
            Self::Call(c) => {
                out.push(Member::Node(&c.callee));
                out.push(Member::Node(&c.arguments));
            }
            Self::FunctionExpression(f) => out.push(Member::Token(&f.value)),
            Self::FunctionApplication(f) => {
                out.push(Member::Node(&f.callee));
                out.extend(f.args.iter().map(Member::Node));
            }
            Self::Block(b) => {
                out.push(Member::Token(&b.open));
                out.extend(b.body.iter().map(Member::Node));
                push_token(&mut out, b.close.as_ref());
            }
            Self::List(l) => delimited(&mut out, &l.open, &l.elements, &l.commas, l.close.as_ref()),
            Self::Tuple(t) | Self::Group(t) => {
                delimited(&mut out, &t.open, &t.elements, &t.commas, t.close.as_ref());
            }
        }
        out
    }

    #[must_use]
    pub fn shape(&self) -> NodeShape {
        match self {
            Self::Program(_) => NodeShape::Program,
            Self::ElementDeclaration(_) => NodeShape::ElementDeclaration,
            Self::FieldDeclaration(_) => NodeShape::FieldDeclaration,
            Self::Attribute(_) => NodeShape::Attribute,
            Self::IdentifierStream(_) => NodeShape::IdentifierStream,
            Self::Primary(_) => NodeShape::Primary,
            Self::Literal(_) => NodeShape::Literal,
            Self::Variable(_) => NodeShape::Variable,
            Self::Prefix(_) => NodeShape::Prefix,
            Self::Infix(_) => NodeShape::Infix,
            Self::Access(_) => NodeShape::Access,
            Self::Call(_) => NodeShape::Call,
            Self::FunctionExpression(_) => NodeShape::FunctionExpression,
            Self::FunctionApplication(_) => NodeShape::FunctionApplication,
            Self::Block(_) => NodeShape::Block,
            Self::List(_) => NodeShape::List,
            Self::Tuple(_) => NodeShape::Tuple,
            Self::Group(_) => NodeShape::Group,
        }
    }
}

impl SyntaxNode {
    /// Allocate a node, deriving both spans from its member chain.
    #[must_use]
    pub fn new(kind: SyntaxNodeKind) -> Self {
        let (start, end, full_start, full_end) = {
            let members = kind.members();
            match (members.first(), members.last()) {
                (Some(first), Some(last)) => (
                    first.start(),
                    last.end(),
                    first.full_start(),
                    last.full_end(),
                ),
                _ => (0, 0, 0, 0),
            }
        };
        Self {
            id: NodeId::fresh(),
            start,
            end,
            full_start,
            full_end,
            kind,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.start..self.end
    }

    #[must_use]
    pub fn full_span(&self) -> Span {
        self.full_start..self.full_end
    }

    #[must_use]
    pub fn shape(&self) -> NodeShape {
        self.kind.shape()
    }

    #[must_use]
    pub fn members(&self) -> Vec<Member<'_>> {
        self.kind.members()
    }

    /// Direct child nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        self.members()
            .into_iter()
            .filter_map(|m| match m {
                Member::Node(n) => Some(n),
                Member::Token(_) => None,
            })
            .collect()
    }

    /// Pre-order traversal including `self`.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().into_iter().rev());
        }
        out
    }

    /// Every token owned by this subtree, in source order, trivia excluded.
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        for member in self.members() {
            match member {
                Member::Node(n) => out.extend(n.tokens()),
                Member::Token(t) => out.push(t),
            }
        }
        out
    }

    #[must_use]
    pub fn as_program(&self) -> Option<&ProgramNode> {
        match &self.kind {
            SyntaxNodeKind::Program(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&ElementDeclarationNode> {
        match &self.kind {
            SyntaxNodeKind::ElementDeclaration(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_block(&self) -> Option<&BlockNode> {
        match &self.kind {
            SyntaxNodeKind::Block(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListNode> {
        match &self.kind {
            SyntaxNodeKind::List(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_attribute(&self) -> Option<&AttributeNode> {
        match &self.kind {
            SyntaxNodeKind::Attribute(a) => Some(a),
            _ => None,
        }
    }

    /// The token of a `Primary` wrapping a variable or literal.
    #[must_use]
    pub fn primary_token(&self) -> Option<&Token> {
        let SyntaxNodeKind::Primary(p) = &self.kind else {
            return None;
        };
        match &p.expression.kind {
            SyntaxNodeKind::Variable(v) => Some(&v.variable),
            SyntaxNodeKind::Literal(l) => Some(&l.literal),
            _ => None,
        }
    }

    /// The token of a `Primary` wrapping a variable.
    #[must_use]
    pub fn variable_token(&self) -> Option<&Token> {
        let SyntaxNodeKind::Primary(p) = &self.kind else {
            return None;
        };
        match &p.expression.kind {
            SyntaxNodeKind::Variable(v) => Some(&v.variable),
            _ => None,
        }
    }

    /// Terms of a statement: the callee and arguments of a function
    /// application, or the node itself.
    #[must_use]
    pub fn application_terms(&self) -> Vec<&Self> {
        match &self.kind {
            SyntaxNodeKind::FunctionApplication(app) => std::iter::once(app.callee.as_ref())
                .chain(app.args.iter())
                .collect(),
            _ => vec![self],
        }
    }

    /// Elements of a tuple or group.
    #[must_use]
    pub fn tuple_elements(&self) -> Option<&[Self]> {
        match &self.kind {
            SyntaxNodeKind::Tuple(t) | SyntaxNodeKind::Group(t) => Some(&t.elements),
            _ => None,
        }
    }
}

impl ElementDeclarationNode {
    /// Returns `true` for `{ ... }` bodies.
    #[must_use]
    pub fn has_complex_body(&self) -> bool {
        self.body.as_deref().and_then(SyntaxNode::as_block).is_some()
    }

    /// Returns `true` for `: value` bodies.
    #[must_use]
    pub fn has_simple_body(&self) -> bool {
        self.body.is_some() && !self.has_complex_body()
    }
}
