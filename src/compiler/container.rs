//! Locating the syntax nodes that enclose a byte offset.
//!
//! The walk starts at the program root and, at each node, descends into the
//! member whose full span (trivia included) covers the offset, until it
//! reaches a token. When that token is trivia, the offset only borders the
//! nodes it was glued to, so frames whose tight span does not reach the
//! offset are dropped again.

use crate::analyzer::ElementKind;
use crate::parser::ast::{Member, NodeId, NodeShape, SyntaxNode};
use crate::{Span, SyntaxKind, Token, TriviaSide};

/// One enclosing node, outermost first in a [`ContainerStack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerFrame {
    pub id: NodeId,
    pub shape: NodeShape,
    /// Set for element declarations, from their keyword.
    pub element: Option<ElementKind>,
    pub span: Span,
    pub full_span: Span,
}

/// How the terminal token relates to the significant token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    Significant,
    Trivia,
    /// Skipped or malformed text glued before a significant token.
    LeadingInvalid,
    /// Skipped or malformed text glued after a significant token.
    TrailingInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalToken {
    pub kind: SyntaxKind,
    pub span: Span,
    pub role: TokenRole,
}

/// Nodes enclosing an offset and the token found there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStack {
    pub offset: usize,
    /// Outermost first; starts with the program.
    pub frames: Vec<ContainerFrame>,
    pub token: Option<TerminalToken>,
}

impl ContainerStack {
    /// The innermost frame.
    #[must_use]
    pub fn innermost(&self) -> Option<&ContainerFrame> {
        self.frames.last()
    }

    /// Shapes from the outermost frame inwards.
    #[must_use]
    pub fn shapes(&self) -> Vec<NodeShape> {
        self.frames.iter().map(|f| f.shape).collect()
    }

    /// The innermost enclosing element declaration.
    #[must_use]
    pub fn innermost_element(&self) -> Option<&ContainerFrame> {
        self.frames
            .iter()
            .rev()
            .find(|f| f.shape == NodeShape::ElementDeclaration)
    }
}

/// Nodes on the path to an offset, still borrowing the tree.
pub(super) struct Located<'a> {
    pub offset: usize,
    pub nodes: Vec<&'a SyntaxNode>,
    pub token: Option<TerminalToken>,
}

impl Located<'_> {
    pub(super) fn to_stack(&self) -> ContainerStack {
        ContainerStack {
            offset: self.offset,
            frames: self.nodes.iter().map(|n| frame(n)).collect(),
            token: self.token.clone(),
        }
    }
}

fn frame(node: &SyntaxNode) -> ContainerFrame {
    ContainerFrame {
        id: node.id,
        shape: node.shape(),
        element: node
            .as_element()
            .map(|e| ElementKind::from_keyword(&e.keyword.value)),
        span: node.span(),
        full_span: node.full_span(),
    }
}

// The zero-width end-of-file token also covers the offset just past the
// source.
fn covers(member: &Member<'_>, offset: usize) -> bool {
    let is_eof = matches!(member, Member::Token(t) if t.kind == SyntaxKind::T_EOF);
    member.full_start() <= offset && (offset < member.full_end() || (is_eof && offset == member.full_end()))
}

fn classify(token: &Token, offset: usize) -> TerminalToken {
    let significant = || TerminalToken {
        kind: token.kind,
        span: token.span(),
        role: TokenRole::Significant,
    };
    if token.start <= offset && offset < token.end {
        return significant();
    }
    let Some((trivia, side)) = token.trivia_at(offset) else {
        return significant();
    };
    let role = match (trivia.is_invalid, side) {
        (false, _) => TokenRole::Trivia,
        (true, TriviaSide::Leading) => TokenRole::LeadingInvalid,
        (true, TriviaSide::Trailing) => TokenRole::TrailingInvalid,
    };
    TerminalToken {
        kind: trivia.kind,
        span: trivia.span(),
        role,
    }
}

/// Walk from `root` down to the token covering `offset`.
pub(super) fn locate(root: &SyntaxNode, offset: usize) -> Located<'_> {
    let mut nodes = vec![root];
    let mut node = root;
    let mut token = None;
    loop {
        let members = node.members();
        match members.into_iter().find(|m| covers(m, offset)) {
            Some(Member::Node(child)) => {
                nodes.push(child);
                node = child;
            }
            Some(Member::Token(t)) => {
                token = Some(classify(t, offset));
                break;
            }
            None => break,
        }
    }
    if token.as_ref().is_none_or(|t| t.role != TokenRole::Significant) {
        // The program frame always stays. Tight ends are inclusive so that
        // an offset just after a node's last token still counts as inside.
        while nodes.len() > 1
            && nodes
                .last()
                .is_some_and(|n| offset < n.start || offset > n.end)
        {
            nodes.pop();
        }
    }
    log::trace!("offset {offset} is {} frames deep", nodes.len());
    Located {
        offset,
        nodes,
        token,
    }
}
