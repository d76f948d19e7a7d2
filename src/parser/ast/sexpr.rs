//! S-expression rendering of syntax trees.
//!
//! The output ignores node ids and trivia, which makes it the structural
//! equality used throughout the tests.

use super::node::{SyntaxNode, SyntaxNodeKind};
use crate::Token;

impl SyntaxNode {
    /// Render the subtree as an S-expression.
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match &self.kind {
            SyntaxNodeKind::Program(p) => list("program", p.body.iter().map(Self::to_sexpr)),
            SyntaxNodeKind::ElementDeclaration(e) => {
                let mut parts = vec![e.keyword.value.clone()];
                parts.extend(e.name.iter().map(|n| n.to_sexpr()));
                if let Some(alias) = &e.alias {
                    parts.push(format!("(as {})", alias.to_sexpr()));
                }
                parts.extend(e.attribute_list.iter().map(|n| n.to_sexpr()));
                if let Some(body) = &e.body {
                    if e.body_colon.is_some() {
                        parts.push(format!("(: {})", body.to_sexpr()));
                    } else {
                        parts.push(body.to_sexpr());
                    }
                }
                list("element", parts.into_iter())
            }
            SyntaxNodeKind::FieldDeclaration(f) => format!("(field {})", f.value.to_sexpr()),
            SyntaxNodeKind::Attribute(a) => {
                let mut parts: Vec<String> = a.name.iter().map(|n| n.to_sexpr()).collect();
                if a.colon.is_some() {
                    parts.push(":".to_string());
                }
                parts.extend(a.value.iter().map(|n| n.to_sexpr()));
                list("attr", parts.into_iter())
            }
            SyntaxNodeKind::IdentifierStream(s) => list("ids", s.identifiers.iter().map(text)),
            SyntaxNodeKind::Primary(p) => p.expression.to_sexpr(),
            SyntaxNodeKind::Literal(l) => text(&l.literal),
            SyntaxNodeKind::Variable(v) => text(&v.variable),
            SyntaxNodeKind::Prefix(p) => format!("({} {})", p.op.value, p.expression.to_sexpr()),
            SyntaxNodeKind::Infix(i) => format!(
                "({} {} {})",
                i.op.value,
                i.left.to_sexpr(),
                i.right.to_sexpr()
            ),
            SyntaxNodeKind::Access(a) => {
                format!("(. {} {})", a.container.to_sexpr(), a.member.to_sexpr())
            }
            SyntaxNodeKind::Call(c) => {
                format!("(call {} {})", c.callee.to_sexpr(), c.arguments.to_sexpr())
            }
            SyntaxNodeKind::FunctionExpression(f) => text(&f.value),
            SyntaxNodeKind::FunctionApplication(f) => list(
                "app",
                std::iter::once(f.callee.to_sexpr()).chain(f.args.iter().map(Self::to_sexpr)),
            ),
            SyntaxNodeKind::Block(b) => list("block", b.body.iter().map(Self::to_sexpr)),
            SyntaxNodeKind::List(l) => list("list", l.elements.iter().map(Self::to_sexpr)),
            SyntaxNodeKind::Tuple(t) => list("tuple", t.elements.iter().map(Self::to_sexpr)),
            SyntaxNodeKind::Group(t) => list("group", t.elements.iter().map(Self::to_sexpr)),
        }
    }
}

fn text(token: &Token) -> String {
    token.value.clone()
}

fn list(head: &str, items: impl Iterator<Item = String>) -> String {
    let mut out = format!("({head}");
    for item in items {
        out.push(' ');
        out.push_str(&item);
    }
    out.push(')');
    out
}
