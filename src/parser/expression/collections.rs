//! Delimited sequences: tuples, groups, setting lists and attributes.
//!
//! Sequences push a frame on the parsing-context stack for their opening
//! delimiter. A closing delimiter owned by an enclosing frame ends the
//! sequence early and raises a context jump towards that frame.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::{
    AttributeNode, IdentifierStreamNode, ListNode, SyntaxNode, SyntaxNodeKind, TupleNode,
};
use crate::parser::context::{ParsingContext, StrayCloser};
use crate::parser::errors::ParsingErrorCode as E;
use crate::Token;

/// Raw pieces of a delimited sequence.
struct Sequence {
    open: Token,
    elements: Vec<SyntaxNode>,
    commas: Vec<Token>,
    close: Option<Token>,
}

impl Parser {
    /// Parse `( ... )`. A single element without a trailing comma is a
    /// group; anything else is a tuple.
    pub(crate) fn parse_tuple(&mut self) -> SyntaxNode {
        let seq = self.parse_sequence(ParsingContext::GroupExpression, Self::normal_expression);
        let is_group = seq.elements.len() == 1 && seq.commas.is_empty();
        let node = TupleNode {
            open: seq.open,
            elements: seq.elements,
            commas: seq.commas,
            close: seq.close,
        };
        SyntaxNode::new(if is_group {
            SyntaxNodeKind::Group(node)
        } else {
            SyntaxNodeKind::Tuple(node)
        })
    }

    /// Parse a `[ ... ]` list of attributes.
    pub(crate) fn parse_list(&mut self) -> SyntaxNode {
        let seq = self.parse_sequence(ParsingContext::ListExpression, Self::parse_attribute);
        SyntaxNode::new(SyntaxNodeKind::List(ListNode {
            open: seq.open,
            elements: seq.elements,
            commas: seq.commas,
            close: seq.close,
        }))
    }

    fn parse_sequence(
        &mut self,
        context: ParsingContext,
        mut element: impl FnMut(&mut Self) -> Option<SyntaxNode>,
    ) -> Sequence {
        let open = self.ts.bump();
        let frame = self.contexts.push(context);
        let mut elements = Vec::new();
        let mut commas: Vec<Token> = Vec::new();
        let close = loop {
            if self.contexts.is_jumping() && !self.contexts.land(frame) {
                self.report_unclosed(&open.span(), context);
                break None;
            }
            let kind = self.ts.peek_kind();
            if kind == context.closer() {
                break Some(self.ts.bump());
            }
            match kind {
                SyntaxKind::T_EOF => {
                    self.report_unclosed(&open.span(), context);
                    break None;
                }
                kind if kind.is_closing_delimiter() => {
                    match self.contexts.stray_closer(frame, kind) {
                        StrayCloser::Jump(jump) => {
                            self.report_unclosed(&open.span(), context);
                            self.contexts.raise(jump);
                            break None;
                        }
                        StrayCloser::Unmatched => {
                            let message = self.unexpected_message();
                            self.reject_current(E::UnexpectedToken, message);
                        }
                    }
                }
                SyntaxKind::T_COMMA => {
                    if elements.len() <= commas.len() {
                        self.ts
                            .error_here(E::ExpectedExpression, "expected an element before `,`");
                    }
                    commas.push(self.ts.bump());
                }
                _ => {
                    if elements.len() > commas.len() {
                        self.ts.error_here(E::UnexpectedToken, "expected `,`");
                    }
                    let before = self.ts.position();
                    if let Some(node) = element(self) {
                        elements.push(node);
                    } else if self.ts.position() == before {
                        self.ts.skip_invalid();
                    }
                }
            }
        };
        self.contexts.pop(frame);
        Sequence {
            open,
            elements,
            commas,
            close,
        }
    }

    /// Parse `name words (: value)?`. An empty name is reported but still
    /// yields an attribute when a `:` follows.
    fn parse_attribute(&mut self) -> Option<SyntaxNode> {
        let name = if self.ts.at(SyntaxKind::T_IDENT) {
            Some(Box::new(self.parse_identifier_stream()))
        } else {
            None
        };
        if name.is_none() {
            if !self.ts.at(SyntaxKind::T_COLON) {
                let message = format!(
                    "expected a setting name, found {}",
                    self.ts.peek_kind().describe()
                );
                self.ts.error_here(E::EmptyAttributeName, message);
                return None;
            }
            self.ts
                .error_here(E::EmptyAttributeName, "a setting needs a name before `:`");
        }
        let colon = self.ts.bump_if(SyntaxKind::T_COLON);
        let value = if colon.is_some() {
            let value = self.parse_attribute_value();
            if value.is_none() {
                let span = self.ts.peek().span();
                if self.ts.errors.last().is_none_or(|e| e.span != span) {
                    self.ts
                        .push_error(E::ExpectedAttributeValue, "expected a setting value", span);
                }
            }
            value.map(Box::new)
        } else {
            None
        };
        Some(SyntaxNode::new(SyntaxNodeKind::Attribute(AttributeNode {
            name,
            colon,
            value,
        })))
    }

    // `set null` style values are identifier streams; anything else is a
    // normal-form expression.
    fn parse_attribute_value(&mut self) -> Option<SyntaxNode> {
        let first = self.ts.peek();
        let second = self.ts.nth(1);
        let is_stream = first.kind == SyntaxKind::T_IDENT
            && !first.has_trailing_newline()
            && second.kind == SyntaxKind::T_IDENT;
        if is_stream {
            return Some(self.parse_identifier_stream());
        }
        if matches!(
            self.ts.peek_kind(),
            SyntaxKind::T_COMMA | SyntaxKind::T_RBRACKET
        ) {
            return None;
        }
        self.normal_expression()
    }

    // Consecutive identifiers on one line.
    fn parse_identifier_stream(&mut self) -> SyntaxNode {
        let mut identifiers = vec![self.ts.bump()];
        while self.ts.at(SyntaxKind::T_IDENT) && !self.ts.after_newline() {
            identifiers.push(self.ts.bump());
        }
        SyntaxNode::new(SyntaxNodeKind::IdentifierStream(IdentifierStreamNode {
            identifiers,
        }))
    }
}
