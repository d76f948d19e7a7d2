//! What the syntax around an offset is about: which element, which part of
//! its declaration, and inside a body which argument or setting.

use super::container::Located;
use super::scope::ScopeInfo;
use crate::analyzer::{ElementKind, setting_name};
use crate::parser::ast::{ElementDeclarationNode, NodeId, NodeShape, SyntaxNode, SyntaxNodeKind};

/// Part of an element declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSlot {
    /// The keyword.
    Type,
    Name,
    Alias,
    Settings,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementContext {
    pub id: NodeId,
    pub kind: ElementKind,
    pub slot: ElementSlot,
}

/// A statement of a body, or a simple body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubfieldContext {
    /// The field declaration, or the simple body expression.
    pub node: NodeId,
    /// Index of the term at the offset; `None` inside the trailing setting
    /// list.
    pub argument: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingContext {
    /// Normalised name; empty while the name is missing.
    pub name: String,
    /// The offset is past the `:`.
    pub in_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub scope: ScopeInfo,
    pub element: Option<ElementContext>,
    pub subfield: Option<SubfieldContext>,
    pub setting: Option<SettingContext>,
}

pub(super) fn context_of(located: &Located<'_>, scope: ScopeInfo) -> ContextInfo {
    let offset = located.offset;
    let found = located
        .nodes
        .iter()
        .rposition(|n| n.shape() == NodeShape::ElementDeclaration)
        .and_then(|index| {
            let node = located.nodes.get(index)?;
            let inner = located.nodes.get(index + 1..)?;
            Some((*node, node.as_element()?, inner))
        });
    let Some((node, element, inner)) = found else {
        return ContextInfo {
            scope,
            element: None,
            subfield: None,
            setting: None,
        };
    };
    let slot = slot_of(element, offset);
    let subfield = (slot == ElementSlot::Body)
        .then(|| subfield_of(element, inner, offset))
        .flatten();
    ContextInfo {
        scope,
        element: Some(ElementContext {
            id: node.id,
            kind: ElementKind::from_keyword(&element.keyword.value),
            slot,
        }),
        subfield,
        setting: setting_at(inner, offset),
    }
}

// An offset exactly at the start of a delimiter is still before it.
fn slot_of(element: &ElementDeclarationNode, offset: usize) -> ElementSlot {
    let body_start = element
        .body_colon
        .as_ref()
        .map(|c| c.start)
        .or_else(|| element.body.as_deref().map(|b| b.start));
    if body_start.is_some_and(|start| offset > start) {
        ElementSlot::Body
    } else if element
        .attribute_list
        .as_deref()
        .is_some_and(|list| offset > list.start)
    {
        ElementSlot::Settings
    } else if element.as_token.as_ref().is_some_and(|t| offset > t.end) {
        ElementSlot::Alias
    } else if offset > element.keyword.end {
        ElementSlot::Name
    } else {
        ElementSlot::Type
    }
}

fn subfield_of(
    element: &ElementDeclarationNode,
    inner: &[&SyntaxNode],
    offset: usize,
) -> Option<SubfieldContext> {
    let (holder, value) = match inner.iter().find(|n| n.shape() == NodeShape::FieldDeclaration) {
        Some(field) => match &field.kind {
            SyntaxNodeKind::FieldDeclaration(f) => (field.id, f.value.as_ref()),
            _ => return None,
        },
        None if element.has_simple_body() => {
            let body = element.body.as_deref()?;
            (body.id, body)
        }
        None => return None,
    };
    let terms = value.application_terms();
    let in_settings = terms
        .last()
        .filter(|t| terms.len() > 1 && t.shape() == NodeShape::List)
        .is_some_and(|list| offset > list.start);
    let argument = (!in_settings).then(|| {
        terms
            .iter()
            .position(|t| t.start <= offset && offset <= t.end)
            .unwrap_or_else(|| terms.iter().filter(|t| t.end < offset).count())
    });
    Some(SubfieldContext {
        node: holder,
        argument,
    })
}

fn setting_at(inner: &[&SyntaxNode], offset: usize) -> Option<SettingContext> {
    let attribute = inner
        .iter()
        .rev()
        .find(|n| n.shape() == NodeShape::Attribute)
        .copied()
        .or_else(|| {
            // Past the end of an attribute whose value is still missing.
            let list = inner.iter().rev().find_map(|n| n.as_list())?;
            list.elements
                .iter()
                .find(|e| e.full_start <= offset && offset <= e.full_end)
        })?
        .as_attribute()?;
    Some(SettingContext {
        name: attribute
            .name
            .as_deref()
            .and_then(setting_name)
            .unwrap_or_default(),
        in_value: attribute.colon.as_ref().is_some_and(|c| offset >= c.end),
    })
}
