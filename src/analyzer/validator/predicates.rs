//! Shape predicates over subfield arguments and setting values, and the
//! registrars that turn references into pending names.

use crate::analyzer::SymbolKind;
use crate::analyzer::names::{PendingName, destructure, is_simple_name, is_word, qualify};
use crate::parser::ast::{NodeShape, SyntaxNode, SyntaxNodeKind};
use crate::SyntaxKind;

/// Collects the references spelled by an argument or setting value.
pub(crate) type Registrar = fn(&SyntaxNode) -> Vec<PendingName>;

const REF_ACTIONS: &[&str] = &["cascade", "restrict", "set null", "set default", "no action"];
const INDEX_TYPES: &[&str] = &["btree", "hash"];

fn literal_kind(node: &SyntaxNode) -> Option<SyntaxKind> {
    match &node.kind {
        SyntaxNodeKind::Primary(p) => match &p.expression.kind {
            SyntaxNodeKind::Literal(l) => Some(l.literal.kind),
            _ => None,
        },
        _ => None,
    }
}

fn is_string(node: &SyntaxNode) -> bool {
    literal_kind(node) == Some(SyntaxKind::T_STRING)
}

fn is_number(node: &SyntaxNode) -> bool {
    literal_kind(node) == Some(SyntaxKind::T_NUMBER)
}

// Dotted chain of at least `min` identifiers.
fn is_chain(node: &SyntaxNode, min: usize) -> bool {
    destructure(node).is_some_and(|parts| parts.len() >= min)
}

/// `table.column`, `schema.table.column` or `table.(c1, c2)`.
#[must_use]
pub(crate) fn is_column_reference(node: &SyntaxNode) -> bool {
    if is_chain(node, 2) {
        return true;
    }
    let SyntaxNodeKind::Access(access) = &node.kind else {
        return false;
    };
    is_chain(&access.container, 1)
        && access
            .member
            .tuple_elements()
            .is_some_and(|elements| !elements.is_empty() && elements.iter().all(is_simple_name))
}

/// `> users.id` as written inside a column's `ref:` setting.
#[must_use]
pub(crate) fn is_unary_relationship(node: &SyntaxNode) -> bool {
    match &node.kind {
        SyntaxNodeKind::Prefix(p) => {
            p.op.kind.is_relationship_op() && is_column_reference(&p.expression)
        }
        _ => false,
    }
}

/// `a.b > c.d` as written in a `Ref` body.
#[must_use]
pub(crate) fn is_binary_relationship(node: &SyntaxNode) -> bool {
    match &node.kind {
        SyntaxNodeKind::Infix(i) => {
            i.op.kind.is_relationship_op()
                && is_column_reference(&i.left)
                && is_column_reference(&i.right)
        }
        _ => false,
    }
}

/// Literal, signed number, boolean, `null`, function expression, or an
/// enum member spelled as a dotted access.
#[must_use]
pub(crate) fn is_valid_default_value(node: &SyntaxNode) -> bool {
    match &node.kind {
        SyntaxNodeKind::Prefix(p) => {
            matches!(p.op.kind, SyntaxKind::T_MINUS | SyntaxKind::T_PLUS) && is_number(&p.expression)
        }
        SyntaxNodeKind::FunctionExpression(_) => true,
        SyntaxNodeKind::Access(_) => is_chain(node, 2),
        _ => {
            is_string(node)
                || is_number(node)
                || ["true", "false", "null"].iter().any(|w| is_word(node, w))
        }
    }
}

// Lower-cased, single-spaced text of an identifier or identifier stream.
fn words(node: &SyntaxNode) -> Option<String> {
    match &node.kind {
        SyntaxNodeKind::IdentifierStream(s) => Some(
            s.identifiers
                .iter()
                .map(|t| t.value.to_ascii_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => node
            .variable_token()
            .filter(|t| t.kind == SyntaxKind::T_IDENT)
            .map(|t| t.value.to_ascii_lowercase()),
    }
}

// Setting value predicates. `None` means the setting was written without a
// value.

pub(crate) fn flag(value: Option<&SyntaxNode>) -> bool {
    value.is_none()
}

pub(crate) fn string_value(value: Option<&SyntaxNode>) -> bool {
    value.is_some_and(is_string)
}

pub(crate) fn color_value(value: Option<&SyntaxNode>) -> bool {
    value.is_some_and(|v| literal_kind(v) == Some(SyntaxKind::T_COLOR))
}

pub(crate) fn default_value(value: Option<&SyntaxNode>) -> bool {
    value.is_some_and(is_valid_default_value)
}

pub(crate) fn relationship_value(value: Option<&SyntaxNode>) -> bool {
    value.is_some_and(is_unary_relationship)
}

pub(crate) fn ref_action(value: Option<&SyntaxNode>) -> bool {
    value
        .and_then(words)
        .is_some_and(|w| REF_ACTIONS.contains(&w.as_str()))
}

pub(crate) fn index_type(value: Option<&SyntaxNode>) -> bool {
    value
        .and_then(words)
        .is_some_and(|w| INDEX_TYPES.contains(&w.as_str()))
}

pub(crate) fn name_value(value: Option<&SyntaxNode>) -> bool {
    value.is_some_and(|v| is_string(v) || is_simple_name(v))
}

// Positional argument predicates.

pub(crate) fn simple_name(node: &SyntaxNode) -> bool {
    is_simple_name(node)
}

/// `int`, `public.status`, `varchar(255)`, `decimal(10, 2)`.
pub(crate) fn column_type(node: &SyntaxNode) -> bool {
    match &node.kind {
        SyntaxNodeKind::Call(call) => {
            is_chain(&call.callee, 1)
                && call
                    .arguments
                    .tuple_elements()
                    .is_some_and(|args| args.iter().all(|a| is_number(a) || is_simple_name(a)))
        }
        _ => is_chain(node, 1),
    }
}

pub(crate) fn string_arg(node: &SyntaxNode) -> bool {
    is_string(node)
}

pub(crate) fn relationship(node: &SyntaxNode) -> bool {
    is_binary_relationship(node)
}

/// A column, a function expression, or a parenthesised composite of them.
pub(crate) fn index_column(node: &SyntaxNode) -> bool {
    let single = |n: &SyntaxNode| is_simple_name(n) || n.shape() == NodeShape::FunctionExpression;
    match node.tuple_elements() {
        Some(elements) => !elements.is_empty() && elements.iter().all(single),
        None => single(node),
    }
}

pub(crate) fn table_reference(node: &SyntaxNode) -> bool {
    destructure(node).is_some_and(|parts| (1..=2).contains(&parts.len()))
}

// Registrars.

fn column_reference_names(node: &SyntaxNode) -> Vec<PendingName> {
    let tail = [SymbolKind::Table, SymbolKind::Column];
    if let Some(parts) = destructure(node) {
        return vec![PendingName {
            fragments: qualify(parts, &tail),
            referee: node.id,
            span: node.span(),
        }];
    }
    let SyntaxNodeKind::Access(access) = &node.kind else {
        return Vec::new();
    };
    let (Some(prefix), Some(members)) = (destructure(&access.container), access.member.tuple_elements())
    else {
        return Vec::new();
    };
    members
        .iter()
        .filter_map(|member| {
            let mut parts = prefix.clone();
            parts.extend(destructure(member)?);
            Some(PendingName {
                fragments: qualify(parts, &tail),
                referee: member.id,
                span: member.span(),
            })
        })
        .collect()
}

pub(crate) fn relationship_names(node: &SyntaxNode) -> Vec<PendingName> {
    match &node.kind {
        SyntaxNodeKind::Infix(i) => {
            let mut names = column_reference_names(&i.left);
            names.extend(column_reference_names(&i.right));
            names
        }
        SyntaxNodeKind::Prefix(p) => column_reference_names(&p.expression),
        _ => Vec::new(),
    }
}

/// `status.active` in a default refers to an enum member.
pub(crate) fn enum_member_names(node: &SyntaxNode) -> Vec<PendingName> {
    match destructure(node) {
        Some(parts) if parts.len() >= 2 => vec![PendingName {
            fragments: qualify(parts, &[SymbolKind::Enum, SymbolKind::EnumField]),
            referee: node.id,
            span: node.span(),
        }],
        _ => Vec::new(),
    }
}

/// A schema-qualified column type names an enum.
pub(crate) fn enum_type_names(node: &SyntaxNode) -> Vec<PendingName> {
    match destructure(node) {
        Some(parts) if parts.len() >= 2 => vec![PendingName {
            fragments: qualify(parts, &[SymbolKind::Enum]),
            referee: node.id,
            span: node.span(),
        }],
        _ => Vec::new(),
    }
}

pub(crate) fn index_column_names(node: &SyntaxNode) -> Vec<PendingName> {
    let single = |n: &SyntaxNode| {
        let parts = destructure(n)?;
        Some(PendingName {
            fragments: qualify(parts, &[SymbolKind::Column]),
            referee: n.id,
            span: n.span(),
        })
    };
    match node.tuple_elements() {
        Some(elements) => elements.iter().filter_map(single).collect(),
        None => single(node).into_iter().collect(),
    }
}

pub(crate) fn table_names(node: &SyntaxNode) -> Vec<PendingName> {
    destructure(node)
        .map(|parts| PendingName {
            fragments: qualify(parts, &[SymbolKind::Table]),
            referee: node.id,
            span: node.span(),
        })
        .into_iter()
        .collect()
}
