//! Operator precedence table for DBML expressions.
//!
//! Binding powers live here so the Pratt parser and its tests agree on a
//! single table. Higher numbers bind tighter; infix operators are
//! left-associative (`r_bp = l_bp + 1`).

use crate::SyntaxKind;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PrefixEntry {
    pub bp: u8,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct InfixEntry {
    pub l_bp: u8,
    pub r_bp: u8,
}

/// Left binding power of a call's opening parenthesis.
pub(crate) const CALL_BINDING_POWER: u8 = 14;

const UNARY: PrefixEntry = PrefixEntry { bp: 15 };

const PREFIX_TABLE: &[(SyntaxKind, PrefixEntry)] = &[
    (SyntaxKind::T_MINUS, UNARY),
    (SyntaxKind::T_PLUS, UNARY),
    (SyntaxKind::T_BANG, UNARY),
    (SyntaxKind::T_LT, UNARY),
    (SyntaxKind::T_GT, UNARY),
    (SyntaxKind::T_LTGT, UNARY),
];

const INFIX_TABLE: &[(SyntaxKind, InfixEntry)] = &[
    (SyntaxKind::T_EQ, InfixEntry { l_bp: 2, r_bp: 3 }),
    (SyntaxKind::T_EQEQ, InfixEntry { l_bp: 4, r_bp: 5 }),
    (SyntaxKind::T_NEQ, InfixEntry { l_bp: 4, r_bp: 5 }),
    (SyntaxKind::T_LT, InfixEntry { l_bp: 7, r_bp: 8 }),
    (SyntaxKind::T_LTE, InfixEntry { l_bp: 7, r_bp: 8 }),
    (SyntaxKind::T_GT, InfixEntry { l_bp: 7, r_bp: 8 }),
    (SyntaxKind::T_GTE, InfixEntry { l_bp: 7, r_bp: 8 }),
    (SyntaxKind::T_LTGT, InfixEntry { l_bp: 7, r_bp: 8 }),
    (SyntaxKind::T_PLUS, InfixEntry { l_bp: 9, r_bp: 10 }),
    (SyntaxKind::T_MINUS, InfixEntry { l_bp: 9, r_bp: 10 }),
    (SyntaxKind::T_STAR, InfixEntry { l_bp: 11, r_bp: 12 }),
    (SyntaxKind::T_SLASH, InfixEntry { l_bp: 11, r_bp: 12 }),
    (SyntaxKind::T_PERCENT, InfixEntry { l_bp: 11, r_bp: 12 }),
    (SyntaxKind::T_DOT, InfixEntry { l_bp: 16, r_bp: 17 }),
];

/// Lookup the binding power of a prefix operator.
pub(crate) fn prefix_binding_power(kind: SyntaxKind) -> Option<u8> {
    PREFIX_TABLE
        .iter()
        .find_map(|(k, entry)| (kind == *k).then_some(entry.bp))
}

/// Lookup the left and right binding powers of an infix operator.
pub(crate) fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8)> {
    INFIX_TABLE
        .iter()
        .find_map(|(k, entry)| (kind == *k).then_some((entry.l_bp, entry.r_bp)))
}
