use rstest::rstest;

use super::compiler_at;
use crate::compiler::TokenRole;
use crate::parser::ast::NodeShape;
use crate::{ScopeKind, SymbolKind, SyntaxKind};

#[rstest]
#[case::multi_line("Table users {\n  id int\n  Indexes {\n    (|id)\n  }\n}")]
#[case::one_line("Table users {\n  id int\n  Indexes { (|id) }\n}")]
fn indexes_see_the_enclosing_table(#[case] marked: &str) {
    let (compiler, offset) = compiler_at(marked);
    let scope = compiler.scope(offset);
    assert_eq!(scope.kind, ScopeKind::Indexes);

    let analysis = compiler.analysis();
    let users = analysis.lookup_path(&[(SymbolKind::Table, "users")]);
    assert_eq!(Some(scope.symbol), users);
    let table = analysis.symbol(scope.symbol).and_then(|s| s.table.as_ref());
    assert!(table.is_some_and(|t| t.get(SymbolKind::Column, "id").is_some()));
}

#[test]
fn columns_are_scoped_by_their_table() {
    let (compiler, offset) = compiler_at("Table users {\n  i|d int\n}");
    let stack = compiler.container_stack(offset);
    assert_eq!(stack.frames.first().map(|f| f.shape), Some(NodeShape::Program));
    assert!(stack.shapes().contains(&NodeShape::FieldDeclaration));
    assert_eq!(
        stack.token.as_ref().map(|t| (t.kind, t.role)),
        Some((SyntaxKind::T_IDENT, TokenRole::Significant))
    );
    assert_eq!(compiler.scope(offset).kind, ScopeKind::Table);
}

#[test]
fn blank_line_between_elements_is_top_level() {
    let (compiler, offset) = compiler_at("Table a {\n  id int\n}\n|\nTable b {\n  id int\n}");
    let stack = compiler.container_stack(offset);
    assert_eq!(stack.shapes(), vec![NodeShape::Program]);
    assert_eq!(stack.token.as_ref().map(|t| t.role), Some(TokenRole::Trivia));

    let scope = compiler.scope(offset);
    assert_eq!(scope.kind, ScopeKind::TopLevel);
    assert_eq!(scope.element, None);
    assert_eq!(scope.symbol, compiler.analysis().public_schema);
}

#[test]
fn trailing_comment_leaves_the_field() {
    let (compiler, offset) = compiler_at("Table users {\n  id int // pri|mary\n}");
    let stack = compiler.container_stack(offset);
    assert_eq!(
        stack.shapes(),
        vec![NodeShape::Program, NodeShape::ElementDeclaration, NodeShape::Block]
    );
    assert_eq!(stack.token.as_ref().map(|t| t.role), Some(TokenRole::Trivia));
    assert_eq!(compiler.scope(offset).kind, ScopeKind::Table);
}

#[test]
fn comment_before_closing_brace_stays_in_the_block() {
    let (compiler, offset) = compiler_at("Table users {\n  id int\n  // no|te\n}");
    let stack = compiler.container_stack(offset);
    assert_eq!(
        stack.innermost().map(|f| f.shape),
        Some(NodeShape::Block)
    );
    assert_eq!(compiler.scope(offset).kind, ScopeKind::Table);
}

#[test]
fn end_of_source_is_covered_by_the_eof_token() {
    let (compiler, offset) = compiler_at("Table users {\n  id int\n}|");
    let stack = compiler.container_stack(offset);
    assert_eq!(stack.shapes(), vec![NodeShape::Program]);
    assert_eq!(stack.token.as_ref().map(|t| t.kind), Some(SyntaxKind::T_EOF));
    assert_eq!(compiler.scope(offset).kind, ScopeKind::TopLevel);
}

#[test]
fn unknown_elements_open_a_custom_scope() {
    let (compiler, offset) = compiler_at("Project p {\n  database_type: 'Post|greSQL'\n}");
    let stack = compiler.container_stack(offset);
    let elements = stack
        .frames
        .iter()
        .filter_map(|f| f.element)
        .collect::<Vec<_>>();
    assert_eq!(
        elements,
        vec![crate::ElementKind::Project, crate::ElementKind::Custom]
    );
    assert_eq!(compiler.scope(offset).kind, ScopeKind::Custom);
}
