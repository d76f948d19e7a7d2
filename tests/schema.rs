//! Parsing and analysing complete schemas.

mod test_util;

use dbml_parse::ast::SyntaxNode;
use dbml_parse::{CompileErrorCode, SymbolKind, analyze, parse};
use test_util::{BLOG, reconstruct, summary};

fn spanning<'a>(root: &'a SyntaxNode, src: &str, text: &str) -> &'a SyntaxNode {
    let start = src
        .find(text)
        .unwrap_or_else(|| panic!("{text:?} does not occur"));
    let span = start..start + text.len();
    root.descendants()
        .into_iter()
        .find(|n| n.span() == span)
        .unwrap_or_else(|| panic!("no node spans {text:?}"))
}

#[test]
fn blog_schema_is_clean() {
    let parsed = parse(BLOG);
    assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
    assert_eq!(parsed.elements().len(), 6);
    assert_eq!(reconstruct(parsed.program()), BLOG);

    let analysis = analyze(parsed.program());
    assert!(analysis.errors().is_empty(), "{:?}", analysis.errors());
    assert!(analysis.unresolved.is_empty());
}

#[test]
fn blog_symbols_are_reachable_from_the_public_schema() {
    let analysis = analyze(parse(BLOG).program());
    for path in [
        [(SymbolKind::Table, "users"), (SymbolKind::Column, "full name")],
        [(SymbolKind::Table, "posts"), (SymbolKind::Column, "user_id")],
        [(SymbolKind::Enum, "status"), (SymbolKind::EnumField, "draft")],
        [(SymbolKind::TableGroup, "core"), (SymbolKind::TableGroupField, "posts")],
    ] {
        assert!(analysis.lookup_path(&path).is_some(), "{path:?}");
    }
    assert_eq!(
        analysis.lookup_path(&[(SymbolKind::Table, "U")]),
        analysis.lookup_path(&[(SymbolKind::Table, "users")])
    );
}

#[test]
fn blog_references_bind_to_their_declarations() {
    let parsed = parse(BLOG);
    let analysis = analyze(parsed.program());
    let users_id = analysis.lookup_path(&[(SymbolKind::Table, "users"), (SymbolKind::Column, "id")]);
    assert!(users_id.is_some());

    let inline = spanning(parsed.program(), BLOG, "U.id");
    assert_eq!(analysis.reference(inline.id), users_id);
    let standalone = spanning(parsed.program(), BLOG, "users.id");
    assert_eq!(analysis.reference(standalone.id), users_id);
    let member = spanning(parsed.program(), BLOG, "status.draft");
    assert_eq!(
        analysis.reference(member.id),
        analysis.lookup_path(&[(SymbolKind::Enum, "status"), (SymbolKind::EnumField, "draft")])
    );
}

#[test]
fn syntax_and_semantic_errors_are_reported_separately() {
    let src = "Table users {\n  id int\n}\nRef: users.id > missing.id\nTable t {\n  id int [\n}";
    let parsed = parse(src);
    assert!(!parsed.errors().is_empty());
    assert_eq!(reconstruct(parsed.program()), src);

    let analysis = analyze(parsed.program());
    let missing = src.find("missing.id").unwrap_or_default();
    assert!(
        summary(analysis.errors()).contains(&(
            CompileErrorCode::TableNotFound.to_u16(),
            missing,
            missing + "missing.id".len()
        ))
    );
}
