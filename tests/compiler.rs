//! Editor queries over a complete schema.

mod test_util;

use std::rc::Rc;

use dbml_parse::compiler::{ElementSlot, SettingContext};
use dbml_parse::{Compiler, ElementKind, ScopeKind, SymbolKind};
use test_util::{BLOG, cursor};

fn offset_of(text: &str) -> usize {
    BLOG.find(text)
        .unwrap_or_else(|| panic!("{text:?} does not occur"))
}

#[test]
fn index_columns_are_looked_up_in_their_table() {
    let compiler = Compiler::new(BLOG);
    let scope = compiler.scope(offset_of("(id, created_at)") + 1);
    assert_eq!(scope.kind, ScopeKind::Indexes);
    assert_eq!(
        Some(scope.symbol),
        compiler.analysis().lookup_path(&[(SymbolKind::Table, "users")])
    );
}

#[test]
fn inline_reference_value_is_a_setting_value() {
    let compiler = Compiler::new(BLOG);
    let context = compiler.context(offset_of("U.id"));
    assert_eq!(context.scope.kind, ScopeKind::Table);
    assert_eq!(
        context.element.map(|e| (e.kind, e.slot)),
        Some((ElementKind::Table, ElementSlot::Body))
    );
    assert_eq!(context.subfield.and_then(|s| s.argument), None);
    assert_eq!(
        context.setting,
        Some(SettingContext {
            name: "ref".to_string(),
            in_value: true,
        })
    );
}

#[test]
fn project_fields_are_custom_elements() {
    let compiler = Compiler::new(BLOG);
    let context = compiler.context(offset_of("PostgreSQL"));
    assert_eq!(context.scope.kind, ScopeKind::Custom);
    assert_eq!(context.element.map(|e| e.kind), Some(ElementKind::Custom));
}

#[test]
fn typing_into_a_new_source_recomputes() {
    let mut compiler = Compiler::new(BLOG);
    let before = compiler.analysis();
    assert!(before.errors().is_empty());

    let (edited, offset) = cursor("Table users {\n  id int [re|]\n}");
    compiler.set_source(edited);
    let after = compiler.analysis();
    assert!(!Rc::ptr_eq(&before, &after));
    let context = compiler.context(offset);
    assert_eq!(context.setting.as_ref().map(|s| s.name.as_str()), Some("re"));
    assert!(Rc::ptr_eq(&compiler.context(offset), &compiler.context(offset)));
}
