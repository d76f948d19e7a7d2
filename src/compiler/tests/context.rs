use rstest::rstest;

use super::compiler_at;
use crate::ElementKind;
use crate::compiler::{ElementSlot, SettingContext};

#[rstest]
#[case::keyword("Ta|ble users as U [note: 'x'] {\n  id int\n}", ElementSlot::Type)]
#[case::name("Table us|ers as U [note: 'x'] {\n  id int\n}", ElementSlot::Name)]
#[case::alias("Table users as |U [note: 'x'] {\n  id int\n}", ElementSlot::Alias)]
#[case::settings("Table users as U [no|te: 'x'] {\n  id int\n}", ElementSlot::Settings)]
#[case::body("Table users as U [note: 'x'] {\n  i|d int\n}", ElementSlot::Body)]
fn slot_follows_the_declaration_parts(#[case] marked: &str, #[case] slot: ElementSlot) {
    let (compiler, offset) = compiler_at(marked);
    let context = compiler.context(offset);
    let element = context.element.unwrap_or_else(|| panic!("offset is inside the table"));
    assert_eq!(element.kind, ElementKind::Table);
    assert_eq!(element.slot, slot);
}

#[test]
fn top_level_has_no_element() {
    let (compiler, offset) = compiler_at("Table a {\n  id int\n}\n|\n");
    let context = compiler.context(offset);
    assert_eq!(context.element, None);
    assert_eq!(context.subfield, None);
    assert_eq!(context.setting, None);
}

#[rstest]
#[case::column_name("Table users {\n  i|d int [pk]\n}", Some(0))]
#[case::column_type("Table users {\n  id in|t [pk]\n}", Some(1))]
#[case::setting_list("Table users {\n  id int [p|k]\n}", None)]
fn argument_is_the_term_at_the_offset(#[case] marked: &str, #[case] argument: Option<usize>) {
    let (compiler, offset) = compiler_at(marked);
    let context = compiler.context(offset);
    let subfield = context.subfield.unwrap_or_else(|| panic!("offset is inside a column"));
    assert_eq!(subfield.argument, argument);
}

#[test]
fn simple_body_is_its_own_subfield() {
    let (compiler, offset) = compiler_at("Note: 'hel|lo'");
    let context = compiler.context(offset);
    assert_eq!(context.element.map(|e| (e.kind, e.slot)), Some((ElementKind::Note, ElementSlot::Body)));
    assert_eq!(context.subfield.and_then(|s| s.argument), Some(0));
}

#[rstest]
#[case::name("Table users {\n  id int [p|k]\n}", "pk", false)]
#[case::value("Table users {\n  id int [default: |1]\n}", "default", true)]
#[case::spaced_name("Table users {\n  id int [primary k|ey]\n}", "primary key", false)]
#[case::element_list("Table users [headercolor: #3|498db] {\n  id int\n}", "headercolor", true)]
fn setting_under_the_offset(#[case] marked: &str, #[case] name: &str, #[case] in_value: bool) {
    let (compiler, offset) = compiler_at(marked);
    let context = compiler.context(offset);
    assert_eq!(
        context.setting,
        Some(SettingContext {
            name: name.to_string(),
            in_value,
        })
    );
}

#[test]
fn context_carries_the_scope() {
    let (compiler, offset) = compiler_at("Enum status {\n  act|ive\n}");
    let context = compiler.context(offset);
    assert_eq!(context.scope, *compiler.scope(offset));
    assert_eq!(context.scope.kind, crate::ScopeKind::Enum);
}
