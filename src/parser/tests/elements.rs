//! Tests for element declarations and block bodies.

use super::{codes, program_sexpr};
use crate::parser::ast::NodeShape;
use crate::test_util::{first_element, parse_ok};
use rstest::rstest;

#[rstest]
#[case("Note: 'hi'", "(program (element Note (: 'hi')))")]
#[case("Table users {\n}", "(program (element Table users (block)))")]
#[case("Table public.users {}", "(program (element Table (. public users) (block)))")]
#[case(
    "Ref: users.id > posts.user_id",
    "(program (element Ref (: (> (. users id) (. posts user_id)))))"
)]
#[case(
    "Ref fk: a.b - c.d",
    "(program (element Ref fk (: (- (. a b) (. c d)))))"
)]
#[case(
    "Table users as U [headercolor: #fff] {}",
    "(program (element Table users (as U) (list (attr (ids headercolor) : #fff)) (block)))"
)]
#[case("Table users\n{\n}", "(program (element Table users (block)))")]
fn element_headers(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(parse_ok(src).program().to_sexpr(), expected);
}

#[test]
fn table_body_statements() {
    let src = "Table users {\n  id int [pk, increment]\n  name varchar(255) [not null]\n  Note: 'people'\n}";
    let expected = concat!(
        "(program (element Table users (block ",
        "(field (app id int (list (attr (ids pk)) (attr (ids increment))))) ",
        "(field (app name (call varchar (group 255)) (list (attr (ids not null))))) ",
        "(element Note (: 'people')))))"
    );
    assert_eq!(parse_ok(src).program().to_sexpr(), expected);
}

#[test]
fn settings_accept_identifier_streams() {
    let src = "Ref: a.b > c.d [delete: set null, update: cascade]";
    let expected = concat!(
        "(program (element Ref (: (app (> (. a b) (. c d)) ",
        "(list (attr (ids delete) : (ids set null)) (attr (ids update) : cascade))))))"
    );
    assert_eq!(parse_ok(src).program().to_sexpr(), expected);
}

#[test]
fn nested_indexes_block() {
    let src = "Table t {\n  id int\n  indexes {\n    (a, b) [unique]\n    created_at\n  }\n}";
    let expected = concat!(
        "(program (element Table t (block (field (app id int)) ",
        "(element indexes (block (field (app (tuple a b) (list (attr (ids unique))))) ",
        "(field created_at))))))"
    );
    assert_eq!(parse_ok(src).program().to_sexpr(), expected);
}

#[test]
fn separated_parenthesis_starts_an_argument() {
    assert_eq!(
        program_sexpr("Table t {\n  price decimal (10, 2)\n}"),
        "(program (element Table t (block (field (app price decimal (tuple 10 2))))))"
    );
}

#[test]
fn brace_on_the_next_line_opens_a_nested_element() {
    let src = "Table t {\n  Note\n  {\n    'x'\n  }\n}";
    assert_eq!(
        parse_ok(src).program().to_sexpr(),
        "(program (element Table t (block (element Note (block (field 'x'))))))"
    );
}

#[test]
fn body_shapes_are_exposed() {
    let parsed = parse_ok("Table t {\n}\nNote: 'x'");
    let [table, note] = parsed.elements() else {
        panic!("expected two elements");
    };
    let table = table.as_element().unwrap_or_else(|| panic!("not an element"));
    let note = note.as_element().unwrap_or_else(|| panic!("not an element"));
    assert!(table.has_complex_body() && !table.has_simple_body());
    assert!(note.has_simple_body() && !note.has_complex_body());
}

#[test]
fn element_spans_exclude_trivia() {
    let src = "// header\nTable t {\n}  \n";
    let parsed = parse_ok(src);
    let table = first_element(&parsed);
    assert_eq!(table.shape(), NodeShape::ElementDeclaration);
    assert_eq!(table.span(), 10..21);
    assert_eq!(table.full_span(), 0..src.len());
}

#[test]
fn elements_on_one_line_are_rejected() {
    let parsed = crate::parse("Table a {} Table b {}");
    assert_eq!(codes(&parsed), vec![crate::ParsingErrorCode::ExpectedNewline]);
    assert_eq!(parsed.elements().len(), 1);
}
