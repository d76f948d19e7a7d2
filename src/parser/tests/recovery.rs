//! Error recovery: every malformed input still yields a tree, the expected
//! diagnostics, and a parse of whatever follows the damage.

use super::codes;
use crate::ParsingErrorCode as E;
use crate::parse;
use crate::test_util::{assert_single_error, reconstruct_source};
use rstest::rstest;

#[test]
fn stray_bracket_unwinds_a_tuple_to_its_list() {
    let src = "Table t {\n  id int [default: (1, 2]\n}";
    let parsed = parse(src);
    assert_single_error(parsed.errors(), 1012, 29, 30);
    assert_eq!(
        parsed.program().to_sexpr(),
        "(program (element Table t (block (field (app id int (list (attr (ids default) : (tuple 1 2))))))))"
    );
}

#[test]
fn stray_parenthesis_in_a_block_is_skipped() {
    let src = "Table t {\n  )\n  id int\n}";
    let parsed = parse(src);
    assert_single_error(parsed.errors(), 1005, 12, 13);
    assert_eq!(
        parsed.program().to_sexpr(),
        "(program (element Table t (block (field (app id int)))))"
    );
}

#[test]
fn trailing_junk_on_a_line_is_skipped() {
    let src = "Table t {\n  id int )\n  name text\n}";
    let parsed = parse(src);
    assert_eq!(codes(&parsed), vec![E::ExpectedNewline]);
    assert_eq!(
        parsed.program().to_sexpr(),
        "(program (element Table t (block (field (app id int)) (field (app name text)))))"
    );
}

#[test]
fn unclosed_block_reports_its_opener() {
    let parsed = parse("Table t {\n  id int\n");
    assert_single_error(parsed.errors(), 1012, 8, 9);
    assert_eq!(
        parsed.program().to_sexpr(),
        "(program (element Table t (block (field (app id int)))))"
    );
}

#[test]
fn closing_brace_unwinds_open_groups() {
    let src = "Table t {\n  id int [note: (1\n}\nTable u {\n}";
    let parsed = parse(src);
    assert_eq!(
        codes(&parsed),
        vec![E::MissingClosingDelimiter, E::MissingClosingDelimiter]
    );
    assert_eq!(parsed.elements().len(), 2);
}

#[test]
fn top_level_garbage_lands_in_the_program() {
    let src = ")\nTable t {\n}";
    let parsed = parse(src);
    assert_single_error(parsed.errors(), 1008, 0, 1);
    let program = parsed
        .program()
        .as_program()
        .unwrap_or_else(|| panic!("root is not a program"));
    let invalid: Vec<_> = program
        .invalid
        .iter()
        .filter(|t| t.is_invalid)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(invalid, vec![")"]);
    assert_eq!(parsed.program().to_sexpr(), "(program (element Table t (block)))");
}

#[test]
fn missing_body_does_not_swallow_the_next_element() {
    let src = "Table users\nTable posts {\n}";
    let parsed = parse(src);
    assert_single_error(parsed.errors(), 1009, 12, 17);
    assert_eq!(
        parsed.program().to_sexpr(),
        "(program (element Table users) (element Table posts (block)))"
    );
}

#[test]
fn missing_body_skips_to_the_next_opener() {
    let src = "Table users 1 2 {\n}";
    let parsed = parse(src);
    assert_eq!(codes(&parsed), vec![E::InvalidElementName]);
    assert_eq!(parsed.program().to_sexpr(), "(program (element Table users (block)))");
}

#[test]
fn glued_terms_report_a_missing_space() {
    let src = "Table t {\n  id varchar(255)[pk]\n}";
    let parsed = parse(src);
    assert_single_error(parsed.errors(), 1013, 27, 28);
    assert_eq!(
        parsed.program().to_sexpr(),
        "(program (element Table t (block (field (app id (call varchar (group 255)) (list (attr (ids pk))))))))"
    );
}

#[rstest]
#[case("Table t [: x] {}", E::EmptyAttributeName)]
#[case("Table t [note:] {}", E::ExpectedAttributeValue)]
#[case("Ref: users.", E::ExpectedMember)]
#[case("Note: 'unterminated", E::UnterminatedString)]
#[case("Table t { id int ? }", E::UnknownSymbol)]
fn first_diagnostic(#[case] src: &str, #[case] code: E) {
    let parsed = parse(src);
    assert_eq!(codes(&parsed).first(), Some(&code), "{:?}", parsed.errors());
}

#[rstest]
#[case(")")]
#[case("}}}")]
#[case("Table")]
#[case("Table t {")]
#[case("Table t { id int [")]
#[case("Table t { id int [note: (]")]
#[case("Ref: a.b > ")]
#[case("Enum e {\n  a\n  b [note:\n}\nTable x {}")]
#[case("Table t {\n  ((((\n}")]
#[case("Project p {\n  database_type: 'pg'\n  ] ) }\n}")]
#[case("'dangling\nTable t {}")]
#[case("Table t as {\n}")]
fn malformed_input_still_covers_every_byte(#[case] src: &str) {
    let parsed = parse(src);
    assert!(!parsed.errors().is_empty(), "expected errors for {src:?}");
    assert_eq!(reconstruct_source(parsed.program()), src);
}

#[rstest]
#[case("Table u {\n  x int -\n  y text\n}", 1007, 18, 19)]
#[case("Table u {\n  x users.\n  y text\n}", 1017, 19, 20)]
#[case("Table u {\n  x int\n  -\n  y text\n}", 1007, 20, 21)]
fn line_final_operator_leaves_the_next_line_alone(
    #[case] src: &str,
    #[case] code: u16,
    #[case] start: usize,
    #[case] end: usize,
) {
    let parsed = parse(src);
    assert_single_error(parsed.errors(), code, start, end);
    let sexpr = parsed.program().to_sexpr();
    assert!(sexpr.ends_with("(field (app y text)))))"), "{sexpr}");
    assert_eq!(reconstruct_source(parsed.program()), src);
}

#[test]
fn line_final_operator_leaves_the_next_element_alone() {
    let src = "Ref: a.id > a.id +\nTable b {\n  id int\n}";
    let parsed = parse(src);
    assert_single_error(parsed.errors(), 1007, 17, 18);
    let keywords: Vec<_> = parsed
        .elements()
        .iter()
        .filter_map(|e| e.as_element())
        .map(|e| e.keyword.value.as_str())
        .collect();
    assert_eq!(keywords, vec!["Ref", "Table"]);
    assert_eq!(reconstruct_source(parsed.program()), src);
}

#[test]
fn operators_may_wrap_inside_brackets() {
    let parsed = parse("Table u {\n  x int [default: 1 +\n    2]\n}");
    assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
}

#[rstest]
#[case(format!("Note: {}1{}", "(".repeat(10_000), ")".repeat(10_000)))]
#[case(format!("Note: {}1", "-".repeat(10_000)))]
#[case(format!("Note: a{}", ".a".repeat(10_000)))]
#[case(format!("Note: f{}", "()".repeat(10_000)))]
#[case(format!("{}{}", "Table t {\n".repeat(10_000), "}\n".repeat(10_000)))]
fn deep_nesting_is_cut_off(#[case] src: String) {
    let parsed = parse(&src);
    assert!(codes(&parsed).contains(&E::NestingTooDeep));
    assert_eq!(parsed.elements().len(), 1);
    assert_eq!(reconstruct_source(parsed.program()), src);
}

#[test]
fn deep_groups_still_close_their_outer_levels() {
    let src = format!("Note: {}1{}\nTable t {{\n}}", "(".repeat(200), ")".repeat(200));
    let parsed = parse(&src);
    assert_eq!(codes(&parsed), vec![E::NestingTooDeep]);
    assert_eq!(parsed.elements().len(), 2);
}

#[test]
fn non_ascii_element_name_is_rejected() {
    let parsed = parse("Table usér {\n}");
    let codes = codes(&parsed);
    assert!(codes.contains(&E::UnknownSymbol), "{codes:?}");
    assert!(codes.contains(&E::InvalidElementName), "{codes:?}");
    assert_eq!(parsed.elements().len(), 1);
}
