//! Lossless round trips and structural invariants over whole programs.

use crate::parse;
use crate::test_util::{assert_span_invariants, collect_tokens, reconstruct_source};
use rstest::{fixture, rstest};

#[fixture]
fn schema() -> &'static str {
    concat!(
        "// users and their posts\n",
        "Project blog {\n",
        "  database_type: 'PostgreSQL'\n",
        "  Note: '''\n    Blog schema\n  '''\n",
        "}\n\n",
        "Table users as U [headercolor: #3498db] {\n",
        "  id integer [pk, increment] // surrogate key\n",
        "  \"full name\" varchar(255) [not null, note: 'display']\n",
        "  created_at timestamp [default: `now()`]\n",
        "  Indexes {\n",
        "    (id, created_at) [unique, name: 'ix']\n",
        "  }\n",
        "}\n",
        "/* block\n   comment */\n",
        "Enum status {\n  active\n  \"on hold\" [note: 'paused']\n}\n",
        "Ref: posts.user_id > users.id [delete: set null]\n",
        "TableGroup core {\n  users\n  posts\n}\n",
    )
}

#[rstest]
fn well_formed_schema_round_trips(schema: &str) {
    let parsed = parse(schema);
    assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
    assert_eq!(parsed.elements().len(), 5);
    assert_eq!(reconstruct_source(parsed.program()), schema);
}

#[rstest]
fn spans_nest_and_order(schema: &str) {
    let parsed = parse(schema);
    assert_span_invariants(parsed.program());
    assert_eq!(parsed.program().full_span(), 0..schema.len());
}

#[rstest]
#[case("Table t {\n  id int [\n}\nTable u { x y }")]
#[case(") ] } Table t {}")]
#[case("Ref: a.b > [x: (1, 2]\n")]
fn spans_hold_after_recovery(#[case] src: &str) {
    let parsed = parse(src);
    assert_span_invariants(parsed.program());
    assert_eq!(reconstruct_source(parsed.program()), src);
}

#[rstest]
fn parsing_is_deterministic(schema: &str) {
    let first = parse(schema);
    let second = parse(schema);
    assert_eq!(first.program().to_sexpr(), second.program().to_sexpr());
    assert_eq!(first.errors(), second.errors());
}

#[rstest]
fn node_ids_are_unique(schema: &str) {
    let parsed = parse(schema);
    let mut ids: Vec<_> = parsed.program().descendants().iter().map(|n| n.id).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[rstest]
fn tokens_appear_in_source_order(schema: &str) {
    let parsed = parse(schema);
    let tokens = collect_tokens(parsed.program());
    for pair in tokens.windows(2) {
        if let [a, b] = pair {
            assert_eq!(a.end, b.start, "gap between {a:?} and {b:?}");
        }
    }
}

#[test]
fn empty_source_is_an_empty_program() {
    let parsed = parse("");
    assert!(parsed.errors().is_empty());
    assert_eq!(parsed.program().to_sexpr(), "(program)");
    assert_eq!(parsed.program().full_span(), 0..0);
}
