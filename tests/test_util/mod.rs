//! Shared fixtures for integration tests.
//!
//! Kept independent of the crate's `test_util` module so these tests build
//! without the `test-support` feature.

#![expect(
    dead_code,
    reason = "each test binary uses a different subset of the helpers"
)]

use dbml_parse::{Diagnostic, ast::SyntaxNode};

/// A schema exercising every element kind, free of errors.
pub const BLOG: &str = concat!(
    "// users and their posts\n",
    "Project blog {\n",
    "  database_type: 'PostgreSQL'\n",
    "  Note: 'Blog schema'\n",
    "}\n\n",
    "Enum status {\n  draft\n  published [note: 'visible']\n}\n\n",
    "Table users as U [headercolor: #3498db] {\n",
    "  id integer [pk, increment] // surrogate key\n",
    "  \"full name\" varchar(255) [not null, note: 'display']\n",
    "  created_at timestamp [default: `now()`]\n",
    "  Indexes {\n",
    "    (id, created_at) [unique, name: 'ix']\n",
    "  }\n",
    "}\n\n",
    "Table posts {\n",
    "  id integer [primary key]\n",
    "  user_id integer [ref: > U.id]\n",
    "  state status [default: status.draft]\n",
    "}\n\n",
    "Ref: posts.user_id > users.id [delete: set null]\n",
    "TableGroup core {\n  users\n  posts\n}\n",
);

/// Source with the `|` marker removed, and the marker's offset.
pub fn cursor(marked: &str) -> (String, usize) {
    let offset = marked
        .find('|')
        .unwrap_or_else(|| panic!("{marked:?} has no cursor marker"));
    (marked.replacen('|', "", 1), offset)
}

/// Concatenate every token and its trivia beneath `node`.
pub fn reconstruct(node: &SyntaxNode) -> String {
    let mut out = String::new();
    for token in node.tokens() {
        for trivia in &token.leading_trivia {
            out.push_str(&trivia.value);
        }
        out.push_str(&token.value);
        for trivia in &token.trailing_trivia {
            out.push_str(&trivia.value);
        }
    }
    out
}

/// `(code, start, end)` of each diagnostic.
pub fn summary<D: Diagnostic>(diagnostics: &[D]) -> Vec<(u16, usize, usize)> {
    diagnostics
        .iter()
        .map(|d| {
            let span = d.span();
            (d.code(), span.start, span.end)
        })
        .collect()
}
