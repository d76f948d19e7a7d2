//! Offset queries over whole sources.

mod containers;
mod context;

use crate::Compiler;

/// Source with the `|` marker removed, and the marker's offset.
fn cursor(marked: &str) -> (String, usize) {
    let offset = marked
        .find('|')
        .unwrap_or_else(|| panic!("{marked:?} has no cursor marker"));
    (marked.replacen('|', "", 1), offset)
}

fn compiler_at(marked: &str) -> (Compiler, usize) {
    let (src, offset) = cursor(marked);
    (Compiler::new(src), offset)
}
