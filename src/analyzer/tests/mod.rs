//! Validation and binding over whole programs.


use crate::analyzer::CompileErrorCode;
use crate::{Analysis, analyze, parse};

fn codes(analysis: &Analysis) -> Vec<CompileErrorCode> {
    analysis.errors().iter().map(|e| e.code).collect()
}

// Analyse `src` even when it has syntax errors.
fn analyze_src(src: &str) -> Analysis {
    analyze(parse(src).program())
}
