//! Helpers for building inputs and asserting over parse and analysis
//! results in tests.
//!
//! Exposed to the crate's own tests and, behind the `test-support` feature,
//! to downstream consumers.

mod analysis;
mod assertions;
mod trees;

pub use analysis::{analyze_ok, node_spanning, span_of};
pub use assertions::{
    assert_codes, assert_no_errors, assert_single_error, assert_span_invariants,
};
pub use trees::{collect_tokens, first_element, parse_ok, reconstruct_source};
