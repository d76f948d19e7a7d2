//! Pratt parser for DBML normal-form expressions.
//!
//! The implementation is split across submodules: [`pratt`] hosts the
//! binding-power loop and calls, [`prefix`] handles operands and prefix
//! operators, [`infix`] folds infix operators and member access, and
//! [`collections`] parses tuples, groups, lists and attributes.

mod collections;
mod infix;
mod pratt;
mod prefix;
