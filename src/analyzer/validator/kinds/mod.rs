//! Rule tables, one module per element kind.

pub(super) mod custom;
pub(super) mod enum_decl;
pub(super) mod indexes;
pub(super) mod note;
pub(super) mod project;
pub(super) mod ref_decl;
pub(super) mod table;
pub(super) mod table_group;
