//! High-level operations wiring CLI commands to the scanner, the
//! conflict-resolution engine, and the static databases.

pub mod ops_check;
pub mod ops_list;
pub mod ops_suggest;
pub mod ops_validate;
