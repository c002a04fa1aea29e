//! Conflict-resolution engine: decides whether a declared set of
//! package/version pairs triggers a known conflict.
//!
//! Everything in this crate is a pure function over string inputs and the
//! static rule data: no I/O, no shared mutable state, no error paths.
//! Malformed input degrades (lenient matching, skipped packages) instead of
//! failing, so a scan always produces a result.

pub mod checker;
pub mod compat;
pub mod specifier;
pub mod version;
