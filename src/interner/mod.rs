//! Interning for identifiers, operators and types.
//!
//! Both interners are append-only arenas that hand out small `Copy`
//! handles. Structurally equal inputs always map to the same handle, so
//! handle equality is the equality used everywhere else in the crate.

pub mod strings;
pub mod types;
