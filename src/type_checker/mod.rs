//! Type checking module.
//!
//! Walks the syntax tree bottom-up and assigns every node a type, recording
//! it in the node's write-once type slot. Along the way it:
//!
//! - Resolves names through the scope chain
//! - Resolves operators against the registered overloads
//! - Checks function signatures, applications and tuple indexing
//!
//! The scope chain lives in the [`Context`](crate::Context), so bindings
//! made at the outermost level stay visible to later statements.

pub mod environment;
pub mod type_checker;
