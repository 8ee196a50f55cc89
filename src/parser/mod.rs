//! Parser module for building the syntax tree.
//!
//! This module contains the parser that turns the token stream into
//! [`Ast`](crate::ast::ast::Ast) nodes, one statement at a time. Binary
//! operators are parsed by precedence climbing over the grammar registered
//! in the [`Context`](crate::Context); everything else is recursive descent
//! with basic expressions dispatched through a NUD lookup table.
//!
//! - Statement parsing and blocks
//! - Expression parsing (operators, suffixes, literals, control flow)
//! - Type annotations in function headers
//! - Requesting more input when the buffered source runs out

pub mod expr;
pub mod input;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
