//! Operator tables consulted by both the parser and the type checker.
//!
//! Grammar metadata (precedence and associativity) and semantic overloads
//! are stored side by side but looked up independently: the parser only ever
//! asks for grammar, the checker only ever asks for overloads. An operator
//! the parser has never heard of still parses with the default grammar, and
//! the checker is the one place that turns it into `UnknownBinop`.

pub mod builtins;
pub mod registry;
