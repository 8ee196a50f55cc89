//! Lexical analysis.
//!
//! The lexer turns source text into tokens one at a time. It is a pull
//! source: callers may `feed` it more text (for example one line at a time)
//! and keep pulling, and the scan position survives across feeds.
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, integers and operator runs
//! - Line/column tracking for every token
//! - `//` comments and whitespace are skipped

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
