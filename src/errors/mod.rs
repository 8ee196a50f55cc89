//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout lexing, parsing,
//! type checking and operator registration. It includes:
//!
//! - Error structures carrying a source location
//! - A fieldless error code per failure kind
//! - Error formatting and suggestion tips

pub mod errors;
