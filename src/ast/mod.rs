/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree built by the parser
///
/// Submodules:
/// - ast: The node struct and the closed set of node kinds
/// - display: Source-like rendering of nodes
/// - types: Type annotations as written in function headers
pub mod ast;
pub mod display;
pub mod types;
