use std::collections::HashMap;

use crate::{ast::ast::Ast, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::parse_block};

pub type NUDHandler = fn(&mut Parser<'_>) -> Result<Ast, Error>;

// Lookup table inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and names
    parser.nud(TokenKind::Nil, parse_literal_expr);
    parser.nud(TokenKind::True, parse_literal_expr);
    parser.nud(TokenKind::False, parse_literal_expr);
    parser.nud(TokenKind::Int, parse_literal_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);

    // Prefix operators
    parser.nud(TokenKind::Operator, parse_unop_expr);

    // Compound
    parser.nud(TokenKind::OpenParen, parse_paren_expr);
    parser.nud(TokenKind::OpenBracket, parse_array_expr);
    parser.nud(TokenKind::OpenCurly, parse_block);

    // Control flow and functions
    parser.nud(TokenKind::If, parse_conditional_expr);
    parser.nud(TokenKind::While, parse_while_expr);
    parser.nud(TokenKind::Fn, parse_function_expr);
}
