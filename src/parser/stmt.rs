use crate::{
    ast::ast::{Ast, AstKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Location,
};

use super::{expr::parse_expression, parser::Parser};

/// A statement is an expression followed by `;`.
///
/// The `;` may be left out after an expression that ends with `}`. In that
/// case only already buffered text is checked for it.
pub fn parse_stmt(parser: &mut Parser) -> Result<Ast, Error> {
    let token = parser.current_token()?;
    if token.kind == TokenKind::End {
        return Err(Error::new(ErrorImpl::EndOfFile, token.location));
    }

    parse_terminated(parser)
}

fn parse_terminated(parser: &mut Parser) -> Result<Ast, Error> {
    let expression = parse_expression(parser, 0)?;

    if parser.previous_was_close_curly() {
        parser.eat_buffered(TokenKind::Semicolon)?;
    } else {
        parser.expect_error(TokenKind::Semicolon, |found| ErrorImpl::MissingSemicolon {
            found,
        })?;
    }

    Ok(expression)
}

pub fn parse_block(parser: &mut Parser) -> Result<Ast, Error> {
    let open = parser.expect_error(TokenKind::OpenCurly, |found| ErrorImpl::MissingLBrace {
        found,
    })?;

    let mut statements = vec![];

    loop {
        let token = parser.current_token()?;
        match token.kind {
            TokenKind::CloseCurly => break,
            TokenKind::End => {
                return Err(Error::new(
                    ErrorImpl::MissingRBrace {
                        found: token.to_string(),
                    },
                    token.location,
                ))
            }
            _ => statements.push(parse_terminated(parser)?),
        }
    }

    let close = parser.expect_error(TokenKind::CloseCurly, |found| ErrorImpl::MissingRBrace {
        found,
    })?;

    Ok(Ast::new(
        AstKind::Block(statements),
        Location::merge(&open.location, &close.location),
    ))
}
