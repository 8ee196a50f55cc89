use crate::{
    ast::ast::{Ast, AstKind, FunctionLiteral, Parameter},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    interner::strings::Symbol,
    operators::registry::{Associativity, OperatorGrammar, Precedence},
    Location,
};

use super::{parser::Parser, stmt::parse_block, types::parse_type};

pub fn parse_expression(parser: &mut Parser, min_precedence: Precedence) -> Result<Ast, Error> {
    let lhs = parse_primary(parser)?;
    parse_infix(parser, lhs, min_precedence)
}

/// Precedence climbing from an already parsed left operand.
///
/// An operand that ends with `}` ends the expression.
pub fn parse_infix(
    parser: &mut Parser,
    mut lhs: Ast,
    min_precedence: Precedence,
) -> Result<Ast, Error> {
    while let Some((op, grammar)) = lookahead_binop(parser)? {
        if grammar.precedence < min_precedence {
            break;
        }
        parser.advance()?;

        let mut rhs = parse_primary(parser)?;

        while let Some((_, next)) = lookahead_binop(parser)? {
            let binds_tighter = next.precedence > grammar.precedence
                || (next.precedence == grammar.precedence
                    && next.associativity == Associativity::Right);
            if !binds_tighter {
                break;
            }
            rhs = parse_infix(parser, rhs, next.precedence)?;
        }

        let location = Location::merge(&lhs.location, &rhs.location);
        lhs = Ast::new(
            AstKind::Binop {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
            location,
        );
    }

    Ok(lhs)
}

fn lookahead_binop(parser: &mut Parser) -> Result<Option<(Symbol, OperatorGrammar)>, Error> {
    if parser.previous_was_close_curly() {
        return Ok(None);
    }
    parser.lookahead_binop()
}

/// A basic expression followed by any number of `.index` and `(args)` suffixes.
///
/// Expressions ending with `}` take no suffixes.
pub fn parse_primary(parser: &mut Parser) -> Result<Ast, Error> {
    let mut node = parse_basic(parser)?;

    loop {
        if parser.previous_was_close_curly() {
            return Ok(node);
        }

        match parser.current_token_kind()? {
            TokenKind::Dot => {
                parser.advance()?;
                let right = parse_basic(parser)?;
                let location = Location::merge(&node.location, &right.location);
                node = Ast::new(
                    AstKind::Dot {
                        left: Box::new(node),
                        right: Box::new(right),
                    },
                    location,
                );
            }
            TokenKind::OpenParen => {
                parser.advance()?;
                let (arguments, close) = parse_comma_list(parser, TokenKind::CloseParen)?;
                let Some(close) = close else {
                    return Err(missing_r_paren(parser)?);
                };
                let location = Location::merge(&node.location, &close);
                node = Ast::new(
                    AstKind::Application {
                        callee: Box::new(node),
                        arguments,
                    },
                    location,
                );
            }
            _ => return Ok(node),
        }
    }
}

pub fn parse_basic(parser: &mut Parser) -> Result<Ast, Error> {
    let token = parser.current_token()?;
    let kind = token.kind;

    match parser.get_nud_lookup().get(&kind).copied() {
        Some(handler) => handler(parser),
        None => {
            let token = parser.current_token()?;
            Err(Error::new(
                ErrorImpl::UnknownBasicToken {
                    found: token.to_string(),
                },
                token.location,
            ))
        }
    }
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let token = parser.advance()?;

    let kind = match token.kind {
        TokenKind::Nil => AstKind::Nil,
        TokenKind::True => AstKind::Bool(true),
        TokenKind::False => AstKind::Bool(false),
        TokenKind::Int => match token.value.parse() {
            Ok(value) => AstKind::Int(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::LexError { token: token.value },
                    token.location,
                ))
            }
        },
        _ => {
            return Err(Error::new(
                ErrorImpl::UnknownBasicToken {
                    found: token.to_string(),
                },
                token.location,
            ))
        }
    };

    Ok(Ast::new(kind, token.location))
}

/// `name`, `name := affix` or `name = value`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let token = parser.advance()?;
    let name = parser.intern(&token.value);

    match parser.current_token_kind()? {
        TokenKind::Bind => {
            parser.advance()?;
            let affix = parse_expression(parser, 0)?;
            let location = Location::merge(&token.location, &affix.location);
            Ok(Ast::new(
                AstKind::Bind {
                    name,
                    affix: Box::new(affix),
                },
                location,
            ))
        }
        TokenKind::Assign => {
            parser.advance()?;
            let value = parse_expression(parser, 0)?;
            let location = Location::merge(&token.location, &value.location);
            Ok(Ast::new(
                AstKind::Assignment {
                    target: Box::new(Ast::new(AstKind::Variable(name), token.location)),
                    value: Box::new(value),
                },
                location,
            ))
        }
        _ => Ok(Ast::new(AstKind::Variable(name), token.location)),
    }
}

pub fn parse_unop_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let token = parser.advance()?;
    let op = parser.intern(&token.value);
    let operand = parse_primary(parser)?;

    let location = Location::merge(&token.location, &operand.location);
    Ok(Ast::new(
        AstKind::Unop {
            op,
            operand: Box::new(operand),
        },
        location,
    ))
}

/// `()`, `(e)`, `(e,)` and `(e1, e2, ...)`.
pub fn parse_paren_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let open = parser.advance()?;

    if parser.current_token_kind()? == TokenKind::CloseParen {
        let close = parser.advance()?;
        return Ok(Ast::new(
            AstKind::Tuple(vec![]),
            Location::merge(&open.location, &close.location),
        ));
    }

    let first = parse_expression(parser, 0)?;

    match parser.current_token_kind()? {
        TokenKind::CloseParen => {
            parser.advance()?;
            Ok(first)
        }
        TokenKind::Comma => {
            parser.advance()?;
            let (mut rest, close) = parse_comma_list(parser, TokenKind::CloseParen)?;
            let Some(close) = close else {
                return Err(missing_r_paren(parser)?);
            };

            let mut elements = vec![first];
            elements.append(&mut rest);
            Ok(Ast::new(
                AstKind::Tuple(elements),
                Location::merge(&open.location, &close),
            ))
        }
        _ => Err(missing_r_paren(parser)?),
    }
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let open = parser.advance()?;

    let (elements, close) = parse_comma_list(parser, TokenKind::CloseBracket)?;
    let Some(close) = close else {
        let token = parser.current_token()?;
        return Err(Error::new(
            ErrorImpl::MissingRBracket {
                found: token.to_string(),
            },
            token.location,
        ));
    };

    Ok(Ast::new(
        AstKind::Array(elements),
        Location::merge(&open.location, &close),
    ))
}

/// `if test then { .. } else { .. }`
pub fn parse_conditional_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let start = parser.advance()?;
    let test = parse_expression(parser, 0)?;

    parser.expect_error(TokenKind::Then, |found| ErrorImpl::MissingThen { found })?;
    let then_branch = parse_block(parser)?;

    parser.expect_error(TokenKind::Else, |found| ErrorImpl::MissingElse { found })?;
    let else_branch = parse_block(parser)?;

    let location = Location::merge(&start.location, &else_branch.location);
    Ok(Ast::new(
        AstKind::Conditional {
            test: Box::new(test),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        },
        location,
    ))
}

/// `while test do { .. }`
pub fn parse_while_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let start = parser.advance()?;
    let test = parse_expression(parser, 0)?;

    parser.expect_error(TokenKind::Do, |found| ErrorImpl::MissingDo { found })?;
    let body = parse_block(parser)?;

    let location = Location::merge(&start.location, &body.location);
    Ok(Ast::new(
        AstKind::While {
            test: Box::new(test),
            body: Box::new(body),
        },
        location,
    ))
}

/// `fn name(arg: Type, ...) [-> Type] { .. }`
///
/// Fails with `MissingFn` when called anywhere but on `fn`.
pub fn parse_function_expr(parser: &mut Parser) -> Result<Ast, Error> {
    let start = parser.expect_error(TokenKind::Fn, |found| ErrorImpl::MissingFn { found })?;

    let name_token = parser.expect_error(TokenKind::Identifier, |found| {
        ErrorImpl::MissingFnName { found }
    })?;
    let name = parser.intern(&name_token.value);

    parser.expect_error(TokenKind::OpenParen, |found| ErrorImpl::MissingLParen { found })?;

    let mut parameters = vec![];
    while parser.current_token_kind()? != TokenKind::CloseParen {
        let parameter_token = parser.expect_error(TokenKind::Identifier, |found| {
            ErrorImpl::MissingArgName { found }
        })?;
        parser.expect_error(TokenKind::Colon, |found| ErrorImpl::MissingColon { found })?;
        let annotation = parse_type(parser)?;

        parameters.push(Parameter {
            name: parser.intern(&parameter_token.value),
            location: Location::merge(&parameter_token.location, &annotation.location),
            annotation,
        });

        if !parser.eat(TokenKind::Comma)? {
            break;
        }
    }

    parser.expect_error(TokenKind::CloseParen, |found| ErrorImpl::MissingRParen { found })?;

    let return_annotation = if parser.eat(TokenKind::Arrow)? {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = parse_block(parser)?;
    let location = Location::merge(&start.location, &body.location);

    Ok(Ast::new(
        AstKind::Function(FunctionLiteral {
            name,
            parameters,
            return_annotation,
            body: Box::new(body),
        }),
        location,
    ))
}

/// Parses `e1, e2, ...` up to `close`, allowing a trailing comma.
///
/// Returns the closing location, or `None` when something other than a
/// comma or `close` followed an element. In that case the offending token
/// is left in lookahead position.
fn parse_comma_list(
    parser: &mut Parser,
    close: TokenKind,
) -> Result<(Vec<Ast>, Option<Location>), Error> {
    let mut elements = vec![];

    loop {
        let kind = parser.current_token_kind()?;
        if kind == close {
            let token = parser.advance()?;
            return Ok((elements, Some(token.location)));
        }
        if kind == TokenKind::End {
            return Ok((elements, None));
        }

        elements.push(parse_expression(parser, 0)?);

        if !parser.eat(TokenKind::Comma)? && parser.current_token_kind()? != close {
            return Ok((elements, None));
        }
    }
}

fn missing_r_paren(parser: &mut Parser) -> Result<Error, Error> {
    let token = parser.current_token()?;
    Ok(Error::new(
        ErrorImpl::MissingRParen {
            found: token.to_string(),
        },
        token.location,
    ))
}
