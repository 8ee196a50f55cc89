use crate::{
    ast::types::{TypeAnnotation, TypeAnnotationKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Location,
};

use super::parser::Parser;

/// Parses a type annotation:
/// `Nil`, `Bool`, `Int`, `*T`, `[T; N]`, `(T, ...)` or `fn(T, ...) -> T`.
pub fn parse_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.current_token()?;
    let kind = token.kind;
    let value = token.value.clone();

    match kind {
        TokenKind::Identifier => {
            let kind = match value.as_str() {
                "Nil" => TypeAnnotationKind::Nil,
                "Bool" => TypeAnnotationKind::Bool,
                "Int" => TypeAnnotationKind::Int,
                _ => return Err(missing_type(parser)?),
            };
            let token = parser.advance()?;
            Ok(TypeAnnotation::new(kind, token.location))
        }
        // `**T` arrives as a single operator run
        TokenKind::Operator if value.chars().all(|c| c == '*') => {
            let start = parser.advance()?;
            let mut annotation = parse_type(parser)?;
            for _ in 0..value.len() {
                let location = Location::merge(&start.location, &annotation.location);
                annotation =
                    TypeAnnotation::new(TypeAnnotationKind::Pointer(Box::new(annotation)), location);
            }
            Ok(annotation)
        }
        TokenKind::OpenBracket => parse_array_type(parser),
        TokenKind::OpenParen => {
            let open = parser.advance()?;
            let (elements, close) = parse_type_list(parser)?;
            Ok(TypeAnnotation::new(
                TypeAnnotationKind::Tuple(elements),
                Location::merge(&open.location, &close),
            ))
        }
        TokenKind::Fn => parse_function_type(parser),
        _ => Err(missing_type(parser)?),
    }
}

fn parse_array_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let open = parser.advance()?;
    let element = parse_type(parser)?;

    parser.expect_error(TokenKind::Semicolon, |found| ErrorImpl::MissingSemicolon { found })?;

    let size_token = parser.current_token()?;
    let size = match (size_token.kind, size_token.value.parse::<usize>()) {
        (TokenKind::Int, Ok(size)) => size,
        _ => return Err(missing_type(parser)?),
    };
    parser.advance()?;

    let close = parser.expect_error(TokenKind::CloseBracket, |found| {
        ErrorImpl::MissingRBracket { found }
    })?;

    Ok(TypeAnnotation::new(
        TypeAnnotationKind::Array {
            element: Box::new(element),
            size,
        },
        Location::merge(&open.location, &close.location),
    ))
}

fn parse_function_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.advance()?;

    parser.expect_error(TokenKind::OpenParen, |found| ErrorImpl::MissingLParen { found })?;
    let (parameters, _) = parse_type_list(parser)?;

    parser.expect_error(TokenKind::Arrow, |found| ErrorImpl::MissingArgType { found })?;
    let return_type = parse_type(parser)?;

    let location = Location::merge(&start.location, &return_type.location);
    Ok(TypeAnnotation::new(
        TypeAnnotationKind::Function {
            parameters,
            return_type: Box::new(return_type),
        },
        location,
    ))
}

/// `T, ...)` with an optional trailing comma; the `(` is already consumed.
fn parse_type_list(parser: &mut Parser) -> Result<(Vec<TypeAnnotation>, Location), Error> {
    let mut elements = vec![];

    while parser.current_token_kind()? != TokenKind::CloseParen {
        elements.push(parse_type(parser)?);
        if !parser.eat(TokenKind::Comma)? {
            break;
        }
    }

    let close = parser.expect_error(TokenKind::CloseParen, |found| ErrorImpl::MissingRParen {
        found,
    })?;
    Ok((elements, close.location))
}

fn missing_type(parser: &mut Parser) -> Result<Error, Error> {
    let token = parser.current_token()?;
    Ok(Error::new(
        ErrorImpl::MissingArgType {
            found: token.to_string(),
        },
        token.location,
    ))
}
