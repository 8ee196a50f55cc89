//! Unit tests for the lexer module.
//!
//! - Keywords and identifiers
//! - Integer literals
//! - Operator runs and punctuation
//! - Comments and locations
//! - Incremental feeding
//! - Error tokens

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};
use crate::{errors::errors::ErrorCode, Location};

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("nil true false if then else while do fn").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Nil);
    assert_eq!(tokens[1].kind, TokenKind::True);
    assert_eq!(tokens[2].kind, TokenKind::False);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Then);
    assert_eq!(tokens[5].kind, TokenKind::Else);
    assert_eq!(tokens[6].kind, TokenKind::While);
    assert_eq!(tokens[7].kind, TokenKind::Do);
    assert_eq!(tokens[8].kind, TokenKind::Fn);
    assert_eq!(tokens[9].kind, TokenKind::End);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore iffy").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "iffy");
    assert_eq!(tokens[5].kind, TokenKind::End);
}

#[test]
fn test_tokenize_integers() {
    let tokens = tokenize("42 0 100").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
    assert_eq!(tokens[3].kind, TokenKind::End);
}

#[test]
fn test_tokenize_operator_runs() {
    let tokens = tokenize("+ - * == != <= && <+> = ->").unwrap();

    let operators = tokens[..8]
        .iter()
        .map(|token| (token.kind, token.value.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        operators,
        vec![
            (TokenKind::Operator, "+"),
            (TokenKind::Operator, "-"),
            (TokenKind::Operator, "*"),
            (TokenKind::Operator, "=="),
            (TokenKind::Operator, "!="),
            (TokenKind::Operator, "<="),
            (TokenKind::Operator, "&&"),
            (TokenKind::Operator, "<+>"),
        ]
    );
    assert_eq!(tokens[8].kind, TokenKind::Assign);
    assert_eq!(tokens[9].kind, TokenKind::Arrow);
    assert_eq!(tokens[10].kind, TokenKind::End);
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = tokenize("( ) { } [ ] . , ; : :=").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Dot);
    assert_eq!(tokens[7].kind, TokenKind::Comma);
    assert_eq!(tokens[8].kind, TokenKind::Semicolon);
    assert_eq!(tokens[9].kind, TokenKind::Colon);
    assert_eq!(tokens[10].kind, TokenKind::Bind);
    assert_eq!(tokens[11].kind, TokenKind::End);
}

#[test]
fn test_bind_without_spaces() {
    let tokens = tokenize("x:=-1;").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Bind);
    assert_eq!(tokens[2].kind, TokenKind::Operator);
    assert_eq!(tokens[2].value, "-");
    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("x := 5; // this is a comment\ny := 10;").unwrap();

    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].kind, TokenKind::Bind);
    assert_eq!(tokens[2].value, "5");
    assert_eq!(tokens[3].kind, TokenKind::Semicolon);
    assert_eq!(tokens[4].value, "y");
    assert_eq!(tokens[5].kind, TokenKind::Bind);
    assert_eq!(tokens[6].value, "10");
    assert_eq!(tokens[7].kind, TokenKind::Semicolon);
    assert_eq!(tokens[8].kind, TokenKind::End);
}

#[test]
fn test_token_locations() {
    let tokens = tokenize("abc := 12;\n  true").unwrap();

    assert_eq!(tokens[0].location, Location::new(1, 1, 1, 3));
    assert_eq!(tokens[1].location, Location::new(1, 5, 1, 6));
    assert_eq!(tokens[2].location, Location::new(1, 8, 1, 9));
    assert_eq!(tokens[3].location, Location::new(1, 10, 1, 10));
    assert_eq!(tokens[4].location, Location::new(2, 3, 2, 6));
}

#[test]
fn test_feed_resumes_scan() {
    let mut lexer = Lexer::new("x := ");

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::Bind);
    assert_eq!(lexer.next_token().kind, TokenKind::End);
    assert!(lexer.at_end());

    lexer.feed("1;\n");
    assert!(!lexer.at_end());

    let one = lexer.next_token();
    assert_eq!(one.kind, TokenKind::Int);
    assert_eq!(one.location, Location::new(1, 6, 1, 6));
    assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
    assert_eq!(lexer.next_token().kind, TokenKind::End);

    lexer.feed("y;");
    let y = lexer.next_token();
    assert_eq!(y.value, "y");
    assert_eq!(y.location, Location::new(2, 1, 2, 1));
}

#[test]
fn test_token_split_across_feeds() {
    let mut lexer = Lexer::new("x := 12");

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::Bind);
    // `12` might continue in the next chunk
    assert_eq!(lexer.next_token().kind, TokenKind::End);
    assert!(!lexer.at_end());

    lexer.feed("3;");
    let number = lexer.next_token();
    assert_eq!(number.kind, TokenKind::Int);
    assert_eq!(number.value, "123");
    assert_eq!(number.location, Location::new(1, 6, 1, 8));
    assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
}

#[test]
fn test_operators_and_names_split_across_feeds() {
    let mut lexer = Lexer::new("a =");
    assert_eq!(lexer.next_token().value, "a");
    assert_eq!(lexer.next_token().kind, TokenKind::End);
    lexer.feed("= b");
    let equals = lexer.next_token();
    assert_eq!(equals.kind, TokenKind::Operator);
    assert_eq!(equals.value, "==");

    assert_eq!(lexer.next_token().kind, TokenKind::End);
    lexer.feed("ar:");
    assert_eq!(lexer.next_token().value, "bar");
    assert_eq!(lexer.next_token().kind, TokenKind::End);
    lexer.feed("= 1\n");
    assert_eq!(lexer.next_token().kind, TokenKind::Bind);
}

#[test]
fn test_finish_releases_held_token() {
    let mut lexer = Lexer::new("total");

    assert_eq!(lexer.next_token().kind, TokenKind::End);
    lexer.finish();
    assert!(lexer.is_finished());

    let total = lexer.next_token();
    assert_eq!(total.kind, TokenKind::Identifier);
    assert_eq!(total.value, "total");
    assert_eq!(lexer.next_token().kind, TokenKind::End);
    assert!(lexer.at_end());

    lexer.feed("x");
    assert!(!lexer.is_finished());
}

#[test]
fn test_error_token_does_not_stop_lexer() {
    let mut lexer = Lexer::new("1 # 2;");

    assert_eq!(lexer.next_token().kind, TokenKind::Int);
    let error = lexer.next_token();
    assert_eq!(error.kind, TokenKind::Error);
    assert_eq!(error.value, "#");
    assert_eq!(error.location, Location::new(1, 3, 1, 3));
    assert_eq!(lexer.next_token().kind, TokenKind::Int);
}

#[test]
fn test_tokenize_reports_lex_error() {
    let error = tokenize("x := #;").unwrap_err();

    assert_eq!(error.code(), ErrorCode::LexError);
    assert_eq!(error.get_location(), &Location::new(1, 6, 1, 6));
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize("").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::End);
}
