//! Unit tests for the parser module.
//!
//! This module contains tests for parsing language constructs including:
//! - Operator precedence and associativity
//! - Bindings, assignments and literals
//! - Tuples, arrays, suffixes
//! - Control flow and function literals
//! - Statement terminators
//! - Failure modes
//! - Requesting more input

use pretty_assertions::assert_eq;

use super::{
    expr::parse_function_expr,
    input::NoInput,
    parser::{parse, Parser},
};
use crate::{
    ast::{
        ast::{Ast, AstKind},
        types::TypeAnnotationKind,
    },
    errors::errors::{Error, ErrorCode},
    lexer::lexer::Lexer,
    operators::registry::Associativity,
    Context,
};

fn parse_one(source: &str, context: &mut Context) -> Ast {
    let mut statements = parse(source, context).unwrap();
    assert_eq!(statements.len(), 1, "expected a single statement in {:?}", source);
    statements.remove(0)
}

fn render(source: &str) -> String {
    let mut context = Context::new();
    let statement = parse_one(source, &mut context);
    statement.display(context.symbols()).to_string()
}

fn parse_error(source: &str) -> Error {
    let mut context = Context::new();
    parse(source, &mut context).unwrap_err()
}

#[test]
fn test_precedence_groups_tighter_operators_first() {
    assert_eq!(render("1 + 2 * 3;"), "1 + (2 * 3)");
    assert_eq!(render("1 * 2 + 3;"), "(1 * 2) + 3");
    assert_eq!(render("1 < 2 + 3 & true;"), "(1 < (2 + 3)) & true");
}

#[test]
fn test_left_associative_operators_group_left() {
    assert_eq!(render("1 - 2 - 3;"), "(1 - 2) - 3");
    assert_eq!(render("8 / 4 / 2;"), "(8 / 4) / 2");
}

#[test]
fn test_right_associative_operators_group_right() {
    let mut context = Context::new();
    context.register_binop("^", 7, Associativity::Right).unwrap();

    let statement = parse_one("2 ^ 3 ^ 4;", &mut context);
    assert_eq!(statement.display(context.symbols()).to_string(), "2 ^ (3 ^ 4)");

    let statement = parse_one("1 + 2 ^ 3 ^ 4 * 5;", &mut context);
    assert_eq!(
        statement.display(context.symbols()).to_string(),
        "1 + ((2 ^ (3 ^ 4)) * 5)"
    );
}

#[test]
fn test_non_associative_operators_group_left() {
    assert_eq!(render("1 < 2 < 3;"), "(1 < 2) < 3");
}

#[test]
fn test_unknown_operator_uses_default_grammar() {
    // Default grammar binds looser than every built-in and groups left
    assert_eq!(render("1 + 2 <+> 3 * 4;"), "(1 + 2) <+> (3 * 4)");
    assert_eq!(render("1 <+> 2 <+> 3;"), "(1 <+> 2) <+> 3");
}

#[test]
fn test_registration_between_statements_takes_effect() {
    let mut context = Context::new();

    let before = parse_one("1 + 2 <+> 3;", &mut context);
    assert_eq!(before.display(context.symbols()).to_string(), "(1 + 2) <+> 3");

    context.register_binop("<+>", 9, Associativity::Left).unwrap();

    let after = parse_one("1 + 2 <+> 3;", &mut context);
    assert_eq!(after.display(context.symbols()).to_string(), "1 + (2 <+> 3)");
}

#[test]
fn test_prefix_operator_binds_to_primary() {
    assert_eq!(render("-x * 2;"), "-x * 2");
    assert_eq!(render("!f(true);"), "!f(true)");

    let mut context = Context::new();
    let statement = parse_one("-1 + 2;", &mut context);
    let AstKind::Binop { left, .. } = &statement.kind else {
        panic!("expected a binop, got {:?}", statement.kind);
    };
    assert!(matches!(left.kind, AstKind::Unop { .. }));
}

#[test]
fn test_bind_and_assignment() {
    let mut context = Context::new();

    let bind = parse_one("x := 1 + 2;", &mut context);
    let AstKind::Bind { name, affix } = &bind.kind else {
        panic!("expected a bind, got {:?}", bind.kind);
    };
    assert_eq!(context.symbol_name(*name), "x");
    assert!(matches!(affix.kind, AstKind::Binop { .. }));

    let assignment = parse_one("x = 3;", &mut context);
    let AstKind::Assignment { target, value } = &assignment.kind else {
        panic!("expected an assignment, got {:?}", assignment.kind);
    };
    assert!(matches!(target.kind, AstKind::Variable(_)));
    assert_eq!(value.kind, AstKind::Int(3));
}

#[test]
fn test_literals() {
    let mut context = Context::new();
    let statements = parse("nil; true; false; 42;", &mut context).unwrap();

    let kinds = statements
        .iter()
        .map(|statement| statement.kind.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            AstKind::Nil,
            AstKind::Bool(true),
            AstKind::Bool(false),
            AstKind::Int(42)
        ]
    );
}

#[test]
fn test_tuple_and_grouping() {
    let mut context = Context::new();

    assert_eq!(parse_one("();", &mut context).kind, AstKind::Tuple(vec![]));
    assert_eq!(parse_one("(1);", &mut context).kind, AstKind::Int(1));

    let single = parse_one("(1,);", &mut context);
    assert!(matches!(&single.kind, AstKind::Tuple(elements) if elements.len() == 1));

    let pair = parse_one("(0, true);", &mut context);
    assert!(matches!(&pair.kind, AstKind::Tuple(elements) if elements.len() == 2));

    let trailing = parse_one("(0, true, );", &mut context);
    assert!(matches!(&trailing.kind, AstKind::Tuple(elements) if elements.len() == 2));
}

#[test]
fn test_array_literal() {
    assert_eq!(render("[1, 2, 3];"), "[1, 2, 3]");
    assert_eq!(render("[];"), "[]");
    assert_eq!(render("[true,];"), "[true]");
}

#[test]
fn test_dot_and_application_suffixes() {
    assert_eq!(render("a.1;"), "a.1");
    assert_eq!(render("a.1.0;"), "a.1.0");
    assert_eq!(render("f(1, 2);"), "f(1, 2)");
    assert_eq!(render("f();"), "f()");
    assert_eq!(render("f(1)(2);"), "f(1)(2)");
    assert_eq!(render("f(1).0 + 1;"), "f(1).0 + 1");
}

#[test]
fn test_conditional_and_while() {
    assert_eq!(
        render("if x < 1 then { 1; } else { 2; }"),
        "if x < 1 then { 1; } else { 2; }"
    );
    assert_eq!(render("while b do { b = false; }"), "while b do { b = false; }");
}

#[test]
fn test_function_literal() {
    let mut context = Context::new();
    let function = parse_one("fn add(x: Int, y: Int) { x + y; }", &mut context);

    let AstKind::Function(literal) = &function.kind else {
        panic!("expected a function, got {:?}", function.kind);
    };
    assert_eq!(context.symbol_name(literal.name), "add");
    assert_eq!(literal.parameters.len(), 2);
    assert_eq!(context.symbol_name(literal.parameters[1].name), "y");
    assert_eq!(literal.parameters[0].annotation.kind, TypeAnnotationKind::Int);
    assert!(literal.return_annotation.is_none());
    assert!(matches!(literal.body.kind, AstKind::Block(_)));
}

#[test]
fn test_function_type_annotations() {
    assert_eq!(
        render("fn f(p: **Int, a: [Bool; 3], t: (Int,), g: fn(Int, Bool) -> Nil) -> (Int, Bool) { (1, true); }"),
        "fn f(p: **Int, a: [Bool; 3], t: (Int,), g: fn(Int, Bool) -> Nil) -> (Int, Bool) { (1, true); }"
    );
    assert_eq!(render("fn f() -> Nil { nil; }"), "fn f() -> Nil { nil; }");
}

#[test]
fn test_semicolon_optional_after_block() {
    let mut context = Context::new();

    let statements = parse("{ 1; } { 2; }; x;", &mut context).unwrap();
    assert_eq!(statements.len(), 3);

    let statements = parse("fn f() { 1; } f();", &mut context).unwrap();
    assert_eq!(statements.len(), 2);

    let statements = parse("x := { 1; } y;", &mut context).unwrap();
    assert_eq!(statements.len(), 2);
}

#[test]
fn test_closing_brace_ends_the_expression() {
    let mut context = Context::new();

    let statements = parse("fn f() { 1; }\n(2, 3);", &mut context).unwrap();
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[1].kind, AstKind::Tuple(_)));

    let statements = parse("if true then { 1; } else { 2; }\n-1;", &mut context).unwrap();
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[1].kind, AstKind::Unop { .. }));

    let statements = parse("while false do { }\n.0;", &mut context);
    assert_eq!(statements.unwrap_err().code(), ErrorCode::UnknownBasicToken);
}

#[test]
fn test_bodies_must_be_blocks() {
    assert_eq!(parse_error("fn f(x: Int) x;").code(), ErrorCode::MissingLBrace);
    assert_eq!(parse_error("fn f() -> Int 1;").code(), ErrorCode::MissingLBrace);
    assert_eq!(parse_error("while true do 1;").code(), ErrorCode::MissingLBrace);
    assert_eq!(parse_error("if true then 1 else { 2; }").code(), ErrorCode::MissingLBrace);
    assert_eq!(parse_error("if true then { 1; } else 2;").code(), ErrorCode::MissingLBrace);

    let error = parse_error("while b do x := 1;");
    assert_eq!(error.get_location().first_column, 12);
}

#[test]
fn test_function_literal_required() {
    let mut context = Context::new();
    let mut parser = Parser::new(Lexer::new("f(1);"), NoInput, &mut context);

    let error = parse_function_expr(&mut parser).unwrap_err();
    assert_eq!(error.code(), ErrorCode::MissingFn);
}

#[test]
fn test_empty_block() {
    let mut context = Context::new();
    assert_eq!(parse_one("{ }", &mut context).kind, AstKind::Block(vec![]));
}

#[test]
fn test_empty_source_has_no_statements() {
    let mut context = Context::new();
    assert!(parse("", &mut context).unwrap().is_empty());
    assert!(parse("  // nothing here\n", &mut context).unwrap().is_empty());
}

#[test]
fn test_parse_statement_reports_end_of_file() {
    let mut context = Context::new();
    let mut parser = Parser::new(Lexer::new("1;"), NoInput, &mut context);

    assert!(parser.parse_statement().is_ok());
    let error = parser.parse_statement().unwrap_err();
    assert!(error.is_end_of_file());
}

#[test]
fn test_missing_delimiters() {
    assert_eq!(parse_error("1 + 2").code(), ErrorCode::MissingSemicolon);
    assert_eq!(parse_error("1 2;").code(), ErrorCode::MissingSemicolon);
    assert_eq!(parse_error("(1, 2;").code(), ErrorCode::MissingRParen);
    assert_eq!(parse_error("(1;").code(), ErrorCode::MissingRParen);
    assert_eq!(parse_error("f(1;").code(), ErrorCode::MissingRParen);
    assert_eq!(parse_error("[1, 2;").code(), ErrorCode::MissingRBracket);
    assert_eq!(parse_error("{ 1; ").code(), ErrorCode::MissingRBrace);
}

#[test]
fn test_missing_keywords() {
    assert_eq!(parse_error("if true 1 else 2;").code(), ErrorCode::MissingThen);
    assert_eq!(parse_error("if true then { 1; }").code(), ErrorCode::MissingElse);
    assert_eq!(parse_error("if true then { 1; } 2;").code(), ErrorCode::MissingElse);
    assert_eq!(parse_error("while true { 1; }").code(), ErrorCode::MissingDo);
}

#[test]
fn test_malformed_function_headers() {
    assert_eq!(parse_error("fn (x: Int) x;").code(), ErrorCode::MissingFnName);
    assert_eq!(parse_error("fn f x;").code(), ErrorCode::MissingLParen);
    assert_eq!(parse_error("fn f(1) x;").code(), ErrorCode::MissingArgName);
    assert_eq!(parse_error("fn f(x Int) x;").code(), ErrorCode::MissingColon);
    assert_eq!(parse_error("fn f(x: Foo) x;").code(), ErrorCode::MissingArgType);
    assert_eq!(parse_error("fn f(x: Int x;").code(), ErrorCode::MissingRParen);
}

#[test]
fn test_unknown_basic_token() {
    let error = parse_error("x := ;");
    assert_eq!(error.code(), ErrorCode::UnknownBasicToken);

    assert_eq!(parse_error(") ;").code(), ErrorCode::UnknownBasicToken);
}

#[test]
fn test_lex_error_surfaces_through_parser() {
    let error = parse_error("x := #;");
    assert_eq!(error.code(), ErrorCode::LexError);
    assert_eq!(error.get_location().first_column, 6);
}

#[test]
fn test_node_locations_span_their_source() {
    let mut context = Context::new();
    let statement = parse_one("abc := 1 + 22;", &mut context);

    assert_eq!(statement.location.first_column, 1);
    assert_eq!(statement.location.last_column, 13);
}

#[test]
fn test_parser_requests_more_input() {
    let mut context = Context::new();
    // Popped from the back: every statement arrives split across two lines
    let mut lines = vec!["2);\n", "y := (1,\n", "2;\n", "x := 1 +\n"];
    let mut requests = 0;

    let statements = {
        let input = || {
            requests += 1;
            lines.pop().map(String::from)
        };
        let mut parser = Parser::new(Lexer::new(""), input, &mut context);

        let first = parser.parse_statement().unwrap();
        let second = parser.parse_statement().unwrap();
        assert!(parser.parse_statement().unwrap_err().is_end_of_file());
        vec![first, second]
    };

    assert_eq!(
        statements[0].display(context.symbols()).to_string(),
        "x := 1 + 2"
    );
    assert!(matches!(statements[1].kind, AstKind::Bind { .. }));
    // The last request is the one answered with `None`
    assert_eq!(requests, 5);
}

#[test]
fn test_block_statement_does_not_wait_for_next_line() {
    let mut context = Context::new();
    let mut lines = vec!["y := 2;\n", "{ 1; }\n"];
    let mut requests = 0;

    {
        let input = || {
            requests += 1;
            lines.pop().map(String::from)
        };
        let mut parser = Parser::new(Lexer::new(""), input, &mut context);

        let block = parser.parse_statement().unwrap();
        assert!(matches!(block.kind, AstKind::Block(_)));
    }
    assert_eq!(requests, 1);
}

#[test]
fn test_optional_semicolon_on_the_same_line_is_consumed() {
    let mut context = Context::new();
    let mut lines = vec!["2;\n", "{ 1; };\n"];

    let statements = {
        let input = || lines.pop().map(String::from);
        let mut parser = Parser::new(Lexer::new(""), input, &mut context);

        let first = parser.parse_statement().unwrap();
        let second = parser.parse_statement().unwrap();
        vec![first, second]
    };

    assert!(matches!(statements[0].kind, AstKind::Block(_)));
    assert_eq!(statements[1].kind, AstKind::Int(2));
}

#[test]
fn test_tokens_split_between_chunks() {
    let mut context = Context::new();
    let mut chunks = vec!["3;", "x := 12"];

    let statement = {
        let input = || chunks.pop().map(String::from);
        let mut parser = Parser::new(Lexer::new(""), input, &mut context);
        parser.parse_statement().unwrap()
    };

    let AstKind::Bind { affix, .. } = &statement.kind else {
        panic!("expected a bind, got {:?}", statement.kind);
    };
    assert_eq!(affix.kind, AstKind::Int(123));
}
