use std::{env, fs::read_to_string, io, process::ExitCode, time::Instant};

use infix::{
    display_error,
    errors::errors::{Error, ErrorTip},
    init_tracing,
    lexer::lexer::Lexer,
    parser::{
        input::LineReader,
        parser::{parse, Parser},
    },
    type_checker::type_checker::{type_check, type_check_program},
    Context,
};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => repl(),
        2 => check_file(&args[1]),
        _ => {
            eprintln!("Usage: {} [file]", args[0]);
            ExitCode::FAILURE
        }
    }
}

/// Checks a whole file and prints the type of every top-level statement.
fn check_file(file_path: &str) -> ExitCode {
    let file_name = file_path.rsplit('/').next().unwrap_or(file_path);

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            return ExitCode::FAILURE;
        }
    };

    let mut context = Context::new();

    let start = Instant::now();
    let statements = match parse(&source, &mut context) {
        Ok(statements) => statements,
        Err(error) => {
            display_error(&error, &source, file_name);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(elapsed = ?start.elapsed(), statements = statements.len(), "parsed");

    let check_start = Instant::now();
    let types = match type_check_program(&mut context, &statements) {
        Ok(types) => types,
        Err(error) => {
            display_error(&error, &source, file_name);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(elapsed = ?check_start.elapsed(), "type checked");

    for (statement, ty) in statements.iter().zip(types) {
        println!(
            "{} : {}",
            statement.display(context.symbols()),
            context.type_name(ty)
        );
    }

    ExitCode::SUCCESS
}

/// Reads statements from stdin, checking each as soon as it is complete.
///
/// Bindings and functions persist across statements. A parse error throws
/// away the rest of the pending input; a type error only the statement.
fn repl() -> ExitCode {
    let mut context = Context::new();
    let stdin = io::stdin();

    loop {
        let input = LineReader::new(stdin.lock()).with_prompt("> ");
        let mut parser = Parser::new(Lexer::new(""), input, &mut context);

        loop {
            let statement = match parser.parse_statement() {
                Ok(statement) => statement,
                Err(error) if error.is_end_of_file() => return ExitCode::SUCCESS,
                Err(error) => {
                    report(&error);
                    break;
                }
            };

            match type_check(parser.context_mut(), &statement) {
                Ok(ty) => {
                    let context = parser.context();
                    println!(
                        "{} : {}",
                        statement.display(context.symbols()),
                        context.type_name(ty)
                    );
                }
                Err(error) => report(&error),
            }
        }
    }
}

fn report(error: &Error) {
    match error.get_tip() {
        ErrorTip::None => eprintln!("Error: {}", error),
        tip => eprintln!("Error: {} ({})", error, tip),
    }
}
