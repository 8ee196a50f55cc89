#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod context;
pub mod errors;
pub mod interner;
pub mod lexer;
pub mod macros;
pub mod operators;
pub mod parser;
pub mod type_checker;

extern crate regex;

pub use context::Context;

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber, once, if `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// A span in the source text, 1-based lines and columns, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub first_line: u32,
    pub first_column: u32,
    pub last_line: u32,
    pub last_column: u32,
}

impl Location {
    pub fn new(first_line: u32, first_column: u32, last_line: u32, last_column: u32) -> Self {
        Location {
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }

    /// Spans from the start of `start` to the end of `end`.
    pub fn merge(start: &Location, end: &Location) -> Self {
        Location {
            first_line: start.first_line,
            first_column: start.first_column,
            last_line: end.last_line,
            last_column: end.last_column,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.first_line, self.first_column, self.last_line, self.last_column
        )
    }
}

pub fn get_line_at_location(source: &str, location: &Location) -> Option<(usize, String, usize)> {
    let line_number = location.first_line as usize;
    let line = source.lines().nth(line_number.checked_sub(1)?)?;
    let line_pos = (location.first_column as usize).saturating_sub(1);

    Some((line_number, line.to_string(), line_pos))
}

#[cfg(test)]
mod tests {
    use crate::Location;

    #[test]
    fn test_get_line_at_location() {
        let source = "Hello, world!\n\n\nTesting { }\n";

        let (line_number, line, line_pos) =
            super::get_line_at_location(source, &Location::new(1, 11, 1, 11)).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) =
            super::get_line_at_location(source, &Location::new(4, 9, 4, 9)).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }");
        assert_eq!(line_pos, 8);

        assert!(super::get_line_at_location(source, &Location::new(9, 1, 9, 1)).is_none());
    }

    #[test]
    fn test_merge_locations() {
        let merged = Location::merge(&Location::new(1, 1, 1, 2), &Location::new(2, 4, 2, 7));
        assert_eq!(merged, Location::new(1, 1, 2, 7));
    }

    #[test]
    fn test_format_error_points_at_column() {
        use crate::errors::errors::{Error, ErrorImpl};

        let error = Error::new(
            ErrorImpl::LexError {
                token: "#".to_string(),
            },
            Location::new(1, 6, 1, 6),
        );
        let rendered = super::format_error(&error, "x := #;", "test.fix");

        assert_eq!(
            rendered,
            "Error: LexError\n-> test.fix\n  |\n1 | x := #;\n  | -----^\n"
        );
    }
}

/// Renders an error in the caret style used by the command line driver.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: message
        -> final.fix
           |
        20 | x := #;
           | -----^
    */

    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_location(source, error.get_location())
    else {
        output.push_str(&format!("   at {}\n", error.get_location()));
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", format_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
