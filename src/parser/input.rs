//! Where the parser gets more source text from once the lexer runs dry.

use std::io::{BufRead, Write};

/// Supplies more source text on demand.
///
/// `None` means the input is exhausted for good; the parser then reports
/// the end of input.
pub trait InputSource {
    fn request_more(&mut self) -> Option<String>;
}

/// For sources that are complete up front.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn request_more(&mut self) -> Option<String> {
        None
    }
}

impl<F> InputSource for F
where
    F: FnMut() -> Option<String>,
{
    fn request_more(&mut self) -> Option<String> {
        self()
    }
}

/// Feeds the parser one line at a time, optionally printing a prompt first.
pub struct LineReader<R> {
    reader: R,
    prompt: Option<String>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            reader,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

impl<R: BufRead> InputSource for LineReader<R> {
    fn request_more(&mut self) -> Option<String> {
        if let Some(prompt) = &self.prompt {
            let mut stdout = std::io::stdout();
            let _ = write!(stdout, "{}", prompt);
            let _ = stdout.flush();
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(error) => {
                tracing::warn!(%error, "failed to read more input");
                None
            }
        }
    }
}
