use std::collections::VecDeque;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Location, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
    /// Whether more text could lengthen a match that reaches the end of the buffer
    extends: bool,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
            extends: false,
        }
    }

    fn extending(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            extends: true,
            ..RegexPattern::new(pattern, handler)
        }
    }
}

lazy_static! {
    // Order matters: the first pattern that matches at the scan position wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::extending("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        RegexPattern::extending("^[0-9]+", number_handler),
        RegexPattern::new("^\\s+", skip_handler),
        RegexPattern::extending("^//[^\n]*", skip_handler),
        RegexPattern::new("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        RegexPattern::new("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        RegexPattern::new("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        RegexPattern::new("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        RegexPattern::new("^:=", MK_DEFAULT_HANDLER!(TokenKind::Bind, ":=")),
        RegexPattern::extending("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        RegexPattern::new("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        RegexPattern::new("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        RegexPattern::new("^\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        RegexPattern::extending("^[-+*/%<>=!&|^~@$?]+", operator_handler),
    ];
}

/// An incrementally fed scanner.
///
/// `next_token` yields `End` whenever the buffered text is used up. That is
/// not final: after `feed` the next call resumes where the scan stopped.
///
/// A token that runs into the end of the buffer and could still grow (an
/// identifier, a number, an operator run, `:` or a comment) is held back
/// until more text arrives or `finish` declares the source complete.
pub struct Lexer {
    tokens: VecDeque<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            tokens: VecDeque::new(),
            source: source.into(),
            pos: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Appends more text to the buffer without disturbing the scan position.
    pub fn feed(&mut self, more: &str) {
        tracing::trace!(bytes = more.len(), "lexer fed");
        self.source.push_str(more);
        self.finished = false;
    }

    /// Declares that no more text will be fed, releasing any held-back token.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn next_token(&mut self) -> Token {
        while self.tokens.is_empty() && !self.at_eof() {
            if !self.scan() {
                break;
            }
        }

        match self.tokens.pop_front() {
            Some(token) => token,
            None => MK_TOKEN!(TokenKind::End, String::new(), self.current_location()),
        }
    }

    /// True when every buffered character has been turned into tokens and handed out.
    pub fn at_end(&self) -> bool {
        self.tokens.is_empty() && self.at_eof()
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Scans one pattern at the scan position. Returns false when the match
    /// has to wait for more text.
    fn scan(&mut self) -> bool {
        for pattern in PATTERNS.iter() {
            let Some(found) = pattern.regex.find(self.remainder()) else {
                continue;
            };
            if pattern.extends && !self.finished && found.end() == self.remainder().len() {
                return false;
            }

            (pattern.handler)(self, &pattern.regex);
            return true;
        }

        // Nothing matched: hand out the offending character and move past it
        if let Some(character) = self.remainder().chars().next() {
            let text = character.to_string();
            let location = self.location_of(&text);
            self.push(MK_TOKEN!(TokenKind::Error, text.clone(), location));
            self.advance(&text);
        }
        true
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    /// Moves past `text`, which must be the text at the scan position.
    pub fn advance(&mut self, text: &str) {
        for character in text.chars() {
            if character == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += text.len();
    }

    /// Location a token spelled `text` would have at the scan position.
    pub fn location_of(&self, text: &str) -> Location {
        let width = text.chars().count().max(1) as u32;
        Location::new(self.line, self.column, self.line, self.column + width - 1)
    }

    pub fn current_location(&self) -> Location {
        Location::new(self.line, self.column, self.line, self.column)
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|found| found.as_str().to_string())
            .unwrap_or_default()
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let location = lexer.location_of(&matched);

    lexer.push(MK_TOKEN!(TokenKind::Int, matched.clone(), location));
    lexer.advance(&matched);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance(&matched);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let location = lexer.location_of(&value);
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, value.clone(), location));
    lexer.advance(&value);
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let location = lexer.location_of(&value);
    let kind = match value.as_str() {
        "=" => TokenKind::Assign,
        "->" => TokenKind::Arrow,
        _ => TokenKind::Operator,
    };

    lexer.push(MK_TOKEN!(kind, value.clone(), location));
    lexer.advance(&value);
}

/// Lexes a complete buffer. The final token is always `End`.
pub fn tokenize(source: impl Into<String>) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source);
    lexer.finish();
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Error => {
                return Err(Error::new(
                    ErrorImpl::LexError { token: token.value },
                    token.location,
                ))
            }
            TokenKind::End => {
                tokens.push(token);
                return Ok(tokens);
            }
            _ => tokens.push(token),
        }
    }
}
