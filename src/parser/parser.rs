//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct. Expressions are parsed by
//! precedence climbing over the operator tables of the [`Context`], which
//! are consulted each time an operator is met, so grammar registered
//! between two statements applies to the second one.
//!
//! Basic expressions are dispatched through a NUD (null denotation) table
//! keyed by the kind of the lookahead token.

use std::collections::HashMap;

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorImpl},
    interner::strings::Symbol,
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    operators::registry::OperatorGrammar,
    Context,
};

use super::{
    input::{InputSource, NoInput},
    lookups::{create_token_lookups, NUDHandler, NUDLookup},
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// The parser holds at most one token of lookahead. When it needs a token
/// and the lexer has nothing buffered, it asks its [`InputSource`] for more
/// text before giving up.
pub struct Parser<'a> {
    lexer: Lexer,
    input: Box<dyn InputSource + 'a>,
    context: &'a mut Context,
    /// The lookahead, filled lazily
    current: Option<Token>,
    /// Kind of the last consumed token
    previous_kind: Option<TokenKind>,
    nud_lookup: NUDLookup,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer, input: impl InputSource + 'a, context: &'a mut Context) -> Self {
        let mut parser = Parser {
            lexer,
            input: Box::new(input),
            context,
            current: None,
            previous_kind: None,
            nud_lookup: HashMap::new(),
        };

        create_token_lookups(&mut parser);
        parser
    }

    /// Parses one statement.
    ///
    /// Fails with `EndOfFile` when the input holds no further statement.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_statement(&mut self) -> Result<Ast, Error> {
        // An earlier end of input is not final: the source may have grown since
        if matches!(&self.current, Some(token) if token.kind == TokenKind::End) {
            self.current = None;
        }

        parse_stmt(self)
    }

    /// Returns the lookahead token, reading (and requesting input) as needed.
    pub fn current_token(&mut self) -> Result<&Token, Error> {
        let token = match self.current.take() {
            Some(token) => token,
            None => self.read_token(),
        };

        if token.kind == TokenKind::Error {
            let error = Error::new(
                ErrorImpl::LexError {
                    token: token.value.clone(),
                },
                token.location,
            );
            self.current = Some(token);
            return Err(error);
        }

        let token: &Token = self.current.insert(token);
        Ok(token)
    }

    pub fn current_token_kind(&mut self) -> Result<TokenKind, Error> {
        Ok(self.current_token()?.kind)
    }

    /// Consumes the lookahead and returns it.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let token = self.current_token()?.clone();
        self.current = None;
        self.previous_kind = Some(token.kind);
        Ok(token)
    }

    /// Consumes a token of `expected_kind`, or fails with the error built from what was found.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: impl FnOnce(String) -> ErrorImpl,
    ) -> Result<Token, Error> {
        let token = self.current_token()?;
        if token.kind != expected_kind {
            return Err(Error::new(error(token.to_string()), token.location));
        }

        self.advance()
    }

    /// Consumes the lookahead if it is of `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.current_token_kind()? == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Like [`Parser::eat`], but only looks at text that is already buffered.
    ///
    /// Never asks the input source for more, so a statement that may end
    /// without a terminator is returned as soon as it is complete.
    pub fn eat_buffered(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.current.is_none() {
            let token = self.lexer.next_token();
            if token.kind == TokenKind::End {
                return Ok(false);
            }
            self.current = Some(token);
        }

        self.eat(kind)
    }

    /// True when the last consumed token closed a block.
    pub fn previous_was_close_curly(&self) -> bool {
        self.previous_kind == Some(TokenKind::CloseCurly)
    }

    /// Grammar of the operator in lookahead position, if the lookahead is an operator.
    ///
    /// Operators without registered grammar get the default grammar; whether
    /// they exist at all is for the type checker to decide.
    pub fn lookahead_binop(&mut self) -> Result<Option<(Symbol, OperatorGrammar)>, Error> {
        let token = self.current_token()?;
        if token.kind != TokenKind::Operator {
            return Ok(None);
        }

        let op = token.value.clone();
        let symbol = self.context.intern(&op);
        Ok(Some((symbol, self.context.binops().grammar_or_default(symbol))))
    }

    pub fn intern(&mut self, text: &str) -> Symbol {
        self.context.intern(text)
    }

    pub fn context(&self) -> &Context {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut *self.context
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers a null denotation handler for a token kind.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    fn read_token(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();
            if token.kind != TokenKind::End {
                return token;
            }

            match self.input.request_more() {
                Some(more) => {
                    tracing::debug!(bytes = more.len(), "parser requested more input");
                    self.lexer.feed(&more);
                }
                None => {
                    self.lexer.finish();
                    return self.lexer.next_token();
                }
            }
        }
    }
}

/// Parses a complete source text into its statements.
pub fn parse(source: &str, context: &mut Context) -> Result<Vec<Ast>, Error> {
    let mut parser = Parser::new(Lexer::new(source), NoInput, context);
    let mut statements = vec![];

    loop {
        match parser.parse_statement() {
            Ok(statement) => statements.push(statement),
            Err(error) if error.is_end_of_file() => return Ok(statements),
            Err(error) => return Err(error),
        }
    }
}
