//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser pulls tokens from a [`TokenSource`] one at a time and keeps
//! exactly two of them: the token under consideration and the one consumed
//! last. Statement and primary-expression handlers are looked up by the
//! kind of the current token in per-parser tables.

use std::{collections::HashMap, mem};

use log::{debug, trace};

use crate::{
    ast::statements::BlockStmt,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenSource, TokenStream},
};

use super::{
    lookups::{create_token_lookups, NUDHandler, NUDLookup, StmtHandler, StmtLookup},
    stmt::parse_stmt,
};

/// How deep `(`, `{` and call argument lists may nest before the parse is
/// abandoned.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// This struct owns the token source and the current/previous token slots,
/// along with the lookup tables used to dispatch on the current token.
pub struct Parser<'a> {
    /// Where tokens are pulled from
    source: Box<dyn TokenSource + 'a>,
    /// The token under consideration
    current: Token,
    /// The token consumed last
    previous: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for primary expression handlers
    nud_lookup: NUDLookup,
    /// Open `(`, `{` and argument lists around the current token
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance.
    ///
    /// No token is pulled until the first call to [`Parser::advance`].
    pub fn new(source: impl TokenSource + 'a) -> Self {
        Parser {
            source: Box::new(source),
            current: Token::new(TokenKind::EOF, "", 0),
            previous: Token::new(TokenKind::EOF, "", 0),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            depth: 0,
        }
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Pulls the next token and returns the one that was current.
    ///
    /// Fails if the newly pulled token is a lexical error token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.source.next_token();
        self.previous = mem::replace(&mut self.current, next);

        trace!("advanced to {} at line {}", self.current.debug(), self.current.line());

        if self.current.kind == TokenKind::Error {
            return Err(Error::new(
                ErrorImpl::LexicalError {
                    message: self.current.value.clone(),
                },
                self.current.span.start.clone(),
            ));
        }

        Ok(self.previous.clone())
    }

    /// Checks whether the current token is of the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it is of the given kind.
    pub fn match_kind(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - Description of the construct, used in the error
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.check(expected_kind) {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Builds the error for finding the current token where `expected` was
    /// required.
    pub fn unexpected(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from(expected),
                found: self.current.value.clone(),
                kind: self.current.kind,
            },
            self.current.span.start.clone(),
        )
    }

    /// Runs `body` one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` at the current token once
    /// [`MAX_NESTING_DEPTH`] levels are open, before `body` runs.
    pub fn nested<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current.span.start.clone(),
            ));
        }

        self.depth += 1;
        let result = body(self);
        self.depth -= 1;

        result
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (primary expression) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers a primary expression handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses declarations until EOF. The
/// first syntax error aborts the parse.
///
/// # Returns
///
/// The top-level block holding every parsed declaration, or the error.
pub fn parse<'a>(source: impl TokenSource + 'a) -> Result<BlockStmt, Error> {
    let mut parser = Parser::new(source);
    create_token_lookups(&mut parser);

    parser.advance()?;

    let mut body = vec![];
    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    debug!("parsed program with {} top-level declarations", body.len());

    Ok(BlockStmt { body })
}

/// Parses a pre-materialized token list, such as the output of
/// [`crate::lexer::lexer::tokenize`].
pub fn parse_tokens(tokens: Vec<Token>) -> Result<BlockStmt, Error> {
    parse(TokenStream::new(tokens))
}
