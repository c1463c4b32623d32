use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("str", TokenKind::Str);
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// Lexical error, the token value holds the message
    Error,
    Number,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Int,
    Float,
    Str,
    Func,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token {{\nkind: {},\nvalue: {},\nline: {}}}",
            self.kind,
            self.value,
            self.line()
        )
    }
}

impl Token {
    /// Builds a token without source information, mostly for hand-written
    /// token streams.
    pub fn new(kind: TokenKind, value: &str, line: u32) -> Self {
        let mut start = Position::null();
        start.line = line;

        Token {
            kind,
            value: String::from(value),
            span: Span {
                start: start.clone(),
                end: start,
            },
        }
    }

    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::Error,
        ]) {
            format!("{} ({})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}

/// Pull-based supplier of tokens.
///
/// Once the end of input is reached every further call keeps returning an
/// `EOF` token.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Replays an already materialized list of tokens.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    last_line: u32,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens: tokens.into_iter(),
            last_line: 1,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::EOF => {
                self.last_line = token.line();
                // Drain anything after EOF
                for _ in self.tokens.by_ref() {}
                token
            }
            Some(token) => {
                self.last_line = token.line();
                token
            }
            None => Token::new(TokenKind::EOF, "EOF", self.last_line),
        }
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}
