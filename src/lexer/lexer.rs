use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

pub const UNTERMINATED_STRING: &str = "Unterminated string.";
pub const UNEXPECTED_CHARACTER: &str = "Unexpected character.";

/// Handles one matched lexeme. Returns `None` for input that produces no
/// token (whitespace, comments).
pub type LexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct LexPattern {
    regex: Regex,
    handler: LexHandler,
}

// Every pattern is anchored, order decides between overlapping matches
lazy_static! {
    static ref PATTERNS: Vec<LexPattern> = vec![
        LexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        LexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        LexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        LexPattern { regex: Regex::new("^\"(\\\\.|[^\"\\\\])*\"").unwrap(), handler: string_handler },
        LexPattern { regex: Regex::new("^\"").unwrap(), handler: unterminated_string_handler },
        LexPattern { regex: Regex::new("^//[^\\n]*").unwrap(), handler: skip_handler },
        LexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        LexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        LexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        LexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        LexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        LexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        LexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        LexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        LexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        LexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        LexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];
}

/// Scans source text lazily, one token per `next_token` call.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: String::from(source),
            pos: 0,
            line: 1,
            file: file_name,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos as u32, self.line, Rc::clone(&self.file))
    }

    /// Consumes `raw`, keeping the line counter in step.
    pub fn advance_over(&mut self, raw: &str) {
        self.line += raw.matches('\n').count() as u32;
        self.pos += raw.len();
    }

    /// Builds a token spanning `raw` and consumes it.
    pub fn emit(&mut self, kind: TokenKind, value: String, raw: &str) -> Token {
        let start = self.position();
        self.advance_over(raw);

        MK_TOKEN!(kind, value, Span { start, end: self.position() })
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Source text covered by `span`.
    pub fn slice(&self, span: &Span) -> &str {
        &self.source[span.start.offset as usize..span.end.offset as usize]
    }

    fn scan(&mut self) -> Option<Token> {
        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(self.remainder()) {
                let matched = found.as_str().to_string();
                return (pattern.handler)(self, &matched);
            }
        }

        let unexpected = self.remainder().chars().next().map(String::from).unwrap_or_default();
        Some(self.emit(TokenKind::Error, String::from(UNEXPECTED_CHARACTER), &unexpected))
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                let here = self.position();
                return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span { start: here.clone(), end: here });
            }

            if let Some(token) = self.scan() {
                return token;
            }
        }
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_over(matched);
    None
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    Some(lexer.emit(TokenKind::Number, String::from(matched), matched))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP.get(matched).copied().unwrap_or(TokenKind::Identifier);
    Some(lexer.emit(kind, String::from(matched), matched))
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let literal = unescape(&matched[1..matched.len() - 1]);
    Some(lexer.emit(TokenKind::String, literal, matched))
}

fn unterminated_string_handler(lexer: &mut Lexer, _matched: &str) -> Option<Token> {
    // The rest of the input belongs to the broken literal
    let rest = lexer.remainder().to_string();
    Some(lexer.emit(TokenKind::Error, String::from(UNTERMINATED_STRING), &rest))
}

fn unescape(raw: &str) -> String {
    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('0') => result.push('\0'),
            Some(_) => {
                // Unknown escape, keep the backslash
                result.push(ch);
                continue;
            }
            None => {
                result.push(ch);
                continue;
            }
        }
        chars.next();
    }

    result
}

/// Scans the whole of `source` up front.
///
/// The returned list always ends with an `EOF` token. The first lexical
/// error aborts the scan.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();

        match token.kind {
            TokenKind::EOF => {
                tokens.push(token);
                return Ok(tokens);
            }
            TokenKind::Error if token.value == UNTERMINATED_STRING => {
                return Err(Error::new(ErrorImpl::UnterminatedString, token.span.start));
            }
            TokenKind::Error => {
                let unexpected = lex.slice(&token.span).to_string();
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token: unexpected }, token.span.start));
            }
            _ => tokens.push(token),
        }
    }
}
