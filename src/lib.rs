#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::statements::BlockStmt,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
    parser::parser::parse,
    semantic::{analyzer::analyze, diagnostics::Diagnostic},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Byte offset into the source
    pub offset: u32,
    /// 1-based line number
    pub line: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, file: Rc<String>) -> Self {
        Position { offset, line, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexes and parses `source` in one go.
pub fn parse_source(source: &str, file: Option<String>) -> Result<BlockStmt, Error> {
    parse(Lexer::new(source, file))
}

/// Parses `source` and runs name resolution over the result.
///
/// Syntax errors abort with `Err`; semantic problems come back as the
/// list of diagnostics.
pub fn check_source(source: &str, file: Option<String>) -> Result<Vec<Diagnostic>, Error> {
    let ast = parse_source(source, file)?;
    Ok(analyze(&ast))
}

/// Returns the line number, the line text and the column of `position`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    // End of input points one past the last character. After a trailing
    // newline that is the start of an empty line, as the lexer counts it.
    if pos == source.len() {
        let line_start = source.rfind('\n').map_or(0, |index| index + 1);
        let line_number = source.matches('\n').count() + 1;
        return Some((line_number, source[line_start..].to_string(), pos - line_start));
    }

    None
}


/// Renders `error` against `source`:
///
/// ```text
/// Error: UnexpectedToken (expected '=' after variable name, found `10`)
/// -> test.lang
///   |
/// 2 | int y 10;
///   | ------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}", position.file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("\n{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    out
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
