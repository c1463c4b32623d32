//! Lexical analysis module.
//!
//! This module contains the token source the parser pulls from. It handles:
//!
//! - Pull-based scanning of source text using anchored regex patterns
//! - Recognition of type keywords, identifiers, literals, and operators
//! - Line and offset tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
