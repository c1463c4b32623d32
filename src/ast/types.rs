//! Type names for the AST.
//!
//! The language only knows the three primitive types that can start a
//! declaration. They are recorded on declarations and in the symbol table,
//! but never checked against each other.

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// Represents the primitive types in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Float,
    Str,
}

impl PrimitiveType {
    /// Maps a type keyword token to its type.
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(PrimitiveType::Int),
            TokenKind::Float => Some(PrimitiveType::Float),
            TokenKind::Str => Some(PrimitiveType::Str),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::Str => "str",
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
