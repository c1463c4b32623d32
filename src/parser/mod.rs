//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into an Abstract Syntax Tree. It handles:
//!
//! - Declaration dispatch (variables and functions share a `type name` prefix)
//! - Statement parsing (blocks, returns, expression statements)
//! - Expression parsing (flat, left-associative binary ops, calls, literals)
//! - Fail-fast error reporting on the first malformed construct
//!
//! Statements and primary expressions are dispatched on the current token
//! through lookup tables registered in `lookups`.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
