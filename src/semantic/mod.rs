//! Name resolution and semantic analysis module.
//!
//! This module walks the parsed AST with a chain of nested scopes and
//! reports:
//!
//! - Declarations that repeat a name already bound in the same scope
//! - References to names not bound in any enclosing scope
//!
//! Problems are collected as diagnostics and sent to a replaceable sink;
//! they never stop the traversal. No type checking happens beyond the
//! presence of a declaration.

pub mod analyzer;
pub mod diagnostics;
pub mod symbol_table;
