use std::slice::Iter;

use super::{ast::{Expr, Stmt}, types::PrimitiveType};

/// A `{ ... }` sequence of declarations and statements. The parsed program
/// itself is a block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

/// `int x = <initializer>;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub declared_type: PrimitiveType,
    pub identifier: String,
    pub initializer: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub param_type: PrimitiveType,
    pub identifier: String,
}

/// `int add(int a, int b) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub return_type: PrimitiveType,
    pub identifier: String,
    pub parameters: Vec<Param>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}
