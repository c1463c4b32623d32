use std::{fmt::Display, mem};

use crate::lexer::tokens::TokenKind;

use super::ast::Expr;

// LITERALS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
}

/// Literal Expression
/// Holds the literal's source text; numbers are not evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub kind: LiteralKind,
    pub value: String,
}

/// Symbol Expression
/// A bare reference to a named binding.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
}

/// Moves a compound operand out of its box, leaving an empty literal behind.
fn take_compound(slot: &mut Expr) -> Option<Expr> {
    if !matches!(slot, Expr::Binary(_) | Expr::Call(_)) {
        return None;
    }

    let empty = Expr::Literal(LiteralExpr {
        kind: LiteralKind::Number,
        value: String::new(),
    });
    Some(mem::replace(slot, empty))
}

// Operator chains fold to the left without bound, so the subtree is torn
// down with an explicit stack rather than one recursive drop per operator.
impl Drop for BinaryExpr {
    fn drop(&mut self) {
        let mut pending: Vec<Expr> = take_compound(&mut self.left)
            .into_iter()
            .chain(take_compound(&mut self.right))
            .collect();

        while let Some(mut expr) = pending.pop() {
            match &mut expr {
                Expr::Binary(binary) => {
                    pending.extend(take_compound(&mut binary.left));
                    pending.extend(take_compound(&mut binary.right));
                }
                Expr::Call(call) => pending.append(&mut call.arguments),
                Expr::Literal(_) | Expr::Symbol(_) => {}
            }
        }
    }
}

/// Call Expression
/// Only a plain name can be called.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
}
