use super::{
    expressions::{BinaryExpr, CallExpr, LiteralExpr, SymbolExpr},
    statements::{BlockStmt, ExpressionStmt, FnDeclStmt, ReturnStmt, VarDeclStmt},
};

/// Statement Types
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum StmtType {
    ExpressionStmt,
    BlockStmt,
    VarDeclStmt,
    FnDeclStmt,
    ReturnStmt,
}

/// Statement
///
/// Every node that can appear in a block. A statement owns its children
/// outright, so dropping one drops the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Block(BlockStmt),
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    Return(ReturnStmt),
}

impl Stmt {
    /// Returns the type of the statement.
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::Block(_) => StmtType::BlockStmt,
            Stmt::VarDecl(_) => StmtType::VarDeclStmt,
            Stmt::FnDecl(_) => StmtType::FnDeclStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
}
