/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Stmt` and `Expr` node enums
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for the statement node kinds
/// - types: The primitive types a declaration can name
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
