use log::{debug, warn};

use crate::ast::{
    ast::{Expr, Stmt},
    statements::{BlockStmt, FnDeclStmt, VarDeclStmt},
    types::PrimitiveType,
};

use super::{
    diagnostics::{report, Diagnostic},
    symbol_table::{SymbolError, SymbolKind, SymbolTable},
};

/// Traversal context for one analysis run.
///
/// Owns the live scope chain and the diagnostics found so far. A fresh
/// analyzer starts with a single outermost scope open.
#[derive(Debug)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        symbols.push_scope();

        SemanticAnalyzer {
            symbols,
            diagnostics: vec![],
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Runs `body` inside a new child scope. The scope is popped once `body`
    /// returns.
    fn in_scope<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.symbols.push_scope();
        debug!("entered scope at depth {}", depth);

        let result = body(self);

        self.symbols.pop_scope();
        debug!("left scope at depth {}", depth);

        result
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        report(&diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn declare(&mut self, name: &str, declared_type: PrimitiveType, kind: SymbolKind) -> bool {
        let declared = self.symbols.declare(name, declared_type, kind).map(|_| ());

        match declared {
            Ok(()) => true,
            Err(SymbolError::AlreadyDeclared { name }) => {
                self.emit(Diagnostic::AlreadyDeclared { name, kind });
                false
            }
            Err(error) => {
                warn!("could not declare {:?}: {}", name, error);
                false
            }
        }
    }

    fn resolve(&mut self, name: &str) {
        if self.symbols.lookup(name).is_none() {
            self.emit(Diagnostic::UndeclaredIdentifier {
                name: String::from(name),
            });
        }
    }

    /// Analyzes a block in its own scope.
    pub fn analyze_block(&mut self, block: &BlockStmt) {
        self.in_scope(|analyzer| analyzer.analyze_statements(block));
    }

    fn analyze_statements(&mut self, block: &BlockStmt) {
        for stmt in block.iter() {
            self.analyze_stmt(stmt);
        }
    }

    pub fn analyze_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.analyze_block(block),
            Stmt::VarDecl(decl) => self.analyze_var_decl(decl),
            Stmt::FnDecl(function) => self.analyze_fn_decl(function),
            Stmt::Expression(stmt) => self.analyze_expr(&stmt.expression),
            Stmt::Return(stmt) => {
                if let Some(value) = &stmt.value {
                    self.analyze_expr(value);
                }
            }
        }
    }

    fn analyze_var_decl(&mut self, decl: &VarDeclStmt) {
        debug!("analyzing variable declaration: {}", decl.identifier);

        let redeclared = self.symbols.lookup_current(&decl.identifier).is_some();
        if redeclared {
            self.emit(Diagnostic::AlreadyDeclared {
                name: decl.identifier.clone(),
                kind: SymbolKind::Variable,
            });
        }

        // The new name is not visible inside its own initializer
        self.analyze_expr(&decl.initializer);

        if !redeclared {
            self.declare(&decl.identifier, decl.declared_type, SymbolKind::Variable);
        }
    }

    fn analyze_fn_decl(&mut self, function: &FnDeclStmt) {
        debug!("analyzing function declaration: {}", function.identifier);

        // Bound before the body so the function can call itself
        self.declare(&function.identifier, function.return_type, SymbolKind::Function);

        // Parameters and body locals share the function's scope
        self.in_scope(|analyzer| {
            for param in &function.parameters {
                analyzer.declare(&param.identifier, param.param_type, SymbolKind::Parameter);
            }
            analyzer.analyze_statements(&function.body);
        });
    }

    /// Resolves every name in `expr`, left to right.
    pub fn analyze_expr(&mut self, expr: &Expr) {
        // Explicit stack, operator chains can be arbitrarily long
        let mut pending = vec![expr];

        while let Some(expr) = pending.pop() {
            match expr {
                Expr::Literal(_) => {}
                Expr::Symbol(symbol) => self.resolve(&symbol.value),
                Expr::Binary(binary) => {
                    pending.push(&*binary.right);
                    pending.push(&*binary.left);
                }
                Expr::Call(call) => {
                    self.resolve(&call.callee);
                    pending.extend(call.arguments.iter().rev());
                }
            }
        }
    }
}

/// Resolves every name in the program rooted at `root`.
///
/// Each run starts from fresh scopes, so analyzing the same tree twice
/// yields the same diagnostics.
pub fn analyze(root: &BlockStmt) -> Vec<Diagnostic> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze_block(root);

    debug!("analysis finished with {} diagnostics", analyzer.diagnostics().len());

    analyzer.into_diagnostics()
}
