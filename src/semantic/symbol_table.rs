use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::Display,
};

use thiserror::Error;

use crate::ast::types::PrimitiveType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "Variable"),
            SymbolKind::Parameter => write!(f, "Parameter"),
            SymbolKind::Function => write!(f, "Function"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub declared_type: PrimitiveType,
    pub kind: SymbolKind,
    /// Depth of the owning scope, the outermost scope is 0
    pub scope_depth: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    #[error("{name:?} is already declared in this scope")]
    AlreadyDeclared { name: String },
    #[error("no scope is open")]
    NoActiveScope,
}

/// The bindings of one lexical level.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    depth: usize,
}

impl Scope {
    pub fn new(depth: usize) -> Self {
        Scope {
            symbols: HashMap::new(),
            depth,
        }
    }

    /// Binds `name` in this scope. Names of enclosing scopes are not
    /// consulted.
    pub fn declare(
        &mut self,
        name: &str,
        declared_type: PrimitiveType,
        kind: SymbolKind,
    ) -> Result<&Symbol, SymbolError> {
        match self.symbols.entry(String::from(name)) {
            Entry::Occupied(_) => Err(SymbolError::AlreadyDeclared {
                name: String::from(name),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(Symbol {
                name: String::from(name),
                declared_type,
                kind,
                scope_depth: self.depth,
            })),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Stack of nested scopes. The scope below another on the stack is its
/// parent; lookups walk from the top down.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { scopes: vec![] }
    }

    /// Opens a child of the current scope and returns its depth.
    pub fn push_scope(&mut self) -> usize {
        let depth = self.scopes.len();
        self.scopes.push(Scope::new(depth));
        depth
    }

    /// Closes the innermost scope, dropping its symbols.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        self.scopes.pop()
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current_scope(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// Binds `name` in the innermost scope. Shadowing a name from an
    /// enclosing scope is allowed.
    pub fn declare(
        &mut self,
        name: &str,
        declared_type: PrimitiveType,
        kind: SymbolKind,
    ) -> Result<&Symbol, SymbolError> {
        let scope = self.scopes.last_mut().ok_or(SymbolError::NoActiveScope)?;
        scope.declare(name, declared_type, kind)
    }

    /// Finds the nearest binding of `name`, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Finds `name` in the innermost scope only.
    pub fn lookup_current(&self, name: &str) -> Option<&Symbol> {
        self.scopes.last().and_then(|scope| scope.get(name))
    }
}
