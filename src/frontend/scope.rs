//! Symbol and function tables for semantic analysis

use std::collections::HashMap;

use log::trace;
use serde::Serialize;

use crate::types::Type;
use crate::utils::SemanticError;

// ==================== Symbol Table ====================

/// Unique identifier for a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// How a binding was introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Variable,
    Param,
    /// `for` iteration variable
    LoopVar,
}

/// Symbol information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(rename = "type")]
    pub ty: Type,
    pub mutable: bool,
    pub initialized: bool,
    pub line: usize,
    /// Nesting depth of the declaring scope (0 = program)
    pub depth: usize,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: Type, line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            mutable: false,
            initialized: true,
            line,
            depth: 0,
        }
    }
}

/// A scope mapping names to entries of the symbol arena
#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    depth: usize,
    symbols: HashMap<String, usize>,
}

/// Symbol table with nested scopes.
///
/// Scopes form an arena with parent links. Every symbol ever defined stays in
/// `symbols` in declaration order, so the full table of a run can be reported
/// after all scopes have been left.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    current: ScopeId,
}

impl SymbolTable {
    pub fn new() -> Self {
        // Create program scope
        let global = Scope {
            parent: None,
            depth: 0,
            symbols: HashMap::new(),
        };
        Self {
            scopes: vec![global],
            symbols: Vec::new(),
            current: ScopeId(0),
        }
    }

    /// Enter a new scope
    pub fn enter_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let depth = self.depth() + 1;
        self.scopes.push(Scope {
            parent: Some(self.current),
            depth,
            symbols: HashMap::new(),
        });
        self.current = id;
        trace!("enter scope {} (depth {})", id.0, depth);
        id
    }

    /// Exit the current scope
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0].parent {
            trace!("exit scope {}", self.current.0);
            self.current = parent;
        }
    }

    /// Depth of the current scope
    pub fn depth(&self) -> usize {
        self.scopes[self.current.0].depth
    }

    /// Define a symbol in the current scope. An existing binding of the same
    /// name in this scope is kept and a redeclaration is returned.
    pub fn define(&mut self, mut symbol: Symbol) -> Result<(), SemanticError> {
        let depth = self.depth();
        let scope = &mut self.scopes[self.current.0];
        if scope.symbols.contains_key(&symbol.name) {
            return Err(SemanticError::VariableRedeclared {
                name: symbol.name,
                line: symbol.line,
            });
        }
        symbol.depth = depth;
        scope.symbols.insert(symbol.name.clone(), self.symbols.len());
        self.symbols.push(symbol);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<usize> {
        let mut scope_id = Some(self.current);
        while let Some(id) = scope_id {
            if let Some(&index) = self.scopes[id.0].symbols.get(name) {
                return Some(index);
            }
            scope_id = self.scopes[id.0].parent;
        }
        None
    }

    /// Look up a symbol, searching from current scope upward
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.resolve(name).map(|index| &self.symbols[index])
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.resolve(name).map(move |index| &mut self.symbols[index])
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Function Table ====================

/// Registered function signature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSig {
    pub name: String,
    pub params: Vec<Type>,
    /// None for functions without a return value
    #[serde(rename = "return")]
    pub ret: Option<Type>,
    pub line: usize,
}

/// Flat table of every function in the program
#[derive(Debug, Default)]
pub struct FunctionTable {
    index: HashMap<String, usize>,
    sigs: Vec<FunctionSig>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signature. The first declaration of a name wins.
    pub fn register(&mut self, sig: FunctionSig) -> Result<(), SemanticError> {
        if self.index.contains_key(&sig.name) {
            return Err(SemanticError::FunctionRedeclared {
                name: sig.name,
                line: sig.line,
            });
        }
        self.index.insert(sig.name.clone(), self.sigs.len());
        self.sigs.push(sig);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSig> {
        self.index.get(name).map(|&i| &self.sigs[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn into_sigs(self) -> Vec<FunctionSig> {
        self.sigs
    }
}
