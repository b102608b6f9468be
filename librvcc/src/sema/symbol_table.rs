// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `symbol_table` module defines the [SymbolTable] type and its related types.

use std::collections::HashMap;

use crate::ICE;

/// A symbol declared in a lexical scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Variable,
    Function { params: Vec<String> },
}

/// A stack of per-scope maps for local declarations, plus a single global map holding
/// every function with its parameter list.
///
/// Lookup probes the scope stack from the innermost scope outward, then the global
/// function map. The table lives for the duration of resolution only.
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
    functions: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    /// Creates an empty symbol table with no open scopes.
    pub fn new() -> Self {
        Self { scopes: Vec::new(), functions: HashMap::new() }
    }

    /// Opens a new innermost scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Closes the innermost scope, discarding its declarations.
    pub fn exit_scope(&mut self) {
        if self.scopes.pop().is_none() {
            ICE!("Scope stack underflow");
        }
    }

    /// Declares a name in the innermost scope.
    ///
    /// Fails if the name is already declared in the same scope. Shadowing a name from an
    /// outer scope is allowed.
    pub fn declare(&mut self, name: &str, symbol: Symbol) -> Result<(), ()> {
        let Some(scope) = self.scopes.last_mut() else {
            ICE!("Declaration of '{name}' outside any scope");
        };

        if scope.contains_key(name) {
            return Err(());
        }

        scope.insert(name.to_string(), symbol);
        Ok(())
    }

    /// Resolves a name through the scope stack from the innermost scope outward, then
    /// the global function map.
    pub fn resolve(&self, name: &str) -> Option<Symbol> {
        for scope in self.scopes.iter().rev() {
            if let Some(symbol) = scope.get(name) {
                return Some(symbol.clone());
            }
        }

        self.functions.get(name).map(|params| Symbol::Function { params: params.clone() })
    }

    /// Records a function in the global map.
    ///
    /// Fails if a function with the same name was already recorded; a function may not
    /// be redeclared globally.
    pub fn declare_function(&mut self, name: &str, params: &[String]) -> Result<(), ()> {
        if self.functions.contains_key(name) {
            return Err(());
        }

        self.functions.insert(name.to_string(), params.to_vec());
        Ok(())
    }

    /// The parameter names of a globally declared function, or `None`.
    pub fn function_params(&self, name: &str) -> Option<&Vec<String>> {
        self.functions.get(name)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
