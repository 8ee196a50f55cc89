use std::collections::HashMap;

use crate::interner::{strings::Symbol, types::Type};

/// One lexical scope: the names bound directly inside a block or function.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<Symbol, Type>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    /// Returns `false`, leaving the existing binding untouched, if `name` is already bound here.
    pub fn declare_variable(&mut self, name: Symbol, ty: Type) -> bool {
        if self.variable_lookup.contains_key(&name) {
            false
        } else {
            self.variable_lookup.insert(name, ty);
            true
        }
    }

    pub fn get_variable(&self, name: Symbol) -> Option<Type> {
        self.variable_lookup.get(&name).copied()
    }
}

/// The scope chain. The outermost environment lives as long as the table;
/// inner environments are pushed and popped in lexical order.
#[derive(Debug)]
pub struct SymbolTable {
    environments: Vec<Environment>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            environments: vec![Environment::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.environments.push(Environment::new());
        tracing::trace!(depth = self.depth(), "pushed scope");
    }

    pub fn pop_scope(&mut self) {
        if self.environments.len() == 1 {
            tracing::warn!("attempted to pop the outermost scope");
            return;
        }
        self.environments.pop();
        tracing::trace!(depth = self.depth(), "popped scope");
    }

    /// Number of scopes, the outermost included.
    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    fn current_environment(&mut self) -> &mut Environment {
        let last = self.environments.len() - 1;
        &mut self.environments[last]
    }

    /// Binds `name` in the innermost scope; `false` if it is already bound there.
    pub fn bind(&mut self, name: Symbol, ty: Type) -> bool {
        self.current_environment().declare_variable(name, ty)
    }

    /// Walks outward from the innermost scope.
    pub fn lookup(&self, name: Symbol) -> Option<Type> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }

    pub fn lookup_local(&self, name: Symbol) -> Option<Type> {
        self.environments
            .last()
            .and_then(|environment| environment.get_variable(name))
    }

    pub fn globals(&self) -> &Environment {
        &self.environments[0]
    }
}
