//! The compilation unit.
//!
//! A [`Context`] owns everything that outlives a single statement: both
//! interners, the operator tables, the outermost scope and the fresh-name
//! counter. The parser reads the operator tables from it while parsing, the
//! type checker reads and extends all of it while checking.

use crate::{
    errors::errors::{Error, ErrorImpl},
    interner::{
        strings::{StringInterner, Symbol},
        types::{Type, TypeInterner},
    },
    operators::{
        builtins::create_builtin_operators,
        registry::{Associativity, BinopTable, OperatorGrammar, Precedence, UnopTable},
    },
    type_checker::environment::SymbolTable,
    Location,
};

#[derive(Debug)]
pub struct Context {
    pub(crate) symbols: StringInterner,
    pub(crate) types: TypeInterner,
    pub(crate) binops: BinopTable,
    pub(crate) unops: UnopTable,
    pub(crate) scopes: SymbolTable,
    gensym_counter: u32,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// A context with the built-in operators installed.
    pub fn new() -> Self {
        let mut context = Context::empty();
        create_builtin_operators(&mut context);
        context
    }

    /// A context without any operators.
    pub fn empty() -> Self {
        Context {
            symbols: StringInterner::new(),
            types: TypeInterner::new(),
            binops: BinopTable::new(),
            unops: UnopTable::new(),
            scopes: SymbolTable::new(),
            gensym_counter: 0,
        }
    }

    pub fn symbols(&self) -> &StringInterner {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut StringInterner {
        &mut self.symbols
    }

    pub fn types(&self) -> &TypeInterner {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeInterner {
        &mut self.types
    }

    pub fn binops(&self) -> &BinopTable {
        &self.binops
    }

    pub fn binops_mut(&mut self) -> &mut BinopTable {
        &mut self.binops
    }

    pub fn unops(&self) -> &UnopTable {
        &self.unops
    }

    pub fn unops_mut(&mut self) -> &mut UnopTable {
        &mut self.unops
    }

    pub fn scopes(&self) -> &SymbolTable {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut SymbolTable {
        &mut self.scopes
    }

    pub fn intern(&mut self, text: &str) -> Symbol {
        self.symbols.intern(text)
    }

    /// Registers grammar for a binary operator, refusing a conflicting redefinition.
    pub fn register_binop(
        &mut self,
        op: &str,
        precedence: Precedence,
        associativity: Associativity,
    ) -> Result<Symbol, Error> {
        let symbol = self.symbols.intern(op);
        let grammar = OperatorGrammar::new(precedence, associativity);

        match self.binops.register(symbol, grammar) {
            Ok(()) => {
                tracing::debug!(op, %grammar, "registered binary operator");
                Ok(symbol)
            }
            Err(existing) => Err(Error::new(
                ErrorImpl::ConflictingOperatorGrammar {
                    op: op.to_string(),
                    existing: existing.to_string(),
                    requested: grammar.to_string(),
                },
                Location::default(),
            )),
        }
    }

    pub fn register_binop_overload(&mut self, op: &str, left: Type, right: Type, result: Type) -> Symbol {
        let symbol = self.symbols.intern(op);
        if let Some(previous) = self.binops.register_overload(symbol, (left, right), result) {
            tracing::debug!(op, ?previous, ?result, "replaced binary operator overload");
        }
        symbol
    }

    pub fn register_unop(&mut self, op: &str) -> Symbol {
        let symbol = self.symbols.intern(op);
        self.unops.register(symbol);
        tracing::debug!(op, "registered unary operator");
        symbol
    }

    pub fn register_unop_overload(&mut self, op: &str, operand: Type, result: Type) -> Symbol {
        let symbol = self.symbols.intern(op);
        if let Some(previous) = self.unops.register_overload(symbol, operand, result) {
            tracing::debug!(op, ?previous, ?result, "replaced unary operator overload");
        }
        symbol
    }

    /// A name no source identifier can spell, unique within this context.
    pub fn gensym(&mut self, prefix: &str) -> Symbol {
        let name = format!("{}.{}", prefix, self.gensym_counter);
        self.gensym_counter += 1;
        self.symbols.intern(&name)
    }

    /// Renders a type for diagnostics.
    pub fn type_name(&self, ty: Type) -> String {
        self.types.display(ty)
    }

    pub fn symbol_name(&self, symbol: Symbol) -> &str {
        self.symbols.resolve(symbol)
    }
}
