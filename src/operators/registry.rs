use std::{collections::HashMap, fmt::Display};

use crate::interner::{strings::Symbol, types::Type};

pub type Precedence = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    None,
    Left,
    Right,
}

impl Display for Associativity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Associativity::None => write!(f, "none"),
            Associativity::Left => write!(f, "left"),
            Associativity::Right => write!(f, "right"),
        }
    }
}

/// Precedence and associativity of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorGrammar {
    pub precedence: Precedence,
    pub associativity: Associativity,
}

impl OperatorGrammar {
    pub const fn new(precedence: Precedence, associativity: Associativity) -> Self {
        OperatorGrammar {
            precedence,
            associativity,
        }
    }
}

impl Display for OperatorGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "precedence {} ({})", self.precedence, self.associativity)
    }
}

pub const DEFAULT_PRECEDENCE: Precedence = 0;
pub const DEFAULT_ASSOCIATIVITY: Associativity = Associativity::Left;

/// Grammar used while parsing an operator that has not been registered.
pub const DEFAULT_GRAMMAR: OperatorGrammar =
    OperatorGrammar::new(DEFAULT_PRECEDENCE, DEFAULT_ASSOCIATIVITY);

#[derive(Debug, Clone, Default)]
pub struct BinopLiteral {
    pub grammar: Option<OperatorGrammar>,
    pub overloads: HashMap<(Type, Type), Type>,
}

#[derive(Debug, Clone, Default)]
pub struct UnopLiteral {
    pub overloads: HashMap<Type, Type>,
}

#[derive(Debug, Default)]
pub struct BinopTable {
    lookup: HashMap<Symbol, BinopLiteral>,
}

impl BinopTable {
    pub fn new() -> Self {
        BinopTable {
            lookup: HashMap::new(),
        }
    }

    /// Records grammar metadata for `op`.
    ///
    /// Registering the same grammar twice is a no-op. A different grammar for
    /// an operator that already has one is refused and the existing grammar is
    /// returned.
    pub fn register(&mut self, op: Symbol, grammar: OperatorGrammar) -> Result<(), OperatorGrammar> {
        let literal = self.lookup.entry(op).or_default();

        match literal.grammar {
            Some(existing) if existing != grammar => Err(existing),
            _ => {
                literal.grammar = Some(grammar);
                Ok(())
            }
        }
    }

    /// Adds one resolution case, returning the result type it replaced, if any.
    pub fn register_overload(&mut self, op: Symbol, operands: (Type, Type), result: Type) -> Option<Type> {
        self.lookup
            .entry(op)
            .or_default()
            .overloads
            .insert(operands, result)
    }

    pub fn lookup_grammar(&self, op: Symbol) -> Option<OperatorGrammar> {
        self.lookup.get(&op).and_then(|literal| literal.grammar)
    }

    /// Grammar the parser climbs with: registered if known, the default otherwise.
    pub fn grammar_or_default(&self, op: Symbol) -> OperatorGrammar {
        self.lookup_grammar(op).unwrap_or(DEFAULT_GRAMMAR)
    }

    pub fn resolve_overload(&self, op: Symbol, operands: (Type, Type)) -> Option<Type> {
        self.lookup
            .get(&op)
            .and_then(|literal| literal.overloads.get(&operands))
            .copied()
    }

    pub fn get(&self, op: Symbol) -> Option<&BinopLiteral> {
        self.lookup.get(&op)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BinopLiteral)> {
        self.lookup.iter()
    }
}

#[derive(Debug, Default)]
pub struct UnopTable {
    lookup: HashMap<Symbol, UnopLiteral>,
}

impl UnopTable {
    pub fn new() -> Self {
        UnopTable {
            lookup: HashMap::new(),
        }
    }

    /// Makes `op` known as a prefix operator. Idempotent.
    pub fn register(&mut self, op: Symbol) {
        self.lookup.entry(op).or_default();
    }

    /// Adds one resolution case; this also makes `op` known.
    pub fn register_overload(&mut self, op: Symbol, operand: Type, result: Type) -> Option<Type> {
        self.lookup
            .entry(op)
            .or_default()
            .overloads
            .insert(operand, result)
    }

    pub fn is_known(&self, op: Symbol) -> bool {
        self.lookup.contains_key(&op)
    }

    pub fn resolve_overload(&self, op: Symbol, operand: Type) -> Option<Type> {
        self.lookup
            .get(&op)
            .and_then(|literal| literal.overloads.get(&operand))
            .copied()
    }

    pub fn get(&self, op: Symbol) -> Option<&UnopLiteral> {
        self.lookup.get(&op)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &UnopLiteral)> {
        self.lookup.iter()
    }
}
