use crate::{interner::types::Type, Context};

use super::registry::{Associativity, OperatorGrammar, Precedence};

/// Installs the operators every program starts with.
pub fn create_builtin_operators(context: &mut Context) {
    let int = context.types().get_int();
    let bool = context.types().get_bool();

    // Logical
    binop(context, "|", 1, Associativity::Left, &[((bool, bool), bool)]);
    binop(context, "&", 2, Associativity::Left, &[((bool, bool), bool)]);

    // Equality
    binop(context, "==", 3, Associativity::None, &[((int, int), bool), ((bool, bool), bool)]);
    binop(context, "!=", 3, Associativity::None, &[((int, int), bool), ((bool, bool), bool)]);

    // Relational
    binop(context, "<", 4, Associativity::None, &[((int, int), bool)]);
    binop(context, "<=", 4, Associativity::None, &[((int, int), bool)]);
    binop(context, ">", 4, Associativity::None, &[((int, int), bool)]);
    binop(context, ">=", 4, Associativity::None, &[((int, int), bool)]);

    // Additive and multiplicative
    binop(context, "+", 5, Associativity::Left, &[((int, int), int)]);
    binop(context, "-", 5, Associativity::Left, &[((int, int), int)]);
    binop(context, "*", 6, Associativity::Left, &[((int, int), int)]);
    binop(context, "/", 6, Associativity::Left, &[((int, int), int)]);
    binop(context, "%", 6, Associativity::Left, &[((int, int), int)]);

    // Prefix
    unop(context, "-", &[(int, int)]);
    unop(context, "!", &[(bool, bool)]);
}

fn binop(
    context: &mut Context,
    op: &str,
    precedence: Precedence,
    associativity: Associativity,
    overloads: &[((Type, Type), Type)],
) {
    let symbol = context.symbols_mut().intern(op);
    let grammar = OperatorGrammar::new(precedence, associativity);

    if let Err(existing) = context.binops_mut().register(symbol, grammar) {
        tracing::warn!(op, %existing, %grammar, "built-in operator already registered");
    }
    for (operands, result) in overloads {
        context.binops_mut().register_overload(symbol, *operands, *result);
    }
}

fn unop(context: &mut Context, op: &str, overloads: &[(Type, Type)]) {
    let symbol = context.symbols_mut().intern(op);

    context.unops_mut().register(symbol);
    for (operand, result) in overloads {
        context.unops_mut().register_overload(symbol, *operand, *result);
    }
}
