use crate::{
    ast::ast::{Ast, AstKind, FunctionLiteral},
    errors::errors::{Error, ErrorImpl},
    interner::{strings::Symbol, types::Type},
    Context, Location,
};

/// Checks one node and everything below it, recording the type of every
/// node that checks successfully.
///
/// The first error aborts the walk. Scopes opened by blocks and functions
/// are closed again on the way out, error or not.
#[tracing::instrument(level = "trace", skip_all, fields(kind = node.get_kind_name(), location = %node.location))]
pub fn type_check(context: &mut Context, node: &Ast) -> Result<Type, Error> {
    let ty = match &node.kind {
        AstKind::Nil => Ok(Type::NIL),
        AstKind::Bool(_) => Ok(Type::BOOL),
        AstKind::Int(_) => Ok(Type::INT),
        AstKind::Variable(name) => type_check_variable(context, *name, node.location),
        AstKind::Bind { name, affix } => type_check_bind(context, *name, affix, node.location),
        AstKind::Assignment { target, value } => type_check_assignment(context, target, value),
        AstKind::Unop { op, operand } => type_check_unop(context, *op, operand, node.location),
        AstKind::Binop { op, left, right } => {
            type_check_binop(context, *op, left, right, node.location)
        }
        AstKind::Block(statements) => type_check_block(context, statements),
        AstKind::Array(elements) => type_check_array(context, elements),
        AstKind::Tuple(elements) => {
            let elements = elements
                .iter()
                .map(|element| type_check(context, element))
                .collect::<Result<Vec<Type>, Error>>()?;
            Ok(context.types.get_tuple(elements))
        }
        AstKind::Dot { left, right } => type_check_dot(context, left, right),
        AstKind::While { test, body } => {
            let test_type = type_check(context, test)?;
            if test_type != Type::BOOL {
                return Err(Error::new(
                    ErrorImpl::WhileTestTypeMismatch {
                        received: context.type_name(test_type),
                    },
                    test.location,
                ));
            }
            type_check(context, body)?;
            Ok(Type::NIL)
        }
        AstKind::Conditional {
            test,
            then_branch,
            else_branch,
        } => type_check_conditional(context, test, then_branch, else_branch),
        AstKind::Function(function) => type_check_function(context, function, node.location),
        AstKind::Application { callee, arguments } => {
            type_check_application(context, callee, arguments, node.location)
        }
    }?;

    node.set_checked_type(ty);
    Ok(ty)
}

/// Checks a sequence of top-level statements in order.
#[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
pub fn type_check_program(context: &mut Context, statements: &[Ast]) -> Result<Vec<Type>, Error> {
    statements
        .iter()
        .map(|statement| type_check(context, statement))
        .collect()
}

fn type_check_variable(context: &Context, name: Symbol, location: Location) -> Result<Type, Error> {
    context.scopes.lookup(name).ok_or_else(|| {
        Error::new(
            ErrorImpl::NameNotBoundInScope {
                name: context.symbol_name(name).to_string(),
            },
            location,
        )
    })
}

fn bind_name(context: &mut Context, name: Symbol, ty: Type, location: Location) -> Result<(), Error> {
    if context.scopes.bind(name, ty) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::NameAlreadyBoundInScope {
                name: context.symbol_name(name).to_string(),
            },
            location,
        ))
    }
}

fn type_check_bind(
    context: &mut Context,
    name: Symbol,
    affix: &Ast,
    location: Location,
) -> Result<Type, Error> {
    let ty = type_check(context, affix)?;
    bind_name(context, name, ty, location)?;
    Ok(ty)
}

fn type_check_assignment(context: &mut Context, target: &Ast, value: &Ast) -> Result<Type, Error> {
    let expected = type_check(context, target)?;
    let received = type_check(context, value)?;

    if expected != received {
        return Err(Error::new(
            ErrorImpl::AssignmentTypeMismatch {
                expected: context.type_name(expected),
                received: context.type_name(received),
            },
            value.location,
        ));
    }

    Ok(expected)
}

fn type_check_unop(
    context: &mut Context,
    op: Symbol,
    operand: &Ast,
    location: Location,
) -> Result<Type, Error> {
    let operand_type = type_check(context, operand)?;

    if !context.unops.is_known(op) {
        return Err(Error::new(
            ErrorImpl::UnknownUnop {
                op: context.symbol_name(op).to_string(),
            },
            location,
        ));
    }

    context
        .unops
        .resolve_overload(op, operand_type)
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnopOperandTypeMismatch {
                    op: context.symbol_name(op).to_string(),
                    operand: context.type_name(operand_type),
                },
                location,
            )
        })
}

fn type_check_binop(
    context: &mut Context,
    op: Symbol,
    left: &Ast,
    right: &Ast,
    location: Location,
) -> Result<Type, Error> {
    let left_type = type_check(context, left)?;
    let right_type = type_check(context, right)?;

    // Parsing with the default grammar does not make an operator known
    if context.binops.lookup_grammar(op).is_none() {
        return Err(Error::new(
            ErrorImpl::UnknownBinop {
                op: context.symbol_name(op).to_string(),
            },
            location,
        ));
    }

    context
        .binops
        .resolve_overload(op, (left_type, right_type))
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::BinopOperandTypeMismatch {
                    op: context.symbol_name(op).to_string(),
                    left: context.type_name(left_type),
                    right: context.type_name(right_type),
                },
                location,
            )
        })
}

fn type_check_block(context: &mut Context, statements: &[Ast]) -> Result<Type, Error> {
    if statements.is_empty() {
        return Ok(Type::NIL);
    }

    context.scopes.push_scope();
    let result = type_check_sequence(context, statements);
    context.scopes.pop_scope();

    result
}

fn type_check_sequence(context: &mut Context, statements: &[Ast]) -> Result<Type, Error> {
    let mut last = Type::NIL;
    for statement in statements {
        last = type_check(context, statement)?;
    }
    Ok(last)
}

fn type_check_array(context: &mut Context, elements: &[Ast]) -> Result<Type, Error> {
    let Some((first, rest)) = elements.split_first() else {
        return Ok(context.types.get_array(0, Type::NIL));
    };

    let element_type = type_check(context, first)?;
    for element in rest {
        let received = type_check(context, element)?;
        if received != element_type {
            return Err(Error::new(
                ErrorImpl::ArrayMemberTypeMismatch {
                    expected: context.type_name(element_type),
                    received: context.type_name(received),
                },
                element.location,
            ));
        }
    }

    Ok(context.types.get_array(elements.len(), element_type))
}

fn type_check_dot(context: &mut Context, left: &Ast, right: &Ast) -> Result<Type, Error> {
    let left_type = type_check(context, left)?;

    let Some(elements) = context.types.tuple_elements(left_type) else {
        return Err(Error::new(
            ErrorImpl::DotLeftIsNotATuple {
                received: context.type_name(left_type),
            },
            left.location,
        ));
    };
    let arity = elements.len();

    let AstKind::Int(index) = right.kind else {
        return Err(Error::new(ErrorImpl::DotRightIsNotAnInt, right.location));
    };

    let element_type = usize::try_from(index)
        .ok()
        .and_then(|index| elements.get(index).copied())
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::DotIndexOutOfRange { index, arity },
                right.location,
            )
        })?;

    type_check(context, right)?;
    Ok(element_type)
}

fn type_check_conditional(
    context: &mut Context,
    test: &Ast,
    then_branch: &Ast,
    else_branch: &Ast,
) -> Result<Type, Error> {
    let test_type = type_check(context, test)?;
    if test_type != Type::BOOL {
        return Err(Error::new(
            ErrorImpl::CondTestExprTypeMismatch {
                received: context.type_name(test_type),
            },
            test.location,
        ));
    }

    let then_type = type_check(context, then_branch)?;
    let else_type = type_check(context, else_branch)?;
    if then_type != else_type {
        return Err(Error::new(
            ErrorImpl::CondBodyExprTypeMismatch {
                expected: context.type_name(then_type),
                received: context.type_name(else_type),
            },
            else_branch.location,
        ));
    }

    Ok(then_type)
}

fn type_check_function(
    context: &mut Context,
    function: &FunctionLiteral,
    location: Location,
) -> Result<Type, Error> {
    let parameter_types = function
        .parameters
        .iter()
        .map(|parameter| parameter.annotation.to_type(&mut context.types))
        .collect::<Vec<Type>>();
    let declared_return = function
        .return_annotation
        .as_ref()
        .map(|annotation| annotation.to_type(&mut context.types));

    context.scopes.push_scope();
    let result = type_check_function_body(context, function, &parameter_types, declared_return);
    context.scopes.pop_scope();

    let function_type = result?;
    bind_name(context, function.name, function_type, location)?;

    tracing::debug!(
        name = context.symbol_name(function.name),
        ty = %context.type_name(function_type),
        "checked function"
    );
    Ok(function_type)
}

/// Runs inside the function's own scope.
fn type_check_function_body(
    context: &mut Context,
    function: &FunctionLiteral,
    parameter_types: &[Type],
    declared_return: Option<Type>,
) -> Result<Type, Error> {
    for (parameter, ty) in function.parameters.iter().zip(parameter_types) {
        bind_name(context, parameter.name, *ty, parameter.location)?;
    }

    // With a declared return type the function can call itself
    if let Some(return_type) = declared_return {
        let own_type = context
            .types
            .get_function(return_type, parameter_types.to_vec());
        bind_name(context, function.name, own_type, function.body.location)?;
    }

    let body_type = type_check(context, &function.body)?;

    if let Some(return_type) = declared_return {
        if body_type != return_type {
            return Err(Error::new(
                ErrorImpl::ReturnTypeMismatch {
                    expected: context.type_name(return_type),
                    received: context.type_name(body_type),
                },
                function.body.location,
            ));
        }
    }

    Ok(context
        .types
        .get_function(body_type, parameter_types.to_vec()))
}

fn type_check_application(
    context: &mut Context,
    callee: &Ast,
    arguments: &[Ast],
    location: Location,
) -> Result<Type, Error> {
    let callee_type = type_check(context, callee)?;

    let Some((return_type, parameters)) = context
        .types
        .as_function(callee_type)
        .map(|(return_type, parameters)| (return_type, parameters.to_vec()))
    else {
        return Err(Error::new(
            ErrorImpl::CalleeIsNotAFunction {
                received: context.type_name(callee_type),
            },
            callee.location,
        ));
    };

    if parameters.len() != arguments.len() {
        return Err(Error::new(
            ErrorImpl::ArgNumMismatch {
                expected: parameters.len(),
                received: arguments.len(),
            },
            location,
        ));
    }

    for (argument, expected) in arguments.iter().zip(parameters) {
        let received = type_check(context, argument)?;
        if received != expected {
            return Err(Error::new(
                ErrorImpl::ArgTypeMismatch {
                    expected: context.type_name(expected),
                    received: context.type_name(received),
                },
                argument.location,
            ));
        }
    }

    Ok(return_type)
}
