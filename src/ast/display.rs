//! Source-like rendering of syntax trees.
//!
//! Nested binary operations are parenthesized so the rendering shows how the
//! parser grouped them: `1 + 2 * 3` renders as `1 + (2 * 3)`. Operands that
//! end with `}` are parenthesized too, since a `}` ends an expression.

use std::fmt::{self, Display};

use crate::interner::strings::StringInterner;

use super::{
    ast::{Ast, AstKind},
    types::{TypeAnnotation, TypeAnnotationKind},
};

pub struct AstDisplay<'a> {
    ast: &'a Ast,
    symbols: &'a StringInterner,
}

impl Ast {
    pub fn display<'a>(&'a self, symbols: &'a StringInterner) -> AstDisplay<'a> {
        AstDisplay { ast: self, symbols }
    }
}

impl AstDisplay<'_> {
    fn child<'b>(&'b self, ast: &'b Ast) -> AstDisplay<'b> {
        AstDisplay {
            ast,
            symbols: self.symbols,
        }
    }

    fn list(&self, f: &mut fmt::Formatter<'_>, nodes: &[Ast]) -> fmt::Result {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.child(node))?;
        }
        Ok(())
    }

    fn operand(&self, f: &mut fmt::Formatter<'_>, node: &Ast) -> fmt::Result {
        match node.kind {
            AstKind::Binop { .. }
            | AstKind::Block(_)
            | AstKind::While { .. }
            | AstKind::Conditional { .. }
            | AstKind::Function(_) => write!(f, "({})", self.child(node)),
            _ => write!(f, "{}", self.child(node)),
        }
    }
}

impl Display for AstDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ast.kind {
            AstKind::Nil => write!(f, "nil"),
            AstKind::Bool(value) => write!(f, "{}", value),
            AstKind::Int(value) => write!(f, "{}", value),
            AstKind::Variable(name) => write!(f, "{}", self.symbols.resolve(*name)),
            AstKind::Bind { name, affix } => {
                write!(f, "{} := {}", self.symbols.resolve(*name), self.child(affix))
            }
            AstKind::Assignment { target, value } => {
                write!(f, "{} = {}", self.child(target), self.child(value))
            }
            AstKind::Unop { op, operand } => {
                write!(f, "{}", self.symbols.resolve(*op))?;
                self.operand(f, operand)
            }
            AstKind::Binop { op, left, right } => {
                self.operand(f, left)?;
                write!(f, " {} ", self.symbols.resolve(*op))?;
                self.operand(f, right)
            }
            AstKind::Block(statements) => {
                write!(f, "{{ ")?;
                for statement in statements {
                    write!(f, "{}; ", self.child(statement))?;
                }
                write!(f, "}}")
            }
            AstKind::Array(elements) => {
                write!(f, "[")?;
                self.list(f, elements)?;
                write!(f, "]")
            }
            AstKind::Tuple(elements) => {
                write!(f, "(")?;
                self.list(f, elements)?;
                if elements.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            AstKind::Dot { left, right } => {
                self.operand(f, left)?;
                write!(f, ".{}", self.child(right))
            }
            AstKind::While { test, body } => {
                write!(f, "while {} do {}", self.child(test), self.child(body))
            }
            AstKind::Conditional {
                test,
                then_branch,
                else_branch,
            } => write!(
                f,
                "if {} then {} else {}",
                self.child(test),
                self.child(then_branch),
                self.child(else_branch)
            ),
            AstKind::Function(function) => {
                write!(f, "fn {}(", self.symbols.resolve(function.name))?;
                for (i, parameter) in function.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(
                        f,
                        "{}: {}",
                        self.symbols.resolve(parameter.name),
                        parameter.annotation
                    )?;
                }
                write!(f, ") ")?;
                if let Some(annotation) = &function.return_annotation {
                    write!(f, "-> {} ", annotation)?;
                }
                write!(f, "{}", self.child(&function.body))
            }
            AstKind::Application { callee, arguments } => {
                self.operand(f, callee)?;
                write!(f, "(")?;
                self.list(f, arguments)?;
                write!(f, ")")
            }
        }
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeAnnotationKind::Nil => write!(f, "Nil"),
            TypeAnnotationKind::Bool => write!(f, "Bool"),
            TypeAnnotationKind::Int => write!(f, "Int"),
            TypeAnnotationKind::Pointer(pointee) => write!(f, "*{}", pointee),
            TypeAnnotationKind::Array { element, size } => write!(f, "[{}; {}]", element, size),
            TypeAnnotationKind::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                if elements.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            TypeAnnotationKind::Function {
                parameters,
                return_type,
            } => {
                write!(f, "fn(")?;
                for (i, parameter) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", parameter)?;
                }
                write!(f, ") -> {}", return_type)
            }
        }
    }
}
