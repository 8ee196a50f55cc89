use std::cell::OnceCell;

use crate::{
    interner::{strings::Symbol, types::Type},
    Location,
};

use super::types::TypeAnnotation;

/// A node of the syntax tree.
///
/// Every node owns its children. The only thing that changes after parsing
/// is `checked_type`, which the type checker fills in exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub kind: AstKind,
    pub location: Location,
    checked_type: OnceCell<Type>,
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum AstKind {
    Nil,
    Bool(bool),
    Int(i64),
    Variable(Symbol),
    /// `name := affix`
    Bind { name: Symbol, affix: Box<Ast> },
    /// `target = value`; `target` is always a `Variable`
    Assignment { target: Box<Ast>, value: Box<Ast> },
    Unop { op: Symbol, operand: Box<Ast> },
    Binop { op: Symbol, left: Box<Ast>, right: Box<Ast> },
    Block(Vec<Ast>),
    Array(Vec<Ast>),
    Tuple(Vec<Ast>),
    /// `left.right`; the checker requires `right` to be an `Int` literal
    Dot { left: Box<Ast>, right: Box<Ast> },
    While { test: Box<Ast>, body: Box<Ast> },
    Conditional {
        test: Box<Ast>,
        then_branch: Box<Ast>,
        else_branch: Box<Ast>,
    },
    Function(FunctionLiteral),
    Application { callee: Box<Ast>, arguments: Vec<Ast> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub name: Symbol,
    pub parameters: Vec<Parameter>,
    /// Present when the header is written `fn f(...) -> T { ... }`
    pub return_annotation: Option<TypeAnnotation>,
    pub body: Box<Ast>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Symbol,
    pub annotation: TypeAnnotation,
    pub location: Location,
}

impl Ast {
    pub fn new(kind: AstKind, location: Location) -> Self {
        Ast {
            kind,
            location,
            checked_type: OnceCell::new(),
        }
    }

    /// The type assigned by the checker, `None` before checking.
    pub fn checked_type(&self) -> Option<Type> {
        self.checked_type.get().copied()
    }

    /// Records the checked type. The first write wins.
    pub(crate) fn set_checked_type(&self, ty: Type) {
        if let Err(rejected) = self.checked_type.set(ty) {
            tracing::warn!(
                existing = ?self.checked_type.get(),
                ?rejected,
                location = %self.location,
                "node already carries a checked type"
            );
        }
    }

    pub fn get_kind_name(&self) -> &'static str {
        match &self.kind {
            AstKind::Nil => "Nil",
            AstKind::Bool(_) => "Bool",
            AstKind::Int(_) => "Int",
            AstKind::Variable(_) => "Variable",
            AstKind::Bind { .. } => "Bind",
            AstKind::Assignment { .. } => "Assignment",
            AstKind::Unop { .. } => "Unop",
            AstKind::Binop { .. } => "Binop",
            AstKind::Block(_) => "Block",
            AstKind::Array(_) => "Array",
            AstKind::Tuple(_) => "Tuple",
            AstKind::Dot { .. } => "Dot",
            AstKind::While { .. } => "While",
            AstKind::Conditional { .. } => "Conditional",
            AstKind::Function(_) => "Function",
            AstKind::Application { .. } => "Application",
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Ast> {
        match &self.kind {
            AstKind::Nil | AstKind::Bool(_) | AstKind::Int(_) | AstKind::Variable(_) => vec![],
            AstKind::Bind { affix, .. } => vec![affix.as_ref()],
            AstKind::Assignment { target, value } => vec![target.as_ref(), value.as_ref()],
            AstKind::Unop { operand, .. } => vec![operand.as_ref()],
            AstKind::Binop { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            AstKind::Block(nodes) | AstKind::Array(nodes) | AstKind::Tuple(nodes) => {
                nodes.iter().collect()
            }
            AstKind::Dot { left, right } => vec![left.as_ref(), right.as_ref()],
            AstKind::While { test, body } => vec![test.as_ref(), body.as_ref()],
            AstKind::Conditional {
                test,
                then_branch,
                else_branch,
            } => vec![test.as_ref(), then_branch.as_ref(), else_branch.as_ref()],
            AstKind::Function(function) => vec![function.body.as_ref()],
            AstKind::Application { callee, arguments } => {
                let mut children = vec![callee.as_ref()];
                children.extend(arguments.iter());
                children
            }
        }
    }
}
