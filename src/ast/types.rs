//! Type annotations.
//!
//! Annotations only appear in function headers (`fn f(x: Int) -> Bool`).
//! They are kept as written until the type checker interns them.

use crate::{
    interner::types::{Type, TypeInterner},
    Location,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotationKind {
    Nil,
    Bool,
    Int,
    Pointer(Box<TypeAnnotation>),
    Array { element: Box<TypeAnnotation>, size: usize },
    Tuple(Vec<TypeAnnotation>),
    Function {
        parameters: Vec<TypeAnnotation>,
        return_type: Box<TypeAnnotation>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub kind: TypeAnnotationKind,
    pub location: Location,
}

impl TypeAnnotation {
    pub fn new(kind: TypeAnnotationKind, location: Location) -> Self {
        TypeAnnotation { kind, location }
    }

    /// Interns the annotated type.
    pub fn to_type(&self, types: &mut TypeInterner) -> Type {
        match &self.kind {
            TypeAnnotationKind::Nil => types.get_nil(),
            TypeAnnotationKind::Bool => types.get_bool(),
            TypeAnnotationKind::Int => types.get_int(),
            TypeAnnotationKind::Pointer(pointee) => {
                let pointee = pointee.to_type(types);
                types.get_pointer(pointee)
            }
            TypeAnnotationKind::Array { element, size } => {
                let element = element.to_type(types);
                types.get_array(*size, element)
            }
            TypeAnnotationKind::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| element.to_type(types))
                    .collect::<Vec<Type>>();
                types.get_tuple(elements)
            }
            TypeAnnotationKind::Function {
                parameters,
                return_type,
            } => {
                let parameters = parameters
                    .iter()
                    .map(|parameter| parameter.to_type(types))
                    .collect::<Vec<Type>>();
                let return_type = return_type.to_type(types);
                types.get_function(return_type, parameters)
            }
        }
    }
}
