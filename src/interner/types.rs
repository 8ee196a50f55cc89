use std::{collections::HashMap, fmt};

/// An interned type.
///
/// Two structurally equal types always share one `Type`, so comparing
/// handles is structural type equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Type(u32);

impl Type {
    pub const NIL: Type = Type(0);
    pub const BOOL: Type = Type(1);
    pub const INT: Type = Type(2);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.0)
    }
}

/// The shape of a type. Component types are handles, so hashing a shape
/// never recurses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Nil,
    Bool,
    Int,
    Pointer(Type),
    Array { size: usize, element: Type },
    Tuple(Vec<Type>),
    Function { return_type: Type, parameters: Vec<Type> },
}

#[derive(Debug)]
pub struct TypeInterner {
    cache: HashMap<TypeKind, Type>,
    types: Vec<TypeKind>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            cache: HashMap::new(),
            types: Vec::new(),
        };

        // Must line up with the Type::* constants
        interner.intern(TypeKind::Nil);
        interner.intern(TypeKind::Bool);
        interner.intern(TypeKind::Int);

        interner
    }

    fn intern(&mut self, kind: TypeKind) -> Type {
        if let Some(&ty) = self.cache.get(&kind) {
            return ty;
        }

        let ty = Type(self.types.len() as u32);
        tracing::trace!(?ty, ?kind, "interned new type");

        self.types.push(kind.clone());
        self.cache.insert(kind, ty);

        ty
    }

    pub fn get_nil(&self) -> Type {
        Type::NIL
    }

    pub fn get_bool(&self) -> Type {
        Type::BOOL
    }

    pub fn get_int(&self) -> Type {
        Type::INT
    }

    pub fn get_pointer(&mut self, pointee: Type) -> Type {
        self.intern(TypeKind::Pointer(pointee))
    }

    pub fn get_array(&mut self, size: usize, element: Type) -> Type {
        self.intern(TypeKind::Array { size, element })
    }

    pub fn get_tuple(&mut self, elements: Vec<Type>) -> Type {
        self.intern(TypeKind::Tuple(elements))
    }

    pub fn get_function(&mut self, return_type: Type, parameters: Vec<Type>) -> Type {
        self.intern(TypeKind::Function {
            return_type,
            parameters,
        })
    }

    pub fn kind(&self, ty: Type) -> &TypeKind {
        &self.types[ty.index()]
    }

    pub fn tuple_elements(&self, ty: Type) -> Option<&[Type]> {
        match self.kind(ty) {
            TypeKind::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns `(return_type, parameters)` for function types.
    pub fn as_function(&self, ty: Type) -> Option<(Type, &[Type])> {
        match self.kind(ty) {
            TypeKind::Function {
                return_type,
                parameters,
            } => Some((*return_type, parameters)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Renders a type the way it is written in source annotations.
    pub fn display(&self, ty: Type) -> String {
        match self.kind(ty) {
            TypeKind::Nil => String::from("Nil"),
            TypeKind::Bool => String::from("Bool"),
            TypeKind::Int => String::from("Int"),
            TypeKind::Pointer(pointee) => format!("*{}", self.display(*pointee)),
            TypeKind::Array { size, element } => format!("[{}; {}]", self.display(*element), size),
            TypeKind::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.display(*element))
                    .collect::<Vec<String>>();
                if elements.len() == 1 {
                    format!("({},)", elements[0])
                } else {
                    format!("({})", elements.join(", "))
                }
            }
            TypeKind::Function {
                return_type,
                parameters,
            } => {
                let parameters = parameters
                    .iter()
                    .map(|parameter| self.display(*parameter))
                    .collect::<Vec<String>>();
                format!("fn({}) -> {}", parameters.join(", "), self.display(*return_type))
            }
        }
    }
}
