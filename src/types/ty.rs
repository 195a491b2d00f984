use std::fmt;

use crate::ast::TypeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar {
    pub id: usize,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

/// A type as seen by the checker.
///
/// Structural equality (`==`) is only meaningful on resolved types; use
/// [`Substitution::apply`](super::Substitution::apply) first when variables may
/// be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    Var(TypeVar),
    Func(Vec<Type>, Box<Type>),
}

impl Type {
    pub fn func(params: Vec<Type>, ret: Type) -> Self {
        Type::Func(params, Box::new(ret))
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Type::Int | Type::Bool)
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Int => "int".to_string(),
            Type::Bool => "bool".to_string(),
            Type::Var(v) => v.to_string(),
            Type::Func(params, ret) => {
                let params = params
                    .iter()
                    .map(Type::pretty)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({}) -> {}", params, ret.pretty())
            }
        }
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'t{}", self.id)
    }
}

impl From<TypeName> for Type {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Int => Type::Int,
            TypeName::Bool => Type::Bool,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_base() {
        assert!(Type::Int.is_base());
        assert!(Type::Bool.is_base());
        assert!(!Type::Var(TypeVar::new(0)).is_base());
        assert!(!Type::func(vec![], Type::Int).is_base());
    }

    #[test]
    fn test_pretty_print_simple() {
        assert_eq!(Type::Int.pretty(), "int");
        assert_eq!(Type::Bool.pretty(), "bool");
        assert_eq!(Type::Var(TypeVar::new(3)).pretty(), "'t3");
    }

    #[test]
    fn test_pretty_print_function() {
        let ty = Type::func(vec![Type::Int, Type::Bool], Type::Int);
        assert_eq!(ty.pretty(), "(int, bool) -> int");
        assert_eq!(Type::func(vec![], Type::Bool).to_string(), "() -> bool");
    }

    #[test]
    fn test_structural_equality() {
        let a = Type::func(vec![Type::Int], Type::Bool);
        let b = Type::func(vec![Type::Int], Type::Bool);
        assert_eq!(a, b);
        assert_ne!(Type::Var(TypeVar::new(0)), Type::Var(TypeVar::new(1)));
    }
}
