//! Abstract syntax tree shared by the type checker and the interpreter.
//!
//! The tree is immutable once parsed. Both engines only ever borrow it; a
//! closure keeps its own copy of the function it was created from, so a unit
//! can be dropped or reparsed without affecting values that outlive it.

use std::fmt;

use lachs::Span;

use crate::ast::expression::{Expression, Ident};
use crate::ast::statement::{Block, Statement};

pub mod expression;
pub mod statement;

/// Annotated base type of a declaration or parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Bool,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeName::Int => f.write_str("int"),
            TypeName::Bool => f.write_str("bool"),
        }
    }
}

/// `int x;`, `bool b;` or `var v;` (no annotation). Also used for parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: Ident,
    pub ty: Option<TypeName>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: Ident,
    pub params: Vec<VarDecl>,
    pub body: Block,
    pub position: Span,
}

/// A multi-item program, partitioned the way it is executed: function
/// definitions first, then global declarations, then everything else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub functions: Vec<FunctionDef>,
    pub globals: Vec<VarDecl>,
    pub main: Vec<Statement>,
}

/// One independently checked and executed piece of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    Program(Program),
    Function(FunctionDef),
    Declaration(VarDecl),
    Statement(Statement),
    Expression(Expression),
}
