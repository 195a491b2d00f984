use lachs::Span;

use super::VarDecl;
use crate::ast::expression::{Expression, Ident};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Block(Block),
    If(If),
    While(While),
    Assignment(Assignment),
    Return(Return),
}

impl Statement {
    pub fn position(&self) -> Span {
        match self {
            Statement::Block(block) => block.position.clone(),
            Statement::If(if_stmt) => if_stmt.position.clone(),
            Statement::While(while_stmt) => while_stmt.position.clone(),
            Statement::Assignment(assign) => assign.position.clone(),
            Statement::Return(ret) => ret.position.clone(),
        }
    }
}

/// A braced block. Declarations always precede statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub declarations: Vec<VarDecl>,
    pub statements: Vec<Statement>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: Ident,
    pub value: Expression,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub value: Expression,
    pub position: Span,
}
