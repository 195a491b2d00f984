use std::fmt;

use lachs::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Integer(Integer),
    Boolean(Boolean),
    Ident(Ident),
    BinaryOp(BinaryOp),
    FunctionCall(FunctionCall),
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Integer(integer) => integer.position.clone(),
            Expression::Boolean(boolean) => boolean.position.clone(),
            Expression::Ident(ident) => ident.position.clone(),
            Expression::BinaryOp(binop) => binop.position.clone(),
            Expression::FunctionCall(call) => call.position.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    pub value: i64,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    pub value: bool,
    pub position: Span,
}

/// Call of a named function. Functions are only ever called by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub func: Ident,
    pub args: Vec<Expression>,
    pub position: Span,
}

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    Gt,
    And,
    Or,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Eq => "==",
            BinOpKind::Lt => "<",
            BinOpKind::Gt => ">",
            BinOpKind::And => "and",
            BinOpKind::Or => "or",
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Binary operation expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOp {
    pub op: BinOpKind,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub position: Span,
}
