use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ast::{FunctionDef, TypeName};
use crate::scope::Scope;

/// Names to runtime values, one frame per block or call.
pub type Environment = Scope<Value>;

/// Runtime value representation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    /// Content of a `var` that has been declared but not yet assigned.
    Uninitialized,
    Closure(Rc<Closure>),
}

/// A function together with the environment it was defined in.
///
/// `env` starts out as a copy of the defining scope, so later assignments
/// there are not visible through it and the closure never writes back to
/// the defining scope. The copy belongs to the closure for its whole life:
/// what one call assigns to a captured variable, the next call sees.
pub struct Closure {
    pub function: Rc<FunctionDef>,
    pub env: RefCell<Environment>,
}

impl Value {
    /// Initial value of a freshly declared variable.
    pub fn default_for(ty: Option<TypeName>) -> Self {
        match ty {
            Some(TypeName::Int) => Value::Integer(0),
            Some(TypeName::Bool) => Value::Boolean(false),
            None => Value::Uninitialized,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::Uninitialized => "uninitialized variable",
            Value::Closure(_) => "function",
        }
    }
}

impl Closure {
    pub fn new(function: Rc<FunctionDef>, env: Environment) -> Self {
        Self {
            function,
            env: RefCell::new(env),
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name.value
    }
}

impl PartialEq for Closure {
    /// Closures compare by identity.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the captured environment may hold this closure's siblings; keep it out
        f.debug_struct("Closure")
            .field("function", &self.name())
            .field("captured", &self.env.try_borrow().map(|env| env.depth()).ok())
            .finish()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Uninitialized => write!(f, "uninitialized"),
            Value::Closure(closure) => write!(f, "function: {}", closure.name()),
        }
    }
}
