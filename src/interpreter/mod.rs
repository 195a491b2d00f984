//! Tree-walking evaluator.
//!
//! [`Interpreter`] owns the runtime [`Environment`] of a session. Units are
//! evaluated one after another against it; a unit that fails part way keeps
//! the effects of every statement that completed before the failure.

mod error;
mod eval;
mod value;

pub use error::RuntimeError;
pub use eval::Flow;
pub use value::{Closure, Environment, Value};

use std::cell::RefCell;

use tracing::debug;

use crate::ast::{Program, Unit};

#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `unit`, returning the value of a bare expression.
    ///
    /// Units are expected to have passed type inference first; ill-typed
    /// input surfaces as [`RuntimeError::InternalCast`] instead of a panic.
    pub fn evaluate(&mut self, unit: &Unit) -> Result<Option<Value>, RuntimeError> {
        let env = RefCell::new(std::mem::take(&mut self.env));
        let result = Self::evaluate_in(unit, &env);
        self.env = env.into_inner();
        result
    }

    fn evaluate_in(unit: &Unit, env: &RefCell<Environment>) -> Result<Option<Value>, RuntimeError> {
        match unit {
            Unit::Program(program) => {
                Self::run_program(program, env)?;
                Ok(None)
            }
            Unit::Function(func) => {
                func.define(env)?;
                Ok(None)
            }
            Unit::Declaration(decl) => {
                decl.declare(env)?;
                Ok(None)
            }
            Unit::Statement(stmt) => {
                Self::expect_completed(stmt.exec(env)?, stmt.position())?;
                Ok(None)
            }
            Unit::Expression(expr) => expr.eval(env).map(Some),
        }
    }

    fn run_program(program: &Program, env: &RefCell<Environment>) -> Result<(), RuntimeError> {
        for func in &program.functions {
            func.define(env)?;
        }
        for global in &program.globals {
            global.declare(env)?;
        }
        for stmt in &program.main {
            Self::expect_completed(stmt.exec(env)?, stmt.position())?;
        }
        debug!(
            functions = program.functions.len(),
            globals = program.globals.len(),
            statements = program.main.len(),
            "ran program"
        );
        Ok(())
    }

    fn expect_completed(flow: Flow, span: lachs::Span) -> Result<(), RuntimeError> {
        match flow {
            Flow::Completed => Ok(()),
            Flow::Returning(_) => Err(RuntimeError::ReturnOutsideFunction { span }),
        }
    }

    /// Current value of a global binding.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.env.lookup(name).ok()
    }

    /// Every global binding, sorted by name.
    pub fn globals(&self) -> Vec<(&str, &Value)> {
        self.env.globals()
    }

    /// Number of frames currently on the runtime scope stack.
    pub fn depth(&self) -> usize {
        self.env.depth()
    }
}
