//! One interactive session: a type checker and an interpreter that live as
//! long as the session and see every unit in order.

use thiserror::Error;
use tracing::{debug, info};

use crate::ast::Unit;
use crate::interpreter::{Interpreter, RuntimeError, Value};
use crate::parser::{ParseError, parse_source};
use crate::types::{Infer, Type, TypeError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl SessionError {
    /// Message with a source excerpt where the error has one.
    pub fn report(&self) -> String {
        match self {
            SessionError::Parse(err) => err.report(),
            SessionError::Type(err) => err.report(),
            SessionError::Runtime(err) => err.report(),
        }
    }
}

/// What a successful unit produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// Type of a bare expression or function definition.
    pub ty: Option<Type>,
    /// Value of a bare expression.
    pub value: Option<Value>,
}

/// A global binding as seen from both engines.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: Type,
    pub value: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Session {
    infer: Infer,
    interpreter: Interpreter,
    units: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse, check and evaluate one unit of source text.
    pub fn run(&mut self, source: &str) -> Result<Outcome, SessionError> {
        let unit = parse_source(source)?;
        self.run_unit(&unit)
    }

    /// Check and then evaluate an already parsed unit.
    ///
    /// A unit that fails to check is never evaluated and leaves the session as
    /// it was.
    pub fn run_unit(&mut self, unit: &Unit) -> Result<Outcome, SessionError> {
        self.units += 1;
        let ty = self.infer.infer(unit)?;
        debug!(unit = self.units, ty = ?ty.as_ref().map(Type::pretty), "unit checked");

        let value = self.interpreter.evaluate(unit)?;
        info!(unit = self.units, "unit evaluated");

        Ok(Outcome { ty, value })
    }

    /// Every global binding with its type and current value, sorted by name.
    pub fn globals(&mut self) -> Vec<Binding> {
        self.infer
            .globals()
            .into_iter()
            .map(|(name, ty)| {
                let value = self.interpreter.lookup(&name).cloned();
                Binding { name, ty, value }
            })
            .collect()
    }

    pub fn type_of(&mut self, name: &str) -> Option<Type> {
        self.infer.lookup(name)
    }

    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.interpreter.lookup(name)
    }

    /// Frames on the runtime scope stack; 1 between units.
    pub fn runtime_depth(&self) -> usize {
        self.interpreter.depth()
    }
}
