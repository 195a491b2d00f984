use lachs::Span;
use thiserror::Error;

use crate::scope::ScopeError;

/// Errors raised while evaluating a unit.
///
/// A runtime error aborts the current unit only. Frames entered during the
/// unit are already gone by the time the error reaches the caller, and any
/// statement that completed before the failure keeps its effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("undeclared variable: {name}")]
    UndeclaredVariable { name: String, span: Span },

    #[error("variable '{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String, span: Span },

    #[error("'{name}' is a {kind}, not a function")]
    NotAFunction {
        name: String,
        kind: &'static str,
        span: Span,
    },

    #[error("function '{name}' expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
        span: Span,
    },

    #[error("function '{name}' finished without returning a value")]
    MissingReturn { name: String, span: Span },

    #[error("expected {expected} value, found {found}")]
    InternalCast {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },

    #[error("variable '{name}' is used before it was assigned")]
    UseOfUninitialized { name: String, span: Span },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("return outside function")]
    ReturnOutsideFunction { span: Span },

    #[error("internal interpreter error: {message}")]
    Internal { message: String, span: Span },
}

impl RuntimeError {
    pub fn from_scope_error(err: ScopeError, span: Span) -> Self {
        match err {
            ScopeError::DuplicateDeclaration { name } => {
                RuntimeError::DuplicateDeclaration { name, span }
            }
            ScopeError::UndeclaredVariable { name } => {
                RuntimeError::UndeclaredVariable { name, span }
            }
            ScopeError::NoActiveScope => RuntimeError::Internal {
                message: err.to_string(),
                span,
            },
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            RuntimeError::UndeclaredVariable { span, .. } => span,
            RuntimeError::DuplicateDeclaration { span, .. } => span,
            RuntimeError::NotAFunction { span, .. } => span,
            RuntimeError::ArityMismatch { span, .. } => span,
            RuntimeError::MissingReturn { span, .. } => span,
            RuntimeError::InternalCast { span, .. } => span,
            RuntimeError::UseOfUninitialized { span, .. } => span,
            RuntimeError::DivisionByZero { span } => span,
            RuntimeError::ReturnOutsideFunction { span } => span,
            RuntimeError::Internal { span, .. } => span,
        }
    }

    pub fn report(&self) -> String {
        let msg = self.to_string();
        let span = self.span();
        if span.source.is_empty() {
            format!("Runtime error: {}", msg)
        } else {
            span.to_string(&msg)
        }
    }
}

impl From<ScopeError> for RuntimeError {
    fn from(err: ScopeError) -> Self {
        RuntimeError::from_scope_error(err, Span::default())
    }
}
