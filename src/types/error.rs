//! # Type Error Definitions
//!
//! Errors raised while checking a unit. Any of them rejects the whole unit:
//! the checker restores its environment and substitution to the state they
//! were in before the unit started, and the interpreter never sees it.
//!
//! Every variant carries the [`Span`] of the offending construct. When the span
//! has source text attached, [`TypeError::report`] renders the message with a
//! source excerpt; otherwise it falls back to the plain message.

use lachs::Span;
use thiserror::Error;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;
use crate::scope::ScopeError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Reference to, or assignment of, a name no enclosing scope declares.
    #[error("undeclared variable: {name}")]
    UndeclaredVariable { name: String, span: Span },

    /// Second declaration of a name within one scope frame.
    #[error("variable '{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String, span: Span },

    #[error("type mismatch: expected {expected}, found {found}{}", context_note(.context))]
    TypeMismatch {
        expected: Type,
        found: Type,
        span: Span,
        context: Option<String>,
    },

    #[error("function '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("'{name}' has type {ty} and is not a function")]
    NotAFunction { name: String, ty: Type, span: Span },

    #[error("cannot construct infinite type: {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type, span: Span },

    #[error("return statement outside of a function body")]
    ReturnOutsideFunction { span: Span },

    #[error("internal checker error: {message}")]
    Internal { message: String, span: Span },
}

fn context_note(context: &Option<String>) -> String {
    match context {
        Some(ctx) => format!("\n  Note: {}", ctx),
        None => String::new(),
    }
}

impl TypeError {
    pub fn type_mismatch(expected: Type, found: Type, span: Span) -> Self {
        TypeError::TypeMismatch {
            expected,
            found,
            span,
            context: None,
        }
    }

    /// Add context to this error (only affects `TypeMismatch`).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let TypeError::TypeMismatch { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }

    /// Convert a unification error, attaching the span of the construct that
    /// required the two types to agree.
    pub fn from_unify_error(err: UnifyError, span: Span) -> Self {
        match err {
            UnifyError::Mismatch { expected, found } => {
                TypeError::type_mismatch(expected, found, span)
            }
            UnifyError::OccursCheck { var, ty } => TypeError::OccursCheck { var, ty, span },
            UnifyError::NotBase { ty } => TypeError::type_mismatch(Type::Int, ty, span)
                .with_context("only int and bool values can be compared"),
            UnifyError::AlreadyBound { .. } => TypeError::Internal {
                message: err.to_string(),
                span,
            },
        }
    }

    pub fn from_scope_error(err: ScopeError, span: Span) -> Self {
        match err {
            ScopeError::DuplicateDeclaration { name } => {
                TypeError::DuplicateDeclaration { name, span }
            }
            ScopeError::UndeclaredVariable { name } => TypeError::UndeclaredVariable { name, span },
            ScopeError::NoActiveScope => TypeError::Internal {
                message: err.to_string(),
                span,
            },
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            TypeError::UndeclaredVariable { span, .. } => span,
            TypeError::DuplicateDeclaration { span, .. } => span,
            TypeError::TypeMismatch { span, .. } => span,
            TypeError::ArityMismatch { span, .. } => span,
            TypeError::NotAFunction { span, .. } => span,
            TypeError::OccursCheck { span, .. } => span,
            TypeError::ReturnOutsideFunction { span } => span,
            TypeError::Internal { span, .. } => span,
        }
    }

    /// Human-readable message, with a source excerpt when one is available.
    pub fn report(&self) -> String {
        let msg = self.to_string();
        let span = self.span();
        if span.source.is_empty() {
            format!("Type error: {}", msg)
        } else {
            span.to_string(&msg)
        }
    }
}

impl From<ScopeError> for TypeError {
    fn from(err: ScopeError) -> Self {
        TypeError::from_scope_error(err, Span::default())
    }
}
