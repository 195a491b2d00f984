//! Lexically scoped symbol table.
//!
//! [`Scope`] is a stack of frames mapping names to values. The type checker
//! instantiates it with [`Type`](crate::types::Type) and the interpreter with
//! [`Value`](crate::interpreter::Value); both rely on the same contract:
//!
//! - a name is declared at most once per frame,
//! - lookup and assignment search from the innermost frame outwards,
//! - assignment never creates a binding.
//!
//! Cloning a scope copies every frame. Closures rely on this to capture the
//! environment they were defined in by value.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("variable '{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String },

    #[error("variable '{name}' is not declared")]
    UndeclaredVariable { name: String },

    #[error("no scope is active")]
    NoActiveScope,
}

type ScopeFrame<V> = HashMap<String, V>;

/// Run `body` on `owner` between `enter` and `exit`.
///
/// `exit` runs whatever `body` returns. Every frame guard in the crate goes
/// through here, whether `owner` is a [`Scope`] itself or something holding
/// one.
pub fn within_frame<S, R, E>(
    owner: &mut S,
    enter: impl FnOnce(&mut S),
    exit: impl FnOnce(&mut S) -> Result<(), ScopeError>,
    body: impl FnOnce(&mut S) -> Result<R, E>,
) -> Result<R, E>
where
    E: From<ScopeError>,
{
    enter(owner);
    let result = body(owner);
    let exited = exit(owner);
    let value = result?;
    exited?;
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scope<V> {
    frames: Vec<ScopeFrame<V>>,
}

impl<V> Scope<V> {
    /// Create a scope holding a single, empty global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    /// Enter a new scope frame
    pub fn enter_scope(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Leave the current scope frame
    pub fn exit_scope(&mut self) -> Result<(), ScopeError> {
        self.frames
            .pop()
            .map(|_| ())
            .ok_or(ScopeError::NoActiveScope)
    }

    /// Run `f` inside a fresh frame.
    ///
    /// The frame is exited whatever `f` returns, so an error or an early
    /// `return` inside `f` cannot leave a stale frame behind.
    pub fn scoped<R, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<R, E>) -> Result<R, E>
    where
        E: From<ScopeError>,
    {
        within_frame(self, Self::enter_scope, Self::exit_scope, f)
    }

    /// Add a binding to the current (innermost) frame
    pub fn declare(&mut self, name: impl ToString, value: V) -> Result<(), ScopeError> {
        let name = name.to_string();
        let frame = self.frames.last_mut().ok_or(ScopeError::NoActiveScope)?;
        if frame.contains_key(&name) {
            return Err(ScopeError::DuplicateDeclaration { name });
        }
        frame.insert(name, value);
        Ok(())
    }

    /// Resolve a name by searching from innermost to outermost frame
    pub fn lookup(&self, name: &str) -> Result<&V, ScopeError> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .ok_or_else(|| ScopeError::UndeclaredVariable {
                name: name.to_string(),
            })
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, value: V) -> Result<(), ScopeError> {
        match self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
        {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ScopeError::UndeclaredVariable {
                name: name.to_string(),
            }),
        }
    }

    pub fn is_declared_locally(&self, name: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.contains_key(name))
    }

    /// Number of live frames, including the global one.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bindings of the outermost frame, sorted by name.
    pub fn globals(&self) -> Vec<(&str, &V)> {
        let mut bindings: Vec<_> = self
            .frames
            .first()
            .map(|frame| frame.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}

impl<V> Default for Scope<V> {
    fn default() -> Self {
        Self::new()
    }
}
