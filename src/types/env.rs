use super::ty::Type;
use crate::scope::Scope;

/// Names to types, one frame per block or function body.
///
/// The outermost frame lives as long as the session and collects every
/// global variable and function that has been checked so far.
pub type TypeEnv = Scope<Type>;
