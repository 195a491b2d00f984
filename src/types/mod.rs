//! Static checking: types, the union-find substitution, unification and the
//! inference pass that ties them to the syntax tree.

pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::Infer;
pub use subst::Substitution;
pub use ty::{Type, TypeVar};
pub use unify::{UnifyError, unify};
