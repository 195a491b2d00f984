//! Union-find substitution over type variables.
//!
//! Every [`TypeVar`] is either unbound (its own representative) or linked to
//! another type. [`Substitution::resolve`] walks a chain of variable links to
//! the representative and rewrites every visited link to point straight at it,
//! so later lookups are a single step.
//!
//! A variable can also be marked base-only, meaning it must end up as `int` or
//! `bool`. The mark moves along with variable-to-variable links, and binding a
//! marked variable to a function type fails.

use std::collections::{HashMap, HashSet};

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    links: HashMap<TypeVar, Type>,
    base_only: HashSet<TypeVar>,
    next_var: usize,
}

impl Substitution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    pub fn is_bound(&self, var: &TypeVar) -> bool {
        self.links.contains_key(var)
    }

    /// Representative of `ty`, compressing the path it took to get there.
    ///
    /// Only the outermost constructor is resolved; parameters of a function
    /// type are left as they are. Use [`Substitution::apply`] for a fully
    /// resolved type.
    pub fn resolve(&mut self, ty: &Type) -> Type {
        let Type::Var(var) = ty else {
            return ty.clone();
        };

        match self.links.get(var).cloned() {
            Some(next) => {
                let root = self.resolve(&next);
                self.links.insert(*var, root.clone());
                root
            }
            None => ty.clone(),
        }
    }

    /// Link an unbound variable to `ty`.
    pub fn bind(&mut self, var: TypeVar, ty: Type) -> Result<(), UnifyError> {
        if self.is_bound(&var) {
            return Err(UnifyError::AlreadyBound { var });
        }

        let ty = self.resolve(&ty);
        if ty == Type::Var(var) {
            return Ok(());
        }

        if self.occurs_in(var, &ty) {
            return Err(UnifyError::OccursCheck {
                var,
                ty: self.apply(&ty),
            });
        }

        if self.base_only.contains(&var) {
            self.require_base(&ty)?;
        }

        self.links.insert(var, ty);
        Ok(())
    }

    /// Require `ty` to be `int` or `bool`, now or once its variable is bound.
    pub fn require_base(&mut self, ty: &Type) -> Result<(), UnifyError> {
        match self.resolve(ty) {
            Type::Var(var) => {
                self.base_only.insert(var);
                Ok(())
            }
            resolved if resolved.is_base() => Ok(()),
            resolved => Err(UnifyError::NotBase {
                ty: self.apply(&resolved),
            }),
        }
    }

    /// Fully resolve `ty`, including everything nested inside function types.
    pub fn apply(&mut self, ty: &Type) -> Type {
        match self.resolve(ty) {
            Type::Func(params, ret) => {
                let params = params.iter().map(|param| self.apply(param)).collect();
                Type::func(params, self.apply(&ret))
            }
            resolved => resolved,
        }
    }

    fn occurs_in(&mut self, var: TypeVar, ty: &Type) -> bool {
        match self.resolve(ty) {
            Type::Int | Type::Bool => false,
            Type::Var(v) => v == var,
            Type::Func(params, ret) => {
                params.iter().any(|param| self.occurs_in(var, param)) || self.occurs_in(var, &ret)
            }
        }
    }
}
