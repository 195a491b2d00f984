use thiserror::Error;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch { expected: Type, found: Type },

    #[error("occurs check: cannot construct infinite type {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type },

    #[error("type variable {var} is already bound")]
    AlreadyBound { var: TypeVar },

    #[error("expected int or bool, found {ty}")]
    NotBase { ty: Type },
}

/// Unify two types, binding variables in `subst` so that both resolve to the
/// same representative.
///
/// ```text
/// unify(int, int)                      = ok
/// unify('t0, bool)                     = ok, 't0 := bool
/// unify((int) -> 't1, (int) -> bool)   = ok, 't1 := bool
/// unify((int) -> int, (int, int) -> int) = mismatch (arity)
/// unify('t0, () -> 't0)                = occurs check
/// ```
///
/// On failure `subst` may hold bindings made before the failing component was
/// reached; callers that need all-or-nothing behaviour checkpoint the
/// substitution themselves.
pub fn unify(subst: &mut Substitution, expected: &Type, found: &Type) -> Result<(), UnifyError> {
    let expected = subst.resolve(expected);
    let found = subst.resolve(found);

    match (&expected, &found) {
        (Type::Int, Type::Int) | (Type::Bool, Type::Bool) => Ok(()),

        (Type::Var(v1), Type::Var(v2)) if v1 == v2 => Ok(()),
        (Type::Var(v), t) | (t, Type::Var(v)) => subst.bind(*v, t.clone()),

        (Type::Func(params1, ret1), Type::Func(params2, ret2))
            if params1.len() == params2.len() =>
        {
            for (p1, p2) in params1.iter().zip(params2) {
                unify(subst, p1, p2).map_err(|err| widen_mismatch(subst, err, &expected, &found))?;
            }
            unify(subst, ret1, ret2).map_err(|err| widen_mismatch(subst, err, &expected, &found))
        }

        _ => Err(UnifyError::Mismatch {
            expected: subst.apply(&expected),
            found: subst.apply(&found),
        }),
    }
}

/// Report a mismatch inside a function type against the whole function types.
fn widen_mismatch(
    subst: &mut Substitution,
    err: UnifyError,
    expected: &Type,
    found: &Type,
) -> UnifyError {
    match err {
        UnifyError::Mismatch { .. } => UnifyError::Mismatch {
            expected: subst.apply(expected),
            found: subst.apply(found),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_identical_base() {
        let mut subst = Substitution::empty();
        assert_eq!(unify(&mut subst, &Type::Int, &Type::Int), Ok(()));
        assert_eq!(unify(&mut subst, &Type::Bool, &Type::Bool), Ok(()));
    }

    #[test]
    fn test_unify_var_with_concrete() {
        let mut subst = Substitution::empty();
        let var = subst.fresh_var();
        unify(&mut subst, &Type::Var(var), &Type::Int).unwrap();
        assert_eq!(subst.resolve(&Type::Var(var)), Type::Int);
    }

    #[test]
    fn test_unify_concrete_with_var() {
        let mut subst = Substitution::empty();
        let var = subst.fresh_var();
        unify(&mut subst, &Type::Bool, &Type::Var(var)).unwrap();
        assert_eq!(subst.resolve(&Type::Var(var)), Type::Bool);
    }

    #[test]
    fn test_unify_two_vars_then_concrete() {
        let mut subst = Substitution::empty();
        let a = subst.fresh_var();
        let b = subst.fresh_var();
        unify(&mut subst, &Type::Var(a), &Type::Var(b)).unwrap();
        unify(&mut subst, &Type::Var(b), &Type::Int).unwrap();
        assert_eq!(subst.resolve(&Type::Var(a)), Type::Int);
    }

    #[test]
    fn test_unify_same_var() {
        let mut subst = Substitution::empty();
        let var = subst.fresh_var();
        assert_eq!(unify(&mut subst, &Type::Var(var), &Type::Var(var)), Ok(()));
        assert!(!subst.is_bound(&var));
    }

    #[test]
    fn test_unify_mismatch_concrete() {
        let mut subst = Substitution::empty();
        let result = unify(&mut subst, &Type::Int, &Type::Bool);
        assert_eq!(
            result,
            Err(UnifyError::Mismatch {
                expected: Type::Int,
                found: Type::Bool
            })
        );
    }

    #[test]
    fn test_unify_function_types_with_vars() {
        let mut subst = Substitution::empty();
        let a = subst.fresh_var();
        let b = subst.fresh_var();
        let t1 = Type::func(vec![Type::Var(a)], Type::Int);
        let t2 = Type::func(vec![Type::Bool], Type::Var(b));

        unify(&mut subst, &t1, &t2).unwrap();

        assert_eq!(subst.resolve(&Type::Var(a)), Type::Bool);
        assert_eq!(subst.resolve(&Type::Var(b)), Type::Int);
    }

    #[test]
    fn test_unify_function_arity_mismatch() {
        let mut subst = Substitution::empty();
        let t1 = Type::func(vec![Type::Int], Type::Int);
        let t2 = Type::func(vec![Type::Int, Type::Int], Type::Int);
        assert!(matches!(
            unify(&mut subst, &t1, &t2),
            Err(UnifyError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_unify_function_mismatch_reports_whole_types() {
        let mut subst = Substitution::empty();
        let t1 = Type::func(vec![Type::Int], Type::Int);
        let t2 = Type::func(vec![Type::Bool], Type::Int);
        assert_eq!(
            unify(&mut subst, &t1, &t2),
            Err(UnifyError::Mismatch {
                expected: t1.clone(),
                found: t2.clone()
            })
        );
    }

    #[test]
    fn test_unify_mismatch_shape() {
        let mut subst = Substitution::empty();
        let func = Type::func(vec![], Type::Int);
        assert!(matches!(
            unify(&mut subst, &Type::Int, &func),
            Err(UnifyError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_unify_occurs_check() {
        let mut subst = Substitution::empty();
        let var = subst.fresh_var();
        let ty = Type::func(vec![Type::Var(var)], Type::Int);
        assert!(matches!(
            unify(&mut subst, &Type::Var(var), &ty),
            Err(UnifyError::OccursCheck { .. })
        ));
    }
}
