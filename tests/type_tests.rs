use pretty_assertions::assert_eq;

use simpl::parser::parse_source;
use simpl::types::{Infer, Substitution, Type, TypeError, unify};

fn check(infer: &mut Infer, src: &str) -> Result<Option<Type>, TypeError> {
    let unit = parse_source(src).expect("parsing failed");
    infer.infer(&unit)
}

#[test]
fn infer_literal_types() {
    let mut infer = Infer::new();
    assert_eq!(check(&mut infer, "1 + 2"), Ok(Some(Type::Int)));
    assert_eq!(check(&mut infer, "1 < 2"), Ok(Some(Type::Bool)));
    assert_eq!(check(&mut infer, "true and false"), Ok(Some(Type::Bool)));
}

#[test]
fn infer_sum_of_globals() {
    let mut infer = Infer::new();
    check(&mut infer, "int x; x := 3; int y; y := 4; x := x + y;").unwrap();
    assert_eq!(check(&mut infer, "x + y"), Ok(Some(Type::Int)));
}

#[test]
fn infer_var_from_later_unit() {
    let mut infer = Infer::new();
    check(&mut infer, "var flag;").unwrap();
    check(&mut infer, "flag := 1 > 2;").unwrap();
    assert_eq!(infer.lookup("flag"), Some(Type::Bool));
}

#[test]
fn infer_var_parameter_from_body() {
    let mut infer = Infer::new();
    let ty = check(&mut infer, "function negate(var b) { if b return false; else return true; }");
    assert_eq!(ty, Ok(Some(Type::func(vec![Type::Bool], Type::Bool))));
}

#[test]
fn argument_type_mismatch_is_static() {
    let mut infer = Infer::new();
    check(&mut infer, "function f(int a) { return a; }").unwrap();
    assert!(matches!(
        check(&mut infer, "f(true)"),
        Err(TypeError::TypeMismatch { .. })
    ));
}

#[test]
fn calling_undeclared_function() {
    let mut infer = Infer::new();
    assert!(matches!(
        check(&mut infer, "g(1)"),
        Err(TypeError::UndeclaredVariable { ref name, .. }) if name == "g"
    ));
}

#[test]
fn assignment_to_undeclared_variable() {
    let mut infer = Infer::new();
    assert!(matches!(
        check(&mut infer, "z := 1;"),
        Err(TypeError::UndeclaredVariable { .. })
    ));
}

#[test]
fn condition_must_be_boolean() {
    let mut infer = Infer::new();
    check(&mut infer, "int n;").unwrap();
    assert!(matches!(
        check(&mut infer, "while n n := n - 1;"),
        Err(TypeError::TypeMismatch { .. })
    ));
}

#[test]
fn block_locals_are_not_visible_afterwards() {
    let mut infer = Infer::new();
    check(&mut infer, "{ int local; local := 1; }").unwrap();
    assert!(matches!(
        check(&mut infer, "local"),
        Err(TypeError::UndeclaredVariable { .. })
    ));
}

#[test]
fn inner_block_may_shadow() {
    let mut infer = Infer::new();
    check(&mut infer, "int x;").unwrap();
    check(&mut infer, "{ bool x; x := true; }").unwrap();
    assert_eq!(infer.lookup("x"), Some(Type::Int));
}

#[test]
fn duplicate_declaration_in_one_block() {
    let mut infer = Infer::new();
    assert!(matches!(
        check(&mut infer, "{ int a; bool a; }"),
        Err(TypeError::DuplicateDeclaration { .. })
    ));
}

#[test]
fn parameter_and_local_share_a_frame() {
    let mut infer = Infer::new();
    assert!(matches!(
        check(&mut infer, "function f(int a) { int a; return a; }"),
        Err(TypeError::DuplicateDeclaration { .. })
    ));
}

#[test]
fn rejected_unit_leaves_no_trace() {
    let mut infer = Infer::new();
    check(&mut infer, "int x;").unwrap();
    let before = infer.globals();

    // declares y and f, then fails
    let result = check(
        &mut infer,
        "int y; function f() { return 1; } x := true;",
    );
    assert!(result.is_err());
    assert_eq!(infer.globals(), before);

    check(&mut infer, "bool y;").unwrap();
    assert_eq!(infer.lookup("y"), Some(Type::Bool));
}

#[test]
fn function_cannot_be_compared() {
    let mut infer = Infer::new();
    check(&mut infer, "function f() { return 1; }").unwrap();
    assert!(matches!(
        check(&mut infer, "f == f"),
        Err(TypeError::TypeMismatch { .. })
    ));
}

#[test]
fn compared_vars_cannot_become_functions() {
    let mut infer = Infer::new();
    check(&mut infer, "function f() { return 1; }").unwrap();
    check(&mut infer, "var a; var b;").unwrap();
    assert_eq!(check(&mut infer, "a == b"), Ok(Some(Type::Bool)));

    assert!(matches!(
        check(&mut infer, "b := f;"),
        Err(TypeError::TypeMismatch { .. })
    ));
    assert!(matches!(infer.lookup("b"), Some(Type::Var(_))));

    check(&mut infer, "a := 2;").unwrap();
    assert_eq!(infer.lookup("b"), Some(Type::Int));
}

#[test]
fn compared_params_reject_function_arguments() {
    let mut infer = Infer::new();
    check(&mut infer, "function g(int a) { return a; }").unwrap();
    check(&mut infer, "function same(var a, var b) { return a == b; }").unwrap();

    let err = check(&mut infer, "same(g, g)").unwrap_err();
    assert!(matches!(err, TypeError::TypeMismatch { .. }));
    assert!(err.to_string().contains("same"));
}

#[test]
fn function_value_assigned_to_var() {
    let mut infer = Infer::new();
    check(&mut infer, "function one() { return 1; }").unwrap();
    check(&mut infer, "var g;").unwrap();
    check(&mut infer, "g := one;").unwrap();
    assert_eq!(check(&mut infer, "g()"), Ok(Some(Type::Int)));
}

#[test]
fn resolution_is_independent_of_chain_start() {
    let mut subst = Substitution::empty();
    let vars: Vec<_> = (0..5).map(|_| subst.fresh_var()).collect();
    for pair in vars.windows(2) {
        unify(&mut subst, &Type::Var(pair[0]), &Type::Var(pair[1])).unwrap();
    }
    unify(&mut subst, &Type::Var(vars[4]), &Type::Bool).unwrap();

    for var in &vars {
        assert_eq!(subst.resolve(&Type::Var(*var)), Type::Bool);
        assert_eq!(subst.resolve(&Type::Var(*var)), Type::Bool);
    }
}

#[test]
fn operand_mismatch_message() {
    let mut infer = Infer::new();
    let err = check(&mut infer, "true + 1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch: expected int, found bool\n  Note: in operands of '+'"
    );
    assert!(!err.span().source.is_empty());
}
