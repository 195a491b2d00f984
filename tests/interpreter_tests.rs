use std::cell::RefCell;

use lachs::Span;
use simpl::ast::expression::{BinOpKind, BinaryOp, Expression, Ident, Integer};
use simpl::ast::statement::{Assignment, Block, Statement};
use simpl::ast::{TypeName, VarDecl};
use simpl::interpreter::{Environment, Flow, Interpreter, RuntimeError, Value};
use simpl::parser::parse_source;

fn dummy_span() -> Span {
    Span::default()
}

fn make_ident(name: &str) -> Ident {
    Ident {
        value: name.to_string(),
        position: dummy_span(),
    }
}

fn make_integer(value: i64) -> Expression {
    Expression::Integer(Integer {
        value,
        position: dummy_span(),
    })
}

fn make_binop(op: BinOpKind, left: Expression, right: Expression) -> Expression {
    Expression::BinaryOp(BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
        position: dummy_span(),
    })
}

fn run(interpreter: &mut Interpreter, src: &str) -> Result<Option<Value>, RuntimeError> {
    let unit = parse_source(src).expect("parsing failed");
    interpreter.evaluate(&unit)
}

#[test]
fn eval_integer_literal() {
    let env = RefCell::new(Environment::new());
    assert_eq!(make_integer(42).eval(&env), Ok(Value::Integer(42)));
}

#[test]
fn eval_nested_binary_ops() {
    let env = RefCell::new(Environment::new());
    let expr = make_binop(
        BinOpKind::Mul,
        make_binop(BinOpKind::Add, make_integer(1), make_integer(2)),
        make_integer(3),
    );
    assert_eq!(expr.eval(&env), Ok(Value::Integer(9)));
}

#[test]
fn eval_identifier_lookup() {
    let mut scope = Environment::new();
    scope.declare("x", Value::Integer(7)).unwrap();
    let env = RefCell::new(scope);
    assert_eq!(
        Expression::Ident(make_ident("x")).eval(&env),
        Ok(Value::Integer(7))
    );
}

#[test]
fn eval_undeclared_identifier() {
    let env = RefCell::new(Environment::new());
    assert!(matches!(
        Expression::Ident(make_ident("nope")).eval(&env),
        Err(RuntimeError::UndeclaredVariable { .. })
    ));
}

#[test]
fn block_pops_its_frame() {
    let env = RefCell::new(Environment::new());
    let block = Statement::Block(Block {
        declarations: vec![VarDecl {
            name: make_ident("tmp"),
            ty: Some(TypeName::Int),
            position: dummy_span(),
        }],
        statements: vec![Statement::Assignment(Assignment {
            name: make_ident("tmp"),
            value: make_integer(5),
            position: dummy_span(),
        })],
        position: dummy_span(),
    });

    assert_eq!(block.exec(&env), Ok(Flow::Completed));
    let env = env.into_inner();
    assert_eq!(env.depth(), 1);
    assert!(env.lookup("tmp").is_err());
}

#[test]
fn and_or_comparisons() {
    let mut interpreter = Interpreter::new();
    run(&mut interpreter, "bool b; b := (3 < 4) and (5 > 2);").unwrap();
    assert_eq!(interpreter.lookup("b"), Some(&Value::Boolean(true)));

    run(&mut interpreter, "b := (3 > 4) or false;").unwrap();
    assert_eq!(interpreter.lookup("b"), Some(&Value::Boolean(false)));
}

#[test]
fn equality_on_ints_and_bools() {
    let mut interpreter = Interpreter::new();
    assert_eq!(run(&mut interpreter, "2 == 2"), Ok(Some(Value::Boolean(true))));
    assert_eq!(
        run(&mut interpreter, "true == false"),
        Ok(Some(Value::Boolean(false)))
    );
}

#[test]
fn while_loop_counts() {
    let mut interpreter = Interpreter::new();
    run(
        &mut interpreter,
        "int n; int total; n := 5; while n > 0 { total := total + n; n := n - 1; }",
    )
    .unwrap();
    assert_eq!(interpreter.lookup("total"), Some(&Value::Integer(15)));
    assert_eq!(interpreter.lookup("n"), Some(&Value::Integer(0)));
}

#[test]
fn recursive_factorial() {
    let mut interpreter = Interpreter::new();
    run(
        &mut interpreter,
        "function fact(int n) { if n < 1 return 1; else return n * fact(n - 1); }",
    )
    .unwrap();
    assert_eq!(run(&mut interpreter, "fact(10)"), Ok(Some(Value::Integer(3628800))));
    assert_eq!(interpreter.depth(), 1);
}

#[test]
fn closure_sees_definition_snapshot() {
    let mut interpreter = Interpreter::new();
    run(&mut interpreter, "var x;").unwrap();
    run(&mut interpreter, "x := 1;").unwrap();
    run(&mut interpreter, "function f() { return x; }").unwrap();
    run(&mut interpreter, "x := 2;").unwrap();

    assert_eq!(run(&mut interpreter, "f()"), Ok(Some(Value::Integer(1))));
    assert_eq!(interpreter.lookup("x"), Some(&Value::Integer(2)));
}

#[test]
fn captured_variable_persists_across_calls() {
    let mut interpreter = Interpreter::new();
    run(&mut interpreter, "int counter;").unwrap();
    run(
        &mut interpreter,
        "function bump() { counter := counter + 1; return counter; }",
    )
    .unwrap();

    assert_eq!(run(&mut interpreter, "bump()"), Ok(Some(Value::Integer(1))));
    assert_eq!(run(&mut interpreter, "bump()"), Ok(Some(Value::Integer(2))));
    assert_eq!(interpreter.lookup("counter"), Some(&Value::Integer(0)));
}

#[test]
fn recursive_calls_share_captured_state() {
    let mut interpreter = Interpreter::new();
    run(&mut interpreter, "int calls;").unwrap();
    run(
        &mut interpreter,
        "function tick(int n) { calls := calls + 1; if n < 1 return calls; else return tick(n - 1); }",
    )
    .unwrap();

    assert_eq!(run(&mut interpreter, "tick(3)"), Ok(Some(Value::Integer(4))));
    assert_eq!(run(&mut interpreter, "tick(0)"), Ok(Some(Value::Integer(5))));
    assert_eq!(interpreter.lookup("calls"), Some(&Value::Integer(0)));
    assert_eq!(interpreter.depth(), 1);
}

#[test]
fn failed_call_pops_its_frame() {
    let mut interpreter = Interpreter::new();
    run(&mut interpreter, "int hits;").unwrap();
    run(
        &mut interpreter,
        "function risky(int d) { hits := hits + 1; return hits / d; }",
    )
    .unwrap();

    assert!(matches!(
        run(&mut interpreter, "risky(0)"),
        Err(RuntimeError::DivisionByZero { .. })
    ));
    assert_eq!(run(&mut interpreter, "risky(1)"), Ok(Some(Value::Integer(2))));
}

#[test]
fn parameter_shadows_function_name() {
    let mut interpreter = Interpreter::new();
    run(&mut interpreter, "function f(int f) { return f + 1; }").unwrap();
    assert_eq!(run(&mut interpreter, "f(1)"), Ok(Some(Value::Integer(2))));
}

#[test]
fn return_inside_nested_block_unwinds_to_call() {
    let mut interpreter = Interpreter::new();
    run(
        &mut interpreter,
        "function pick(bool b) { { { if b return 1; } } return 2; }",
    )
    .unwrap();
    assert_eq!(run(&mut interpreter, "pick(true)"), Ok(Some(Value::Integer(1))));
    assert_eq!(run(&mut interpreter, "pick(false)"), Ok(Some(Value::Integer(2))));
    assert_eq!(interpreter.depth(), 1);
}

#[test]
fn duplicate_global_declaration() {
    let mut interpreter = Interpreter::new();
    run(&mut interpreter, "int x;").unwrap();
    assert!(matches!(
        run(&mut interpreter, "int x;"),
        Err(RuntimeError::DuplicateDeclaration { .. })
    ));
}

#[test]
fn wrapping_arithmetic() {
    let mut interpreter = Interpreter::new();
    assert_eq!(
        run(&mut interpreter, "9223372036854775807 + 1"),
        Ok(Some(Value::Integer(i64::MIN)))
    );
}
