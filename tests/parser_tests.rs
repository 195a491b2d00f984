use simpl::ast::expression::{BinOpKind, Expression};
use simpl::ast::statement::Statement;
use simpl::ast::{TypeName, Unit};
use simpl::parser::parse_source;

fn parse_unit(input: &str) -> Unit {
    match parse_source(input) {
        Ok(unit) => unit,
        Err(err) => panic!("parsing failed: {}", err),
    }
}

fn parse_expression(input: &str) -> Expression {
    match parse_unit(input) {
        Unit::Expression(expr) => expr,
        other => panic!("expected expression, got {:?}", other),
    }
}

#[test]
fn parse_integer_expression() {
    let expr = parse_expression("42");
    assert!(matches!(expr, Expression::Integer(ref i) if i.value == 42));
}

#[test]
fn parse_expression_with_semicolon() {
    let expr = parse_expression("true;");
    assert!(matches!(expr, Expression::Boolean(ref b) if b.value));
}

#[test]
fn parse_precedence_mul_over_add() {
    let expr = parse_expression("1 + 2 * 3");
    let Expression::BinaryOp(add) = expr else {
        panic!("expected binary op");
    };
    assert_eq!(add.op, BinOpKind::Add);
    assert!(matches!(*add.right, Expression::BinaryOp(ref mul) if mul.op == BinOpKind::Mul));
}

#[test]
fn parse_left_associative() {
    let expr = parse_expression("10 - 3 - 2");
    let Expression::BinaryOp(outer) = expr else {
        panic!("expected binary op");
    };
    assert_eq!(outer.op, BinOpKind::Sub);
    assert!(matches!(*outer.left, Expression::BinaryOp(ref inner) if inner.op == BinOpKind::Sub));
    assert!(matches!(*outer.right, Expression::Integer(ref i) if i.value == 2));
}

#[test]
fn parse_logical_precedence() {
    let expr = parse_expression("a or b and c == d");
    let Expression::BinaryOp(or) = expr else {
        panic!("expected binary op");
    };
    assert_eq!(or.op, BinOpKind::Or);
    let Expression::BinaryOp(and) = &*or.right else {
        panic!("expected and");
    };
    assert_eq!(and.op, BinOpKind::And);
    assert!(matches!(*and.right, Expression::BinaryOp(ref eq) if eq.op == BinOpKind::Eq));
}

#[test]
fn parse_parentheses() {
    let expr = parse_expression("(1 + 2) * 3");
    let Expression::BinaryOp(mul) = expr else {
        panic!("expected binary op");
    };
    assert_eq!(mul.op, BinOpKind::Mul);
    assert!(matches!(*mul.left, Expression::BinaryOp(ref add) if add.op == BinOpKind::Add));
}

#[test]
fn parse_function_call() {
    let expr = parse_expression("add(1, x + 2)");
    let Expression::FunctionCall(call) = expr else {
        panic!("expected call");
    };
    assert_eq!(call.func.value, "add");
    assert_eq!(call.args.len(), 2);
}

#[test]
fn parse_call_without_arguments() {
    let expr = parse_expression("f()");
    assert!(matches!(expr, Expression::FunctionCall(ref call) if call.args.is_empty()));
}

#[test]
fn parse_declarations() {
    for (src, ty) in [
        ("int x;", Some(TypeName::Int)),
        ("bool x;", Some(TypeName::Bool)),
        ("var x;", None),
    ] {
        let Unit::Declaration(decl) = parse_unit(src) else {
            panic!("expected declaration for {src}");
        };
        assert_eq!(decl.name.value, "x");
        assert_eq!(decl.ty, ty);
    }
}

#[test]
fn parse_assignment() {
    let Unit::Statement(Statement::Assignment(assign)) = parse_unit("x := 42;") else {
        panic!("expected assignment");
    };
    assert_eq!(assign.name.value, "x");
    assert!(matches!(assign.value, Expression::Integer(ref i) if i.value == 42));
}

#[test]
fn parse_function_definition() {
    let Unit::Function(func) = parse_unit("function add(int a, var b) { int c; c := a + b; return c; }")
    else {
        panic!("expected function");
    };
    assert_eq!(func.name.value, "add");
    assert_eq!(func.params.len(), 2);
    assert_eq!(func.params[0].ty, Some(TypeName::Int));
    assert_eq!(func.params[1].ty, None);
    assert_eq!(func.body.declarations.len(), 1);
    assert_eq!(func.body.statements.len(), 2);
}

#[test]
fn parse_if_else() {
    let Unit::Statement(Statement::If(if_stmt)) = parse_unit("if x < 1 y := 1; else { y := 2; }")
    else {
        panic!("expected if");
    };
    assert!(matches!(*if_stmt.then_branch, Statement::Assignment(_)));
    assert!(matches!(
        if_stmt.else_branch.as_deref(),
        Some(Statement::Block(_))
    ));
}

#[test]
fn parse_dangling_else_binds_inner_if() {
    let Unit::Statement(Statement::If(outer)) = parse_unit("if a if b x := 1; else x := 2;")
    else {
        panic!("expected if");
    };
    assert!(outer.else_branch.is_none());
    assert!(matches!(&*outer.then_branch, Statement::If(inner) if inner.else_branch.is_some()));
}

#[test]
fn parse_while() {
    let Unit::Statement(Statement::While(while_stmt)) =
        parse_unit("while n > 0 { n := n - 1; }")
    else {
        panic!("expected while");
    };
    assert!(matches!(*while_stmt.body, Statement::Block(_)));
}

#[test]
fn parse_program_is_partitioned() {
    let Unit::Program(program) = parse_unit(
        "x := 1;
         int x;
         function f() { return 1; }
         bool y;",
    ) else {
        panic!("expected program");
    };
    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.globals.len(), 2);
    assert_eq!(program.main.len(), 1);
}

#[test]
fn parse_empty_input() {
    let Unit::Program(program) = parse_unit("") else {
        panic!("expected empty program");
    };
    assert!(program.functions.is_empty());
    assert!(program.globals.is_empty());
    assert!(program.main.is_empty());
}

#[test]
fn parse_with_comments() {
    let unit = parse_unit("// leading comment\nint x; // trailing\n");
    assert!(matches!(unit, Unit::Declaration(_)));
}

#[test]
fn parse_error_missing_semicolon() {
    let err = parse_source("x := 1").unwrap_err();
    assert!(err.to_string().contains("';'"), "unexpected message: {err}");
}

#[test]
fn parse_error_reports_found_token() {
    let err = parse_source("x := ;").unwrap_err();
    assert_eq!(err.found.as_deref(), Some("';'"));
}

#[test]
fn parse_error_unclosed_block() {
    assert!(parse_source("{ x := 1;").is_err());
}
