//! Expression parsers, one function per precedence level

use crate::ast::expression::{BinOpKind, BinaryOp, Expression, FunctionCall};
use crate::lexer::Token;

use crate::parser::combinators::{BoxedParser, expect_comma, expect_lparen, expect_rparen, separated};
use crate::parser::state::{ParseState, Parser};

use super::literal::{boolean, ident, integer};

/// expression := or
pub fn expression() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| or_expr().parse(state))
}

/// Left-associative chain of `operand (op operand)*`.
fn binary_level(
    operand: fn() -> BoxedParser<Expression>,
    operator: fn(&Token) -> Option<BinOpKind>,
) -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut left = operand().parse(state)?;

        while let Some(op) = state.peek().and_then(operator) {
            state.advance();
            let right = operand().parse(state)?;
            let position = left.position().merge(&right.position());
            left = Expression::BinaryOp(BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            });
        }

        Ok(left)
    })
}

/// or := and ("or" and)*
fn or_expr() -> BoxedParser<Expression> {
    binary_level(and_expr, |tok| match tok {
        Token::Or(_) => Some(BinOpKind::Or),
        _ => None,
    })
}

/// and := equality ("and" equality)*
fn and_expr() -> BoxedParser<Expression> {
    binary_level(equality_expr, |tok| match tok {
        Token::And(_) => Some(BinOpKind::And),
        _ => None,
    })
}

/// equality := comparison ("==" comparison)*
fn equality_expr() -> BoxedParser<Expression> {
    binary_level(comparison_expr, |tok| match tok {
        Token::DoubleEquals(_) => Some(BinOpKind::Eq),
        _ => None,
    })
}

/// comparison := additive (("<" | ">") additive)*
fn comparison_expr() -> BoxedParser<Expression> {
    binary_level(additive_expr, |tok| match tok {
        Token::LessThan(_) => Some(BinOpKind::Lt),
        Token::GreaterThan(_) => Some(BinOpKind::Gt),
        _ => None,
    })
}

/// additive := term (("+" | "-") term)*
fn additive_expr() -> BoxedParser<Expression> {
    binary_level(term_expr, |tok| match tok {
        Token::Plus(_) => Some(BinOpKind::Add),
        Token::Minus(_) => Some(BinOpKind::Sub),
        _ => None,
    })
}

/// term := primary (("*" | "/") primary)*
fn term_expr() -> BoxedParser<Expression> {
    binary_level(primary, |tok| match tok {
        Token::Star(_) => Some(BinOpKind::Mul),
        Token::Slash(_) => Some(BinOpKind::Div),
        _ => None,
    })
}

/// call := ident "(" [expression ("," expression)*] ")"
pub fn function_call() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let func = ident().parse(state)?;
        expect_lparen().parse(state)?;
        let args = separated(expression(), expect_comma()).parse(state)?;
        let end = expect_rparen().parse(state)?.pos();

        let position = func.position.merge(&end);
        Ok(Expression::FunctionCall(FunctionCall {
            func,
            args,
            position,
        }))
    })
}

/// "(" expression ")"
fn parenthesized() -> BoxedParser<Expression> {
    expect_lparen() * expression() - expect_rparen()
}

/// primary := integer | "true" | "false" | call | ident | "(" expression ")"
fn primary() -> BoxedParser<Expression> {
    let int_expr = integer() >> Expression::Integer;
    let bool_expr = boolean() >> Expression::Boolean;
    let ident_expr = ident() >> Expression::Ident;

    (int_expr | bool_expr | function_call() | ident_expr | parenthesized()).label("expression")
}
