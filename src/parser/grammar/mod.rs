//! Grammar for one input unit
//!
//! This module contains all the parsing rules organized by category:
//! - `literal`: identifiers, integers, booleans and type keywords
//! - `expression`: operators by precedence, calls, parentheses
//! - `statement`: declarations, blocks and statements

mod expression;
mod literal;
mod statement;

use crate::ast::{FunctionDef, Program, Unit, VarDecl};
use crate::ast::statement::Statement;
use crate::lexer::Token;

use super::combinators::{BoxedParser, expect_comma, expect_function, expect_lparen, expect_rparen, expect_semicolon, optional, separated};
use super::state::{ParseError, ParseState, Parser};

pub use expression::expression;
pub use literal::ident;
pub use statement::{block, declaration, statement};

use statement::parameter;

/// One top-level construct of a multi-item program.
enum Item {
    Function(FunctionDef),
    Declaration(VarDecl),
    Statement(Statement),
}

/// function := "function" ident "(" [param ("," param)*] ")" block
pub fn function() -> BoxedParser<FunctionDef> {
    BoxedParser::new(|state: &mut ParseState| {
        let start = expect_function().parse(state)?.pos();
        let name = ident().label("function name").parse(state)?;
        expect_lparen().parse(state)?;
        let params = separated(parameter(), expect_comma()).parse(state)?;
        expect_rparen().parse(state)?;
        let body = block().parse(state)?;

        let position = start.merge(&body.position);
        Ok(FunctionDef {
            name,
            params,
            body,
            position,
        })
    })
}

/// item := function | declaration | statement
fn item() -> BoxedParser<Item> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Function(_)) => function().map(Item::Function).parse(state),
        Some(Token::Int(_) | Token::Bool(_) | Token::Var(_)) => {
            declaration().map(Item::Declaration).parse(state)
        }
        _ => statement().map(Item::Statement).parse(state),
    })
}

/// expression ";"? EOF
fn bare_expression(state: &mut ParseState) -> Option<Unit> {
    let pos = state.position();
    let parsed = (expression() - optional(expect_semicolon())).parse(state);
    match parsed {
        Ok(expr) if !state.has_next() => Some(Unit::Expression(expr)),
        _ => {
            state.restore(pos);
            None
        }
    }
}

/// unit := expression ";"? EOF | item* EOF
///
/// A single item becomes the matching [`Unit`] variant; several items are
/// partitioned into a [`Program`].
pub fn unit(state: &mut ParseState) -> Result<Unit, ParseError> {
    if let Some(unit) = bare_expression(state) {
        return Ok(unit);
    }

    let mut items = vec![];
    while state.has_next() {
        match item().parse(state) {
            Ok(item) => items.push(item),
            Err(err) => return Err(state.furthest_error().cloned().unwrap_or(err)),
        }
    }

    if items.len() == 1 {
        if let Some(item) = items.pop() {
            return Ok(match item {
                Item::Function(func) => Unit::Function(func),
                Item::Declaration(decl) => Unit::Declaration(decl),
                Item::Statement(stmt) => Unit::Statement(stmt),
            });
        }
    }

    let mut program = Program::default();
    for item in items {
        match item {
            Item::Function(func) => program.functions.push(func),
            Item::Declaration(decl) => program.globals.push(decl),
            Item::Statement(stmt) => program.main.push(stmt),
        }
    }
    Ok(Unit::Program(program))
}
