//! Statement, block and declaration parsers

use crate::ast::VarDecl;
use crate::ast::statement::{Assignment, Block, If, Return, Statement, While};
use crate::lexer::Token;

use crate::parser::combinators::{
    BoxedParser, expect_assign, expect_else, expect_if, expect_lbrace, expect_rbrace,
    expect_return, expect_semicolon, expect_while, many, optional,
};
use crate::parser::state::{ParseState, Parser};

use super::expression::expression;
use super::literal::{ident, type_name};

/// declaration := type ident ";"
pub fn declaration() -> BoxedParser<VarDecl> {
    (parameter() + expect_semicolon())
        >> |(decl, semi): (VarDecl, Token)| VarDecl {
            position: decl.position.merge(&semi.pos()),
            ..decl
        }
}

/// param := type ident
pub fn parameter() -> BoxedParser<VarDecl> {
    (type_name() + ident())
        >> |((ty, start), name)| {
            let position = start.merge(&name.position);
            VarDecl { name, ty, position }
        }
}

/// block := "{" declaration* statement* "}"
pub fn block() -> BoxedParser<Block> {
    BoxedParser::new(|state: &mut ParseState| {
        let start = expect_lbrace().parse(state)?.pos();

        let declarations = many(declaration()).parse(state)?;

        let mut statements = vec![];
        while state.has_next() && !matches!(state.peek(), Some(Token::RBrace(_))) {
            statements.push(statement().parse(state)?);
        }

        let end = expect_rbrace().parse(state)?.pos();
        Ok(Block {
            declarations,
            statements,
            position: start.merge(&end),
        })
    })
}

/// if := "if" expression statement ["else" statement]
fn if_statement() -> BoxedParser<Statement> {
    BoxedParser::new(|state: &mut ParseState| {
        let start = expect_if().parse(state)?.pos();
        let condition = expression().parse(state)?;
        let then_branch = statement().parse(state)?;
        let else_branch = optional(expect_else() * statement()).parse(state)?;

        let end = match &else_branch {
            Some(stmt) => stmt.position(),
            None => then_branch.position(),
        };
        Ok(Statement::If(If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
            position: start.merge(&end),
        }))
    })
}

/// while := "while" expression statement
fn while_statement() -> BoxedParser<Statement> {
    (expect_while() + expression() + statement())
        >> |((start, condition), body)| {
            let position = start.pos().merge(&body.position());
            Statement::While(While {
                condition,
                body: Box::new(body),
                position,
            })
        }
}

/// return := "return" expression ";"
fn return_statement() -> BoxedParser<Statement> {
    (expect_return() + expression() + expect_semicolon())
        >> |((start, value), end)| {
            Statement::Return(Return {
                value,
                position: start.pos().merge(&end.pos()),
            })
        }
}

/// assignment := ident ":=" expression ";"
fn assignment() -> BoxedParser<Statement> {
    ((ident() - expect_assign()) + expression() + expect_semicolon())
        >> |((name, value), end)| {
            let position = name.position.merge(&end.pos());
            Statement::Assignment(Assignment {
                name,
                value,
                position,
            })
        }
}

/// statement := block | if | while | return | assignment
pub fn statement() -> BoxedParser<Statement> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::LBrace(_)) => block().map(Statement::Block).parse(state),
        Some(Token::If(_)) => if_statement().parse(state),
        Some(Token::While(_)) => while_statement().parse(state),
        Some(Token::Return(_)) => return_statement().parse(state),
        Some(Token::Ident(_)) => assignment().parse(state),
        _ => Err(state.error_expected("statement")),
    })
}
