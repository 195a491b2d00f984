//! Literal parsers: identifiers, integers, booleans and type keywords

use lachs::Span;

use crate::ast::TypeName;
use crate::ast::expression::{Boolean, Ident, Integer};
use crate::lexer::Token;

use crate::parser::combinators::{BoxedParser, expect_bool, expect_int, expect_var};
use crate::parser::state::{ParseError, ParseState};

/// Parse an identifier
pub fn ident() -> BoxedParser<Ident> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Ident(id)) => {
            let ident = Ident {
                value: id.value.clone(),
                position: id.position.clone(),
            };
            state.advance();
            Ok(ident)
        }
        _ => Err(state.error_expected("identifier")),
    })
}

/// Parse an integer literal
pub fn integer() -> BoxedParser<Integer> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Integer(int)) => {
            let position = int.position.clone();
            let value = int.value.parse::<i64>().map_err(|_| {
                ParseError::new("integer literal out of range")
                    .found(int.value.clone())
                    .at(position.clone())
            })?;
            state.advance();
            Ok(Integer { value, position })
        }
        _ => Err(state.error_expected("integer")),
    })
}

/// Parse a boolean literal
pub fn boolean() -> BoxedParser<Boolean> {
    BoxedParser::new(|state: &mut ParseState| {
        let value = match state.peek() {
            Some(Token::True(_)) => true,
            Some(Token::False(_)) => false,
            _ => return Err(state.error_expected("boolean")),
        };
        let position = state.advance().map(|tok| tok.pos()).unwrap_or_default();
        Ok(Boolean { value, position })
    })
}

/// type := "int" | "bool" | "var"
///
/// `var` leaves the type to be inferred and yields `None`.
pub fn type_name() -> BoxedParser<(Option<TypeName>, Span)> {
    let int_ty = expect_int() >> |tok: Token| (Some(TypeName::Int), tok.pos());
    let bool_ty = expect_bool() >> |tok: Token| (Some(TypeName::Bool), tok.pos());
    let var_ty = expect_var() >> |tok: Token| (None::<TypeName>, tok.pos());

    (int_ty | bool_ty | var_ty).label("type")
}
