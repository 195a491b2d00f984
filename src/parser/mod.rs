//! Parser from source text to a [`Unit`].
//!
//! Built from small combinators over the token stream produced by
//! [`Token::lex`]. Alternatives backtrack freely; when everything fails, the
//! error reported is the one that got furthest into the input.

mod combinators;
mod grammar;
mod state;

pub use combinators::*;
pub use grammar::*;
pub use state::{ParseError, ParseResult, ParseState, Parser};

use tracing::trace;

use crate::ast::Unit;
use crate::lexer::{Token, strip_comments};

/// Lex and parse one unit of source text.
pub fn parse_source(source: &str) -> Result<Unit, ParseError> {
    let source = strip_comments(source);
    let tokens =
        Token::lex(&source).map_err(|err| ParseError::new(format!("lexing failed: {err}")))?;
    trace!(tokens = tokens.len(), "lexed unit");

    let mut state = ParseState::new(tokens);
    grammar::unit(&mut state)
}
