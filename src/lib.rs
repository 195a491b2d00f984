//! # simpl - type inference and evaluation for a small imperative language
//!
//! The language has integers, booleans, global and block-local variables,
//! `if`/`while`, and first-order functions with recursion. Declarations may be
//! annotated (`int x;`, `bool b;`) or left to inference (`var v;`); function
//! parameters work the same way.
//!
//! ## Pipeline
//!
//! ```text
//! Source text
//!     ↓
//! [Lexer] → Token stream (lachs)
//!     ↓
//! [Parser] → ast::Unit
//!     ↓
//! [Type inference] → Option<Type>, or a TypeError that rolls the checker back
//!     ↓
//! [Interpreter] → Option<Value>, or a RuntimeError
//! ```
//!
//! Input is processed one unit at a time: a bare expression, a single
//! declaration, statement or function, or a whole program. Both engines keep
//! their global state across units, which is what makes the REPL work.
//!
//! ## Key Design Decisions
//!
//! ### Union-find types
//! Type variables are resolved through a [`types::Substitution`] that links
//! each bound variable to another type and compresses chains on lookup.
//!
//! ### Copy-capture closures
//! A function value carries its own copy of the environment it was defined in.
//! Assignments made after the definition are not visible inside the function,
//! and a call cannot change variables of the defining scope. Assignments a
//! call makes to captured variables stay with the function and are seen by
//! its later calls.
//!
//! ### Checked units, partial runs
//! A unit that fails to type check is rejected as a whole and leaves the
//! checker untouched. A unit that fails at runtime keeps the effects of the
//! statements that completed before the failure.
//!
//! ## Module Structure
//!
//! - [`ast`] - Syntax tree
//! - [`lexer`] - Tokenization using lachs
//! - [`parser`] - Combinator-based parser
//! - [`fmt`] - Tree printer for the syntax tree
//! - [`scope`] - Scope stack shared by both engines
//! - [`types`] - Types, unification and inference
//! - [`interpreter`] - Tree-walking evaluator
//! - [`session`] - Checker and interpreter driven together
//!
//! ## Example
//!
//! ```
//! use simpl::session::Session;
//! use simpl::interpreter::Value;
//!
//! let mut session = Session::new();
//! session
//!     .run("function fact(int n) { if n < 1 return 1; else return n * fact(n - 1); }")
//!     .unwrap();
//! let outcome = session.run("fact(5)").unwrap();
//! assert_eq!(outcome.value, Some(Value::Integer(120)));
//! ```

pub mod ast;
pub mod fmt;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod session;
pub mod types;
