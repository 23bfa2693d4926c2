//! lispex parser module
//!
//! Builds the expression tree from scanned tokens. The grammar has a single
//! production: an expression is an atom or a parenthesised list of
//! expressions.

mod ast;
mod sexpr_parser;

pub use ast::Expression;
pub use sexpr_parser::{parse, Parser};
