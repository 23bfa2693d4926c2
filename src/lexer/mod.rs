//! Lexical analysis for lispex
//!
//! Converts source text into a flat list of positioned tokens.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::{tokenize, Scanner, TAB_WIDTH};
pub use token::{Position, Token, TokenKind};
