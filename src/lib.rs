//! # lispex - embeddable Lisp-like expressions
//!
//! A tiny S-expression language meant to live inside a larger program, for
//! example as a rule layer or a feature transformation layer. Programs are
//! compiled once into an immutable tree and evaluated as often as needed
//! against environments the host fills with data and operations.
//!
//! The language has no built-in operations at all. Every callable, including
//! `if`, loops and arithmetic, is supplied by the host as an [`Operation`]
//! that receives its arguments *unevaluated*.
//!
//! ## Quick Start
//!
//! ```rust
//! use lispex::{compile, eval_as_number, Environment, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut env = Environment::new();
//! env.define_operation("+", |env, args| {
//!     let mut sum = 0.0;
//!     for arg in args {
//!         sum += eval_as_number(env, Some(arg))?;
//!     }
//!     Ok(Value::Number(sum))
//! });
//!
//! // Compile once...
//! let program = compile("(+ 1 2)")?;
//!
//! // ...evaluate as often as needed
//! assert_eq!(program.eval(&mut env)?, Value::Number(3.0));
//! assert_eq!(program.eval(&mut env)?, Value::Number(3.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Syntax
//!
//! ```text
//! (vector                       # lists: head operation, then arguments
//!     (in code "+44")           # strings in double quotes, \ escapes one char
//!     (* 2.5 x))                # numbers are any floating-point literal
//! ```
//!
//! Everything after `#` up to the end of the line is a comment. A program is
//! exactly one expression.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → Expression → eval(env) → Value
//! ```
//!
//! - [`lexer`] - positioned tokens
//! - [`parser`] - the [`Expression`] tree
//! - [`runtime`] - [`Value`], [`Environment`], [`Operation`] and evaluation
//! - [`parallel`] - one expression against many environments
//!
//! ## Error Handling
//!
//! ```rust
//! # use lispex::{run, Environment};
//! let mut env = Environment::new();
//! let err = run(&mut env, "(X)").unwrap_err();
//! assert_eq!(err.to_string(), "unknown symbol X at 1:2");
//! ```

pub mod error;
pub mod lexer;
pub mod parallel;
pub mod parser;
mod program;
pub mod runtime;

/// Version of the lispex crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types
pub use error::{
    CompileError, Diagnostic, Error, EvalError, EvalResult, LexError, ParseError, Result, Stage,
};
pub use lexer::{tokenize, Position, Scanner, Token, TokenKind};
pub use parser::{parse, Expression, Parser};
pub use program::{compile, run};
pub use runtime::{eval, eval_as_number, eval_as_string, Environment, Operation, Value};
