//! Host entry points: compile once, evaluate many times

use crate::error::{CompileResult, Result};
use crate::lexer::tokenize;
use crate::parser::{parse, Expression};
use crate::runtime::{Environment, Value};

/// Compiles source text into an expression tree
///
/// Scanner failures come back as [`CompileError::Tokenizer`] and grammar
/// failures as [`CompileError::Parser`]. The result is immutable and can be
/// evaluated any number of times, from any thread, each time with its own
/// environment.
///
/// [`CompileError::Tokenizer`]: crate::CompileError::Tokenizer
/// [`CompileError::Parser`]: crate::CompileError::Parser
pub fn compile(text: &str) -> CompileResult<Expression> {
    let tokens = tokenize(text)?;
    tracing::debug!(tokens = tokens.len(), "tokenized source");
    Ok(parse(tokens)?)
}

/// Compiles and evaluates `text` once
///
/// Handy for single-use programs such as initializers that fill an
/// environment with constants before the real program runs against it.
pub fn run(env: &mut Environment, text: &str) -> Result<Value> {
    let expr = compile(text)?;
    Ok(expr.eval(env)?)
}
