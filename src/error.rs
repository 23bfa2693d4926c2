//! Error types for lispex
//!
//! Every stage has its own error enum so hosts can tell a malformed program
//! apart from a program that failed while running. [`Error`] wraps all of them
//! for the one-shot entry points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexer::{Position, Token};

/// Scanner errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that cannot appear at this point of the input
    ///
    /// **Triggered by:** `"`, `\` or `#` inside a bare token, or a naked `\`
    /// **Example:** `x"` fails at 1:2
    #[error("unexpected char {ch} at {position}")]
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// Where it was found
        position: Position,
    },

    /// Input ended inside a quoted string or right after an escape
    #[error("unexpected end of file")]
    UnexpectedEof,
}

/// Parser errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No tokens left where an expression was expected
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// Input ended before the list opened at `position` was closed
    ///
    /// **Example:** `(()` reports the outer list at 1:1
    #[error("unexpected end of file; cannot close list opened at {position}")]
    UnclosedList {
        /// Position of the unmatched `(`
        position: Position,
    },

    /// `)` where an expression was expected
    #[error("unexpected \")\" at {position}")]
    UnexpectedClose {
        /// Position of the stray `)`
        position: Position,
    },

    /// Tokens left over after the single top-level expression
    #[error("extra content after token {token}")]
    ExtraContent {
        /// First token that was not consumed
        token: Token,
    },
}

/// Errors produced by [`compile`](crate::compile), tagged with the failing stage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The scanner rejected the text
    #[error("tokenizer error: {0}")]
    Tokenizer(#[from] LexError),

    /// The token stream is not a single well-formed expression
    #[error("parser error: {0}")]
    Parser(#[from] ParseError),
}

impl CompileError {
    /// Name of the stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Tokenizer(_) => Stage::Tokenizer,
            CompileError::Parser(_) => Stage::Parser,
        }
    }

    /// Source position of the failure, if the error carries one
    pub fn position(&self) -> Option<Position> {
        match self {
            CompileError::Tokenizer(LexError::UnexpectedChar { position, .. }) => Some(*position),
            CompileError::Tokenizer(LexError::UnexpectedEof) => None,
            CompileError::Parser(ParseError::UnclosedList { position })
            | CompileError::Parser(ParseError::UnexpectedClose { position }) => Some(*position),
            CompileError::Parser(ParseError::ExtraContent { token }) => Some(token.position),
            CompileError::Parser(ParseError::UnexpectedEof) => None,
        }
    }
}

/// Evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Symbol not bound in the environment
    ///
    /// **Example:** `(X)` against an empty environment
    #[error("unknown symbol {name} at {position}")]
    UnknownSymbol {
        /// Symbol name
        name: String,
        /// Position of the symbol
        position: Position,
    },

    /// The head of a list did not evaluate to an operation
    #[error("value of kind {kind} is not executable: {expression} at {position}")]
    NotExecutable {
        /// Kind of the value the head produced
        kind: &'static str,
        /// Rendering of the head expression
        expression: String,
        /// Position of the head expression
        position: Position,
    },

    /// A coercion helper was handed an absent expression slot
    #[error("nil expression")]
    NilExpression,

    /// A string value that does not parse as a number
    #[error("cannot convert {value:?} to number while evaluating {expression} at {position}")]
    NumberConversion {
        /// The string that failed to parse
        value: String,
        /// Rendering of the evaluated expression
        expression: String,
        /// Position of the evaluated expression
        position: Position,
    },

    /// A value kind the coercion helper does not accept
    #[error("cannot convert {kind} to {target}: {expression} at {position}")]
    CannotConvert {
        /// `"number"` or `"string"`
        target: &'static str,
        /// Kind of the value produced
        kind: &'static str,
        /// Rendering of the evaluated expression
        expression: String,
        /// Position of the evaluated expression
        position: Position,
    },

    /// Raised by a host operation
    #[error("{message}")]
    Operation {
        /// Host supplied message
        message: String,
    },
}

impl EvalError {
    /// Create an operation error with a message
    pub fn operation(message: impl Into<String>) -> Self {
        EvalError::Operation {
            message: message.into(),
        }
    }

    /// Source position of the failure, if the error carries one
    pub fn position(&self) -> Option<Position> {
        match self {
            EvalError::UnknownSymbol { position, .. }
            | EvalError::NotExecutable { position, .. }
            | EvalError::NumberConversion { position, .. }
            | EvalError::CannotConvert { position, .. } => Some(*position),
            EvalError::NilExpression | EvalError::Operation { .. } => None,
        }
    }
}

/// Any lispex error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Compilation failed
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Evaluation failed
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// The batch evaluator could not build its worker pool
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl Error {
    /// Stage the error originated in
    pub fn stage(&self) -> Stage {
        match self {
            Error::Compile(e) => e.stage(),
            Error::Eval(_) => Stage::Evaluation,
            Error::ThreadPool(_) => Stage::Host,
        }
    }

    /// Structured form of this error for hosts that ship diagnostics elsewhere
    pub fn diagnostic(&self) -> Diagnostic {
        let position = match self {
            Error::Compile(e) => e.position(),
            Error::Eval(e) => e.position(),
            Error::ThreadPool(_) => None,
        };
        Diagnostic {
            stage: self.stage(),
            message: self.to_string(),
            line: position.map(|p| p.line),
            column: position.map(|p| p.column),
        }
    }
}

/// Pipeline stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Scanning source text into tokens
    Tokenizer,
    /// Building the expression tree
    Parser,
    /// Running a compiled expression
    Evaluation,
    /// Host-side machinery around evaluation
    Host,
}

/// Serializable diagnostic record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Failing stage
    pub stage: Stage,
    /// Human readable message, same as the error's `Display`
    pub message: String,
    /// 1-based line, when known
    pub line: Option<usize>,
    /// 1-based column, when known
    pub column: Option<usize>,
}

/// Result type for the scanner
pub type LexResult<T> = std::result::Result<T, LexError>;

/// Result type for the parser
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type for compilation
pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Result type for evaluation and operations
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Result type for lispex operations that span stages
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_stage_prefix() {
        let err = CompileError::from(LexError::UnexpectedChar {
            ch: '\\',
            position: Position::new(1, 1),
        });
        assert_eq!(err.to_string(), "tokenizer error: unexpected char \\ at 1:1");
        assert_eq!(err.stage(), Stage::Tokenizer);

        let err = CompileError::from(ParseError::UnclosedList {
            position: Position::new(2, 3),
        });
        assert_eq!(
            err.to_string(),
            "parser error: unexpected end of file; cannot close list opened at 2:3"
        );
        assert_eq!(err.position(), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_diagnostic_without_position() {
        let err = Error::from(EvalError::operation("too few args"));
        let diag = err.diagnostic();
        assert_eq!(diag.stage, Stage::Evaluation);
        assert_eq!(diag.message, "too few args");
        assert_eq!(diag.line, None);
    }

    #[test]
    fn test_diagnostic_with_position() {
        let err = Error::from(EvalError::UnknownSymbol {
            name: "X".to_string(),
            position: Position::new(1, 2),
        });
        let diag = err.diagnostic();
        assert_eq!(diag.line, Some(1));
        assert_eq!(diag.column, Some(2));
        assert!(diag.message.contains("unknown symbol X"));
    }

    #[test]
    fn test_conversion_errors_carry_position() {
        let err = Error::from(EvalError::CannotConvert {
            target: "number",
            kind: "nil",
            expression: "(f x)".to_string(),
            position: Position::new(3, 5),
        });
        assert_eq!(err.to_string(), "cannot convert nil to number: (f x) at 3:5");

        let diag = err.diagnostic();
        assert_eq!(diag.line, Some(3));
        assert_eq!(diag.column, Some(5));
    }
}
