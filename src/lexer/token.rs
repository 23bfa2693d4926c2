use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based location in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, tabs expanded)
    pub column: usize,
}

impl Position {
    /// Creates a position from line and column
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single token from the source code
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token, with its decoded payload
    pub kind: TokenKind,
    /// Original text of the token, quotes and escapes included
    pub lexeme: String,
    /// Position of the token's first character
    pub position: Position,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, position: Position) -> Self {
        Token {
            kind,
            lexeme,
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} at {}", self.kind.name(), self.lexeme, self.position)
    }
}

/// All token types
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Bare run that is not a number
    Symbol(String),
    /// Bare run that parses as a floating-point literal
    Number(f64),
    /// Quoted string with escapes removed
    String(String),
    /// `(`
    ListOpen,
    /// `)`
    ListClose,
}

impl TokenKind {
    /// Short human readable name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Number(_) => "number",
            TokenKind::String(_) => "string",
            TokenKind::ListOpen => "list-open",
            TokenKind::ListClose => "list-close",
        }
    }
}
