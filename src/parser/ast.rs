use std::fmt;

use crate::lexer::Position;

/// Compiled program node
///
/// Trees are immutable once parsed and can be shared across threads; every
/// node remembers where it came from for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Symbol reference, looked up in the environment
    Symbol {
        /// Symbol name (case-sensitive)
        name: String,
        /// Source position
        position: Position,
    },

    /// Numeric literal
    Number {
        /// Parsed value
        value: f64,
        /// Literal as written
        lexeme: String,
        /// Source position
        position: Position,
    },

    /// String literal
    String {
        /// Content with escapes removed
        value: String,
        /// Source position of the opening quote
        position: Position,
    },

    /// Parenthesised list; the first item is the operation
    List {
        /// Child expressions
        items: Vec<Expression>,
        /// Source position of the opening `(`
        position: Position,
    },
}

impl Expression {
    /// Source position of this node
    pub fn position(&self) -> Position {
        match self {
            Expression::Symbol { position, .. }
            | Expression::Number { position, .. }
            | Expression::String { position, .. }
            | Expression::List { position, .. } => *position,
        }
    }

    /// True for symbols, numbers and strings
    pub fn is_atom(&self) -> bool {
        !matches!(self, Expression::List { .. })
    }

    /// Symbol name, if this is a symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expression::Symbol { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Children, if this is a list
    pub fn items(&self) -> Option<&[Expression]> {
        match self {
            Expression::List { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// Renders canonical source text that compiles back to the same tree shape
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Symbol { name, .. } => write!(f, "{}", name),
            Expression::Number { lexeme, .. } => write!(f, "{}", lexeme),
            Expression::String { value, .. } => {
                write!(f, "\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "\"")
            }
            Expression::List { items, .. } => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
