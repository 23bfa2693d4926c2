use super::ast::Expression;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Position, Token, TokenKind};

/// What one step of the descent produced
enum Node {
    Expression(Expression),
    /// A `)` was consumed; only meaningful to an enclosing list
    Close(Position),
}

/// Recursive-descent parser for S-expressions
pub struct Parser {
    /// Remaining tokens; each is moved out as it is consumed
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    /// Creates a new parser over scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter(),
        }
    }

    /// Parses exactly one expression; leftover tokens are an error
    pub fn parse(mut self) -> ParseResult<Expression> {
        let root = match self.parse_node()? {
            Node::Expression(expr) => expr,
            Node::Close(position) => return Err(ParseError::UnexpectedClose { position }),
        };

        if let Some(token) = self.tokens.next() {
            return Err(ParseError::ExtraContent { token });
        }

        Ok(root)
    }

    fn parse_node(&mut self) -> ParseResult<Node> {
        let Some(token) = self.tokens.next() else {
            return Err(ParseError::UnexpectedEof);
        };
        let position = token.position;

        let expr = match token.kind {
            TokenKind::ListOpen => return self.parse_list(position).map(Node::Expression),
            TokenKind::ListClose => return Ok(Node::Close(position)),
            TokenKind::Symbol(name) => Expression::Symbol { name, position },
            TokenKind::Number(value) => Expression::Number {
                value,
                lexeme: token.lexeme,
                position,
            },
            TokenKind::String(value) => Expression::String { value, position },
        };

        Ok(Node::Expression(expr))
    }

    /// Parses list items after the `(` at `opened_at`
    fn parse_list(&mut self, opened_at: Position) -> ParseResult<Expression> {
        let mut items = Vec::new();

        loop {
            match self.parse_node() {
                Ok(Node::Expression(expr)) => items.push(expr),
                Ok(Node::Close(_)) => {
                    return Ok(Expression::List {
                        items,
                        position: opened_at,
                    })
                }
                Err(ParseError::UnexpectedEof) => {
                    return Err(ParseError::UnclosedList {
                        position: opened_at,
                    })
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Parses a token list into a single expression
pub fn parse(tokens: Vec<Token>) -> ParseResult<Expression> {
    Parser::new(tokens).parse()
}
