use super::token::{Position, Token, TokenKind};
use crate::error::{LexError, LexResult};

/// Columns between tab stops
pub const TAB_WIDTH: usize = 8;

/// Scanner states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between tokens
    Outside,
    /// Inside a symbol or number
    Bare,
    /// Inside `"..."`
    Quoted,
    /// Right after `\` inside a string
    Escaped,
    /// From `#` to the end of the line
    Comment,
}

/// Character classes driving the state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    LineBreak,
    Open,
    Close,
    Quote,
    Backslash,
    Hash,
    Other,
}

fn classify(c: char) -> CharClass {
    match c {
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => CharClass::LineBreak,
        '(' => CharClass::Open,
        ')' => CharClass::Close,
        '"' => CharClass::Quote,
        '\\' => CharClass::Backslash,
        '#' => CharClass::Hash,
        c if c.is_whitespace() => CharClass::Space,
        _ => CharClass::Other,
    }
}

fn next_tab_stop(column: usize) -> usize {
    ((column - 1) / TAB_WIDTH + 1) * TAB_WIDTH + 1
}

/// Scanner turning source text into positioned tokens
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    state: State,
    /// Index of the character being scanned
    current: usize,
    /// Index where the token in progress starts
    start: usize,
    /// Position of the token in progress
    start_position: Position,
    /// Decoded text of the token in progress
    text: String,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Previous character was `\r`, so a following `\n` is the same break
    after_cr: bool,
}

impl Scanner {
    /// Creates a new scanner over source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            state: State::Outside,
            current: 0,
            start: 0,
            start_position: Position::new(1, 1),
            text: String::new(),
            line: 1,
            column: 1,
            after_cr: false,
        }
    }

    /// Scans all tokens from source code
    pub fn scan_tokens(mut self) -> LexResult<Vec<Token>> {
        while self.current < self.source.len() {
            let c = self.source[self.current];
            self.step(c)?;
            self.advance(c);
        }

        match self.state {
            State::Bare => self.finish_bare(),
            State::Quoted | State::Escaped => return Err(LexError::UnexpectedEof),
            State::Outside | State::Comment => {}
        }

        Ok(self.tokens)
    }

    fn step(&mut self, c: char) -> LexResult<()> {
        let class = classify(c);

        match self.state {
            State::Outside => match class {
                CharClass::Space | CharClass::LineBreak => {}
                CharClass::Hash => self.state = State::Comment,
                CharClass::Open => self.add_delimiter(TokenKind::ListOpen, c),
                CharClass::Close => self.add_delimiter(TokenKind::ListClose, c),
                CharClass::Quote => {
                    self.begin_token();
                    self.state = State::Quoted;
                }
                CharClass::Backslash => return Err(self.unexpected(c)),
                CharClass::Other => {
                    self.begin_token();
                    self.text.push(c);
                    self.state = State::Bare;
                }
            },

            State::Bare => match class {
                CharClass::Space | CharClass::LineBreak => {
                    self.finish_bare();
                    self.state = State::Outside;
                }
                CharClass::Open => {
                    self.finish_bare();
                    self.add_delimiter(TokenKind::ListOpen, c);
                    self.state = State::Outside;
                }
                CharClass::Close => {
                    self.finish_bare();
                    self.add_delimiter(TokenKind::ListClose, c);
                    self.state = State::Outside;
                }
                // These would make the token ambiguous
                CharClass::Quote | CharClass::Backslash | CharClass::Hash => {
                    return Err(self.unexpected(c));
                }
                CharClass::Other => self.text.push(c),
            },

            State::Quoted => match class {
                CharClass::Backslash => self.state = State::Escaped,
                CharClass::Quote => {
                    self.finish_string();
                    self.state = State::Outside;
                }
                _ => self.text.push(c),
            },

            State::Escaped => {
                self.text.push(c);
                self.state = State::Quoted;
            }

            State::Comment => {
                if class == CharClass::LineBreak {
                    self.state = State::Outside;
                }
            }
        }

        Ok(())
    }

    /// Moves past `c`, keeping line and column in step
    fn advance(&mut self, c: char) {
        self.current += 1;
        let after_cr = std::mem::replace(&mut self.after_cr, c == '\r');
        match c {
            '\n' if after_cr => {}
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                self.line += 1;
                self.column = 1;
            }
            '\t' => self.column = next_tab_stop(self.column),
            _ => self.column += 1,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn unexpected(&self, ch: char) -> LexError {
        LexError::UnexpectedChar {
            ch,
            position: self.position(),
        }
    }

    fn begin_token(&mut self) {
        self.start = self.current;
        self.start_position = self.position();
        self.text.clear();
    }

    fn add_delimiter(&mut self, kind: TokenKind, c: char) {
        self.tokens
            .push(Token::new(kind, c.to_string(), self.position()));
    }

    fn finish_bare(&mut self) {
        let text = std::mem::take(&mut self.text);
        let kind = match text.parse::<f64>() {
            Ok(value) => TokenKind::Number(value),
            Err(_) => TokenKind::Symbol(text.clone()),
        };
        self.tokens.push(Token::new(kind, text, self.start_position));
    }

    /// Called on the closing quote, which is at `current`
    fn finish_string(&mut self) {
        let lexeme: String = self.source[self.start..=self.current].iter().collect();
        let value = std::mem::take(&mut self.text);
        self.tokens.push(Token::new(
            TokenKind::String(value),
            lexeme,
            self.start_position,
        ));
    }
}

/// Scans `text` into tokens
pub fn tokenize(text: &str) -> LexResult<Vec<Token>> {
    Scanner::new(text).scan_tokens()
}
