//! Lexer for Rustica
//!
//! Converts source code into a stream of tokens.

use log::trace;

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{column_at, Span};

/// The lexer state
pub struct Lexer<'src> {
    /// Source text, used for byte offsets and column lookup
    text: &'src str,
    /// Source characters with their byte offsets
    source: Vec<(usize, char)>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
    /// Current line (1-based)
    line: usize,
    /// Line on which the current token starts
    start_line: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            source: text.char_indices().collect(),
            pos: 0,
            start: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).map(|&(_, c)| c)
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).map(|&(_, c)| c)
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.source.get(index).map(|&(b, _)| b).unwrap_or(self.text.len())
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        let start = self.byte_offset(self.start);
        Span::new(
            start,
            self.byte_offset(self.pos),
            self.start_line,
            column_at(self.text, start),
        )
    }

    /// Create a token with the current span
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.pos].iter().map(|&(_, c)| c).collect()
    }

    /// Skip whitespace and comments. Returns the position and line of a
    /// block comment that runs to the end of input.
    fn skip_whitespace(&mut self) -> Option<(usize, usize)> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    let opening = (self.pos, self.line);
                    self.advance();
                    self.advance();
                    loop {
                        if self.is_at_end() {
                            return Some(opening);
                        }
                        if self.peek() == Some('*') && self.peek_next() == Some('/') {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
        None
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.lexeme();
        let kind = TokenKind::keyword_from_str(&text).unwrap_or(TokenKind::Ident(text));
        self.make_token(kind)
    }

    /// Read a number literal (integer or float)
    fn read_number(&mut self) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        // `1..3` is a range, `1.5` is a float
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
            let text = self.lexeme();
            let kind = match text.parse::<f64>() {
                Ok(value) if value.is_finite() => TokenKind::FloatLit(value, text),
                _ => TokenKind::Invalid(text),
            };
            return self.make_token(kind);
        }

        let text = self.lexeme();
        let kind = match text.parse() {
            Ok(value) => TokenKind::IntLit(value),
            Err(_) => TokenKind::Invalid(text),
        };
        self.make_token(kind)
    }

    fn read_escape(&mut self) -> Option<char> {
        match self.advance()? {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '0' => Some('\0'),
            other => Some(other),
        }
    }

    /// Read a string literal
    fn read_string(&mut self) -> Token {
        self.advance(); // consume opening quote

        let mut value = String::new();
        let mut closed = false;
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.advance();
                    closed = true;
                    break;
                }
                '\\' => {
                    self.advance();
                    if let Some(escaped) = self.read_escape() {
                        value.push(escaped);
                    }
                }
                _ => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        if !closed {
            return self.make_token(TokenKind::Invalid("\"".to_string()));
        }
        self.make_token(TokenKind::StringLit(value))
    }

    /// Read a character literal
    fn read_char(&mut self) -> Token {
        self.advance(); // consume opening quote

        let c = match self.peek() {
            Some('\\') => {
                self.advance();
                self.read_escape()
            }
            Some('\'') | None => None,
            Some(_) => self.advance(),
        };

        match c {
            Some(c) if self.peek() == Some('\'') => {
                self.advance();
                self.make_token(TokenKind::CharLit(c))
            }
            // Not a well-formed literal: report the quote itself and resume after it
            _ => {
                self.pos = self.start + 1;
                self.line = self.start_line;
                self.make_token(TokenKind::Unknown('\''))
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        if let Some((open, line)) = self.skip_whitespace() {
            self.start = open;
            self.start_line = line;
            return self.make_token(TokenKind::Invalid("/*".to_string()));
        }
        self.start = self.pos;
        self.start_line = self.line;

        let Some(c) = self.peek() else {
            return Token::eof(self.make_span());
        };

        if c.is_ascii_alphabetic() || c == '_' {
            return self.read_identifier();
        }
        if c.is_ascii_digit() {
            return self.read_number();
        }
        if c == '"' {
            return self.read_string();
        }
        if c == '\'' {
            return self.read_char();
        }

        self.advance();

        // Operators and punctuation
        let kind = match c {
            '+' => self.with_eq(TokenKind::PlusEq, TokenKind::Plus),
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    self.with_eq(TokenKind::MinusEq, TokenKind::Minus)
                }
            }
            '*' => self.with_eq(TokenKind::StarEq, TokenKind::Star),
            '/' => self.with_eq(TokenKind::SlashEq, TokenKind::Slash),
            '%' => self.with_eq(TokenKind::PercentEq, TokenKind::Percent),
            '=' => self.with_eq(TokenKind::EqEq, TokenKind::Eq),
            '!' => self.with_eq(TokenKind::Ne, TokenKind::Not),
            '<' => self.with_eq(TokenKind::Le, TokenKind::Lt),
            '>' => self.with_eq(TokenKind::Ge, TokenKind::Gt),
            '&' if self.peek() == Some('&') => {
                self.advance();
                TokenKind::AndAnd
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                TokenKind::OrOr
            }
            '.' => {
                if self.peek() == Some('.') {
                    self.advance();
                    TokenKind::DotDot
                } else {
                    TokenKind::Dot
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            _ => TokenKind::Unknown(c),
        };

        self.make_token(kind)
    }

    /// `op=` if the next character is `=`, otherwise the bare operator
    fn with_eq(&mut self, compound: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            compound
        } else {
            single
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            trace!("token {:?} at line {}", token.kind, token.span.line);
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// Tokenize `source` in one call
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
