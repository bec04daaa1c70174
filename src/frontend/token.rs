//! Token definitions for Rustica

use std::fmt;

use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(span: Span) -> Self {
        Self { kind: TokenKind::Eof, span }
    }

    /// Literal value as quoted in syntax diagnostics
    pub fn value(&self) -> String {
        self.kind.to_string()
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ============ Keywords ============
    /// let
    Let,
    /// mut
    Mut,
    /// if
    If,
    /// else
    Else,
    /// while
    While,
    /// for
    For,
    /// in
    In,
    /// fn
    Fn,
    /// return
    Return,
    /// true
    True,
    /// false
    False,
    /// print
    Print,
    /// println
    Println,
    /// vec
    Vec,
    /// break
    Break,
    /// continue
    Continue,

    // ============ Identifiers and Literals ============
    Ident(String),
    IntLit(i64),
    /// Float literal, kept with its source text for diagnostics
    FloatLit(f64, String),
    StringLit(String),
    CharLit(char),

    // ============ Operators ============
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// +=
    PlusEq,
    /// -=
    MinusEq,
    /// *=
    StarEq,
    /// /=
    SlashEq,
    /// %=
    PercentEq,
    /// ==
    EqEq,
    /// !=
    Ne,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Le,
    /// >=
    Ge,
    /// &&
    AndAnd,
    /// ||
    OrOr,
    /// !
    Not,
    /// ->
    Arrow,
    /// .
    Dot,
    /// ..
    DotDot,

    // ============ Delimiters ============
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// :
    Colon,
    /// {
    LBrace,
    /// }
    RBrace,
    /// (
    LParen,
    /// )
    RParen,
    /// [
    LBracket,
    /// ]
    RBracket,

    // ============ Special ============
    /// End of file
    Eof,
    /// Unknown/invalid character
    Unknown(char),
    /// Malformed literal or comment: an out-of-range number, or an
    /// unterminated string or block comment (holds the opening `"` or `/*`)
    Invalid(String),
}

impl TokenKind {
    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "let" => Some(TokenKind::Let),
            "mut" => Some(TokenKind::Mut),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            "for" => Some(TokenKind::For),
            "in" => Some(TokenKind::In),
            "fn" => Some(TokenKind::Fn),
            "return" => Some(TokenKind::Return),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "print" => Some(TokenKind::Print),
            "println" => Some(TokenKind::Println),
            "vec" => Some(TokenKind::Vec),
            "break" => Some(TokenKind::Break),
            "continue" => Some(TokenKind::Continue),
            _ => None,
        }
    }

    /// Whether the lexer could not make sense of this token
    pub fn is_lexical_error(&self) -> bool {
        matches!(self, TokenKind::Unknown(_) | TokenKind::Invalid(_))
    }

    /// Tokens that can only begin a statement; recovery stops in front of them.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Fn
                | TokenKind::Return
                | TokenKind::Print
                | TokenKind::Println
                | TokenKind::Break
                | TokenKind::Continue
        )
    }

    /// Get the precedence of a binary operator (for precedence climbing).
    /// Returns None if not a binary operator. All tiers are left-associative.
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            TokenKind::OrOr => Some(1),
            TokenKind::AndAnd => Some(2),
            TokenKind::EqEq | TokenKind::Ne => Some(3),
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => Some(4),
            TokenKind::Plus | TokenKind::Minus => Some(5),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(6),
            _ => None,
        }
    }

    /// Short uppercase name used by the token dump
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Let => "LET",
            TokenKind::Mut => "MUT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::Fn => "FN",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Print => "PRINT",
            TokenKind::Println => "PRINTLN",
            TokenKind::Vec => "VEC",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Ident(_) => "ID",
            TokenKind::IntLit(_) => "INTEGER",
            TokenKind::FloatLit(..) => "FLOAT",
            TokenKind::StringLit(_) => "STRING",
            TokenKind::CharLit(_) => "CHAR",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "MODULO",
            TokenKind::Eq => "ASSIGN",
            TokenKind::PlusEq => "PLUS_ASSIGN",
            TokenKind::MinusEq => "MINUS_ASSIGN",
            TokenKind::StarEq => "MULT_ASSIGN",
            TokenKind::SlashEq => "DIV_ASSIGN",
            TokenKind::PercentEq => "MOD_ASSIGN",
            TokenKind::EqEq => "EQUAL",
            TokenKind::Ne => "NOT_EQUAL",
            TokenKind::Lt => "LESS_THAN",
            TokenKind::Gt => "GREATER_THAN",
            TokenKind::Le => "LESS_EQUAL",
            TokenKind::Ge => "GREATER_EQUAL",
            TokenKind::AndAnd => "AND",
            TokenKind::OrOr => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Arrow => "ARROW",
            TokenKind::Dot => "DOT",
            TokenKind::DotDot => "RANGE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Eof => "EOF",
            TokenKind::Unknown(_) => "UNKNOWN",
            TokenKind::Invalid(_) => "INVALID",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Ident(name) => return write!(f, "{}", name),
            TokenKind::IntLit(n) => return write!(f, "{}", n),
            TokenKind::FloatLit(_, text) => return write!(f, "{}", text),
            TokenKind::StringLit(s) => return write!(f, "{}", s),
            TokenKind::CharLit(c) => return write!(f, "{}", c),
            TokenKind::Unknown(c) => return write!(f, "{}", c),
            TokenKind::Invalid(text) => return write!(f, "{}", text),
            TokenKind::Let => "let",
            TokenKind::Mut => "mut",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Print => "print",
            TokenKind::Println => "println",
            TokenKind::Vec => "vec",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::EqEq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Not => "!",
            TokenKind::Arrow => "->",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Eof => "",
        };
        f.write_str(text)
    }
}
