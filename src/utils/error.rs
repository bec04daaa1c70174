//! Error handling for Rustica

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::Type;

/// Result type alias for driver-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Driver error (everything that is not a diagnostic about the checked program)
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ==================== Syntax Errors ====================

/// A recovered syntax diagnostic
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxError {
    #[error("syntax error at line {line}, column {column}: unexpected token '{value}'")]
    UnexpectedToken {
        value: String,
        line: usize,
        column: usize,
    },

    #[error("syntax error: unexpected end of input")]
    UnexpectedEof,
}

impl SyntaxError {
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { line, .. } => Some(*line),
            Self::UnexpectedEof => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { column, .. } => Some(*column),
            Self::UnexpectedEof => None,
        }
    }
}

// ==================== Semantic Errors ====================

/// Taxonomy of semantic diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SemanticErrorKind {
    Redeclaration,
    UndeclaredUse,
    TypeMismatch,
    ImmutableAssignment,
    ArityMismatch,
    InvalidControlFlow,
    IndexTypeError,
    InvalidOperator,
}

impl fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Where a type mismatch was detected
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MismatchSite {
    Declaration(String),
    Assignment(String),
    IndexedAssignment(String),
    Argument { function: String, position: usize },
    Return(String),
    Condition(&'static str),
    Elements(&'static str),
}

impl fmt::Display for MismatchSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration(name) => write!(f, "declaration of '{}'", name),
            Self::Assignment(name) => write!(f, "assignment to '{}'", name),
            Self::IndexedAssignment(name) => write!(f, "indexed assignment to '{}'", name),
            Self::Argument { function, position } => {
                write!(f, "argument {} of '{}'", position, function)
            }
            Self::Return(function) => write!(f, "return value of '{}'", function),
            Self::Condition(keyword) => write!(f, "condition of '{}'", keyword),
            Self::Elements(literal) => write!(f, "elements of {} literal", literal),
        }
    }
}

/// A semantic diagnostic. Records are compared structurally for deduplication.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticError {
    #[error("line {line}: variable '{name}' is already declared in this scope")]
    VariableRedeclared { name: String, line: usize },

    #[error("line {line}: function '{name}' is already declared")]
    FunctionRedeclared { name: String, line: usize },

    #[error("line {line}: variable '{name}' is not declared")]
    UndeclaredVariable { name: String, line: usize },

    #[error("line {line}: function '{name}' is not declared")]
    UndeclaredFunction { name: String, line: usize },

    #[error("line {line}: type mismatch in {site}: expected '{expected}', found '{found}'")]
    TypeMismatch {
        site: MismatchSite,
        expected: Type,
        found: Type,
        line: usize,
    },

    #[error("line {line}: cannot assign twice to immutable variable '{name}'")]
    ImmutableAssignment { name: String, line: usize },

    #[error("line {line}: function '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error("line {line}: '{keyword}' outside of a loop")]
    OutsideLoop { keyword: &'static str, line: usize },

    #[error("line {line}: 'return' outside of a function")]
    ReturnOutsideFunction { line: usize },

    #[error("line {line}: function '{function}' does not return a value")]
    UnexpectedReturnValue { function: String, line: usize },

    #[error("line {line}: function '{function}' must return a value of type '{expected}'")]
    MissingReturnValue {
        function: String,
        expected: Type,
        line: usize,
    },

    #[error("line {line}: function '{function}' is missing a return statement")]
    MissingReturn { function: String, line: usize },

    #[error("line {line}: index into '{name}' must be 'i32', found '{found}'")]
    IndexType {
        name: String,
        found: Type,
        line: usize,
    },

    #[error("line {line}: operator '{op}' requires numeric operands, found '{left}' and '{right}'")]
    NonNumericOperands {
        op: String,
        left: Type,
        right: Type,
        line: usize,
    },
}

impl SemanticError {
    /// Category of this diagnostic
    pub fn kind(&self) -> SemanticErrorKind {
        use SemanticErrorKind as K;
        match self {
            Self::VariableRedeclared { .. } | Self::FunctionRedeclared { .. } => K::Redeclaration,
            Self::UndeclaredVariable { .. } | Self::UndeclaredFunction { .. } => K::UndeclaredUse,
            Self::TypeMismatch { .. } => K::TypeMismatch,
            Self::ImmutableAssignment { .. } => K::ImmutableAssignment,
            Self::ArityMismatch { .. } => K::ArityMismatch,
            Self::OutsideLoop { .. }
            | Self::ReturnOutsideFunction { .. }
            | Self::UnexpectedReturnValue { .. }
            | Self::MissingReturnValue { .. }
            | Self::MissingReturn { .. } => K::InvalidControlFlow,
            Self::IndexType { .. } => K::IndexTypeError,
            Self::NonNumericOperands { .. } => K::InvalidOperator,
        }
    }

    /// Source line the diagnostic refers to
    pub fn line(&self) -> usize {
        match self {
            Self::VariableRedeclared { line, .. }
            | Self::FunctionRedeclared { line, .. }
            | Self::UndeclaredVariable { line, .. }
            | Self::UndeclaredFunction { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::ImmutableAssignment { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::OutsideLoop { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::UnexpectedReturnValue { line, .. }
            | Self::MissingReturnValue { line, .. }
            | Self::MissingReturn { line, .. }
            | Self::IndexType { line, .. }
            | Self::NonNumericOperands { line, .. } => *line,
        }
    }
}
