//! Utility module

mod span;
mod error;

pub use span::{column_at, Span};
pub use error::{Error, MismatchSite, Result, SemanticError, SemanticErrorKind, SyntaxError};
