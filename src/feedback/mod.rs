//! Structured Feedback Module
//!
//! Machine-readable check results:
//! - JSON reports of every diagnostic and the final tables
//! - plain-text log files per phase (see [`logfile`])

pub mod logfile;

use serde::Serialize;

use crate::frontend::scope::{FunctionSig, Symbol};
use crate::utils::{Result, SemanticError, SyntaxError};
use crate::CheckOutcome;

// ==================== Structured Error Report ====================

/// Pipeline phase a diagnostic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Syntax,
    Semantic,
}

/// One diagnostic in report form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub phase: Phase,
    /// Taxonomy name (e.g. "UnexpectedToken", "TypeMismatch")
    pub kind: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticReport {
    pub fn from_syntax(error: &SyntaxError) -> Self {
        let kind = match error {
            SyntaxError::UnexpectedToken { .. } => "UnexpectedToken",
            SyntaxError::UnexpectedEof => "UnexpectedEof",
        };
        Self {
            phase: Phase::Syntax,
            kind: kind.to_string(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }

    pub fn from_semantic(error: &SemanticError) -> Self {
        Self {
            phase: Phase::Semantic,
            kind: error.kind().to_string(),
            line: Some(error.line()),
            column: None,
            message: error.to_string(),
        }
    }
}

// ==================== Check Report ====================

/// Complete result of checking one file
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub source_file: String,
    pub success: bool,
    pub syntax_errors: Vec<DiagnosticReport>,
    pub semantic_errors: Vec<DiagnosticReport>,
    /// Empty when semantic analysis was skipped
    pub symbols: Vec<Symbol>,
    pub functions: Vec<FunctionSig>,
}

impl CheckReport {
    pub fn new(source_file: impl Into<String>, outcome: &CheckOutcome) -> Self {
        let (semantic_errors, symbols, functions) = match &outcome.analysis {
            Some(analysis) => (
                analysis.diagnostics.iter().map(DiagnosticReport::from_semantic).collect(),
                analysis.symbols.clone(),
                analysis.functions.clone(),
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        Self {
            source_file: source_file.into(),
            success: outcome.is_ok(),
            syntax_errors: outcome.syntax_errors.iter().map(DiagnosticReport::from_syntax).collect(),
            semantic_errors,
            symbols,
            functions,
        }
    }

    /// All diagnostics, syntax first
    pub fn diagnostics(&self) -> impl Iterator<Item = &DiagnosticReport> {
        self.syntax_errors.iter().chain(&self.semantic_errors)
    }

    /// Output as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
