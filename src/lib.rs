//! Rustica
//!
//! Static checker for a small Rust-like language: tokenizer, recovering
//! parser and a two-pass semantic analyzer.

pub mod feedback;
pub mod frontend;
pub mod types;
pub mod utils;

use log::info;

use frontend::ast::Program;
use frontend::lexer;
use frontend::parser;
use frontend::semantic::{self, Analysis};
use frontend::token::Token;
use utils::SyntaxError;

/// Everything one run of the pipeline produced
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub tokens: Vec<Token>,
    /// Possibly partial when syntax errors were recovered from
    pub program: Program,
    pub syntax_errors: Vec<SyntaxError>,
    /// Only present when parsing produced no syntax errors
    pub analysis: Option<Analysis>,
}

impl CheckOutcome {
    pub fn is_ok(&self) -> bool {
        self.diagnostic_count() == 0
    }

    pub fn diagnostic_count(&self) -> usize {
        self.syntax_errors.len() + self.analysis.as_ref().map_or(0, |a| a.diagnostics.len())
    }
}

/// Run the whole pipeline over source text
pub fn check_source(source: &str) -> CheckOutcome {
    let tokens = lexer::tokenize(source);
    let (program, syntax_errors) = parser::parse(tokens.clone());

    let analysis = if syntax_errors.is_empty() {
        Some(semantic::analyze(&program))
    } else {
        info!("skipping semantic analysis after {} syntax errors", syntax_errors.len());
        None
    };

    CheckOutcome {
        tokens,
        program,
        syntax_errors,
        analysis,
    }
}
