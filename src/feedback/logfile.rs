//! Plain-text log files, one per phase and user
//!
//! Layout: `<dir>/syntax/syntax-<user>.log`, `<dir>/semantic/semantic-<user>.log`
//! and `<dir>/lexer/lexer-<user>.log`. An existing log is overwritten.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use crate::frontend::semantic::Analysis;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Result, SyntaxError};

const RULE: &str = "==================================================";

/// One line of the token dump
pub fn format_token(token: &Token) -> String {
    format!(
        "LINE {:4} | TYPE: {:12} | POS: {:6} | VALUE: {:?}",
        token.span.line,
        token.kind.name(),
        token.span.start,
        token.value()
    )
}

fn header(title: &str, user: &str, source_file: &str, errors: usize) -> String {
    format!(
        "=== {} ===\nGenerated: {}\nUser: {}\nSource: {}\nTotal errors: {}\n{}\n\n",
        title,
        timestamp(),
        user,
        source_file,
        errors,
        RULE
    )
}

/// Seconds since the Unix epoch
fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Reduce a user name to characters that are safe in a file name
fn file_stem(user: &str) -> String {
    let stem: String = user
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "anonymous".to_string()
    } else {
        stem
    }
}

fn numbered<T: ToString>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        return format!("{}\n", empty);
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}\n", i + 1, item.to_string()))
        .collect()
}

fn write_log(dir: &Path, phase: &str, user: &str, contents: &str) -> Result<PathBuf> {
    let phase_dir = dir.join(phase);
    fs::create_dir_all(&phase_dir)?;
    let path = phase_dir.join(format!("{}-{}.log", phase, file_stem(user)));
    fs::write(&path, contents)?;
    info!("wrote {} log to {}", phase, path.display());
    Ok(path)
}

pub fn render_syntax_log(user: &str, source_file: &str, errors: &[SyntaxError]) -> String {
    let mut out = header("SYNTAX ANALYSIS", user, source_file, errors.len());
    out.push_str(&numbered(errors, "No syntax errors found."));
    out
}

pub fn render_semantic_log(user: &str, source_file: &str, analysis: &Analysis) -> String {
    let mut out = header("SEMANTIC ANALYSIS", user, source_file, analysis.diagnostics.len());
    out.push_str(&numbered(&analysis.diagnostics, "No semantic errors found."));

    // Tables are only meaningful for a clean program
    if analysis.is_ok() {
        out.push_str("\nSYMBOL TABLE\n");
        if analysis.symbols.is_empty() {
            out.push_str("  (empty)\n");
        }
        for sym in &analysis.symbols {
            out.push_str(&format!(
                "  {}: type={}, mutable={}, initialized={}, line={}, depth={}\n",
                sym.name, sym.ty, sym.mutable, sym.initialized, sym.line, sym.depth
            ));
        }

        out.push_str("\nFUNCTION TABLE\n");
        if analysis.functions.is_empty() {
            out.push_str("  (empty)\n");
        }
        for func in &analysis.functions {
            let params: Vec<String> = func.params.iter().map(|p| p.to_string()).collect();
            let ret = func.ret.as_ref().map_or_else(|| "()".to_string(), |t| t.to_string());
            out.push_str(&format!("  {}: ({}) -> {}\n", func.name, params.join(", "), ret));
        }
    }
    out
}

pub fn render_lexer_log(user: &str, source_file: &str, tokens: &[Token]) -> String {
    let illegal: Vec<String> = tokens
        .iter()
        .filter_map(|t| match &t.kind {
            TokenKind::Unknown(c) => Some(format!(
                "illegal character {:?} at line {}, column {}",
                c, t.span.line, t.span.column
            )),
            TokenKind::Invalid(text) => Some(format!(
                "invalid token {:?} at line {}, column {}",
                text, t.span.line, t.span.column
            )),
            _ => None,
        })
        .collect();

    let mut out = header("LEXICAL ANALYSIS", user, source_file, illegal.len());
    out.push_str("TOKENS\n");
    let mut any = false;
    for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        out.push_str(&format_token(token));
        out.push('\n');
        any = true;
    }
    if !any {
        out.push_str("No tokens recognized.\n");
    }

    out.push_str("\nERRORS\n");
    out.push_str(&numbered(&illegal, "No lexical errors found."));
    out
}

pub fn write_syntax_log(dir: &Path, user: &str, source_file: &str, errors: &[SyntaxError]) -> Result<PathBuf> {
    write_log(dir, "syntax", user, &render_syntax_log(user, source_file, errors))
}

pub fn write_semantic_log(dir: &Path, user: &str, source_file: &str, analysis: &Analysis) -> Result<PathBuf> {
    write_log(dir, "semantic", user, &render_semantic_log(user, source_file, analysis))
}

pub fn write_lexer_log(dir: &Path, user: &str, source_file: &str, tokens: &[Token]) -> Result<PathBuf> {
    write_log(dir, "lexer", user, &render_lexer_log(user, source_file, tokens))
}
