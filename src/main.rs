//! Rustica checker
//!
//! Validates programs written in a small Rust-like language and reports
//! syntax and semantic diagnostics.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::debug;

use rustica::feedback::logfile;
use rustica::feedback::CheckReport;
use rustica::frontend::lexer::tokenize;
use rustica::frontend::parser::parse;

/// Rustica checker
#[derive(Parser, Debug)]
#[command(name = "rustica")]
#[command(version = "0.1.0")]
#[command(about = "Static checker for a small Rust-like language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Directory for per-phase log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Name used in log file names (defaults to $USER)
    #[arg(long)]
    user: Option<String>,
}

impl ReportArgs {
    fn user(&self) -> String {
        self.user
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "anonymous".to_string())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a source file for errors
    Check {
        /// Input source file
        input: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// Print the token stream
    Tokens {
        /// Input source file
        input: PathBuf,

        /// Directory for the lexer log
        #[arg(long, value_name = "DIR")]
        log_dir: Option<PathBuf>,

        /// Name used in the log file name (defaults to $USER)
        #[arg(long)]
        user: Option<String>,
    },
    /// Parse a source file and print the AST
    Parse {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the input was free of diagnostics
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Some(Commands::Check { input, report }) => check_file(&input, &report),
        Some(Commands::Tokens { input, log_dir, user }) => {
            let report = ReportArgs {
                json: false,
                log_dir,
                user,
            };
            dump_tokens(&input, &report)
        }
        Some(Commands::Parse { input }) => parse_file(&input),
        Some(Commands::Version) => {
            println!("rustica 0.1.0");
            println!("Rustica static checker");
            println!("License: Apache-2.0");
            Ok(true)
        }
        None => match cli.input {
            Some(input) => check_file(&input, &cli.report),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: rustica <FILE> or rustica check <FILE>");
                Ok(false)
            }
        },
    }
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Run the full pipeline over a file
fn check_file(input: &Path, args: &ReportArgs) -> Result<bool> {
    let source = read_source(input)?;
    let name = input.display().to_string();
    debug!("checking {} ({} bytes)", name, source.len());

    let outcome = rustica::check_source(&source);
    let report = CheckReport::new(name.clone(), &outcome);

    if let Some(dir) = &args.log_dir {
        let user = args.user();
        logfile::write_syntax_log(dir, &user, &name, &outcome.syntax_errors)
            .context("failed to write syntax log")?;
        if let Some(analysis) = &outcome.analysis {
            logfile::write_semantic_log(dir, &user, &name, analysis)
                .context("failed to write semantic log")?;
        }
    }

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(report.success);
    }

    println!("Checking: {}", name);
    for diag in report.diagnostics() {
        eprintln!("{}", diag.message);
    }

    if outcome.analysis.is_none() {
        println!("Semantic analysis skipped due to syntax errors");
    }

    if report.success {
        println!("No errors found");
    } else {
        println!("{} error(s) found", outcome.diagnostic_count());
    }
    Ok(report.success)
}

fn dump_tokens(input: &Path, args: &ReportArgs) -> Result<bool> {
    let source = read_source(input)?;
    let tokens = tokenize(&source);

    for token in &tokens {
        println!("{}", logfile::format_token(token));
    }

    if let Some(dir) = &args.log_dir {
        let path = logfile::write_lexer_log(dir, &args.user(), &input.display().to_string(), &tokens)
            .context("failed to write lexer log")?;
        println!("Log written to {}", path.display());
    }

    Ok(!tokens.iter().any(|t| t.kind.is_lexical_error()))
}

fn parse_file(input: &Path) -> Result<bool> {
    let source = read_source(input)?;
    let (program, errors) = parse(tokenize(&source));

    if errors.is_empty() {
        println!("{:#?}", program);
        return Ok(true);
    }

    for err in &errors {
        eprintln!("{}", err);
    }
    Ok(false)
}
