//! The TinyLang Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. JSON surfaces (`analyze`, `tokens`, `tree`)
//! always exit 0 and report failures inside the payload, mirroring the
//! transport contract; `check` is the human-facing surface and fails loudly
//! with a rendered source report.

use clap::Parser;
use std::io::Read;
use std::{fs, io, process};

use crate::analysis::analyze;
use crate::cli::args::{Command, TinyLangArgs};
use crate::diagnostics::SourceReport;
use crate::syntax::{lexer, parser};
use crate::{render, tree};

pub mod args;

/// The main entry point for the CLI.
pub fn run() {
    let args = TinyLangArgs::parse();

    let result = match args.command {
        Command::Analyze { file } => handle_analyze(&file),
        Command::Tokens { file } => handle_tokens(&file),
        Command::Tree { file } => handle_tree(&file),
        Command::Dot { file } => handle_dot(&file),
        Command::Check { file } => handle_check(&file),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn read_source(path: &std::path::Path) -> Result<(String, String), Box<dyn std::error::Error>> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(("<stdin>".to_string(), source))
    } else {
        let source = fs::read_to_string(path)?;
        Ok((path.display().to_string(), source))
    }
}

fn handle_analyze(path: &std::path::Path) -> CliResult {
    let (_, source) = read_source(path)?;
    let result = analyze(&source);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn handle_tokens(path: &std::path::Path) -> CliResult {
    let (_, source) = read_source(path)?;
    let result = analyze(&source);
    println!("{}", serde_json::to_string_pretty(&result.tokens)?);
    Ok(())
}

fn handle_tree(path: &std::path::Path) -> CliResult {
    let (_, source) = read_source(path)?;
    let result = analyze(&source);
    match result.tree {
        Some(root) => println!("{}", serde_json::to_string_pretty(&tree::to_graph(&root))?),
        None => println!("{}", serde_json::to_string_pretty(&result.diagnostics)?),
    }
    Ok(())
}

fn handle_dot(path: &std::path::Path) -> CliResult {
    let (name, source) = read_source(path)?;
    match parser::parse(&source) {
        Ok(root) => {
            print!("{}", render::to_dot(&root));
            Ok(())
        }
        Err(failure) => {
            report(SourceReport::new(&failure, &name, &source));
            process::exit(1);
        }
    }
}

fn handle_check(path: &std::path::Path) -> CliResult {
    let (name, source) = read_source(path)?;
    if let Err(failure) = lexer::lex(&source) {
        report(SourceReport::new(&failure, &name, &source));
        process::exit(1);
    }
    if let Err(failure) = parser::parse(&source) {
        report(SourceReport::new(&failure, &name, &source));
        process::exit(1);
    }
    println!("ok");
    Ok(())
}

/// Print a report with full miette diagnostics: source span, label, and
/// context.
fn report(report: SourceReport) {
    let report = miette::Report::new(report);
    eprintln!("{report:?}");
}
