//! Defines the command-line arguments and subcommands for the TinyLang CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "tinylang",
    version,
    about = "Analyze TinyLang source: tokens, parse tree, and syntax diagnostics."
)]
pub struct TinyLangArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full analysis bundle (tokens, errors, tree) as JSON.
    Analyze {
        /// The TinyLang source file to analyze, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Token stream only, as JSON.
    Tokens {
        /// The TinyLang source file to lex, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Serialized parse-tree graph, as JSON.
    Tree {
        /// The TinyLang source file to parse, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Graphviz DOT source for the parse tree.
    Dot {
        /// The TinyLang source file to render, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Check a file for syntax errors; nonzero exit on failure.
    Check {
        /// The TinyLang source file to check, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
    },
}
