//! Analysis pipeline.
//!
//! The single entry point of the crate: lex, then parse, then either hand
//! back the tree or a formatted diagnostic. Each call is an independent,
//! synchronous computation with no shared state, so callers may run any
//! number of analyses concurrently.

use serde::Serialize;

use crate::diagnostics::{self, Diagnostic};
use crate::syntax::{lexer, parser, SyntaxNode, Token};

/// The bundle returned by [`analyze`]: the token stream, at most one
/// diagnostic, and the parse tree when there is no diagnostic.
///
/// Serializes as `{ "tokens": [...], "errors": [...], "tree": {...} }`;
/// `tree` is omitted on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub tokens: Vec<Token>,
    #[serde(rename = "errors")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<SyntaxNode>,
}

impl AnalysisResult {
    /// True when the source was accepted.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Analyze TinyLang source text.
///
/// All input-driven failures come back as data in `diagnostics`; this
/// function never fails. Parsing stops at the first error, so the
/// diagnostics list holds at most one entry.
pub fn analyze(source: &str) -> AnalysisResult {
    let tokens = match lexer::lex(source) {
        Ok(tokens) => tokens,
        Err(failure) => {
            return AnalysisResult {
                tokens: Vec::new(),
                diagnostics: vec![diagnostics::render(&failure, source)],
                tree: None,
            }
        }
    };

    match parser::parse(source) {
        Ok(tree) => AnalysisResult {
            tokens,
            diagnostics: Vec::new(),
            tree: Some(tree),
        },
        Err(failure) => AnalysisResult {
            tokens,
            diagnostics: vec![diagnostics::render(&failure, source)],
            tree: None,
        },
    }
}
