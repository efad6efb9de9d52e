//! TinyLang Diagnostics.
//!
//! Turns raw lexer/parser failures into the user-facing [`Diagnostic`]
//! shape that travels in the `errors` field of an analysis result, and into
//! a miette-backed [`SourceReport`] for rich terminal display.
//!
//! Message format for syntax failures: the fixed literal `Syntax error.`,
//! then `Expected one of: <sorted terminals>.` when an expected set is
//! available, then a bounded source excerpt with a caret under the exact
//! column. Every part degrades by omission; formatting never fails.

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use thiserror::Error;

use crate::syntax::{FailureKind, ParseFailure};

/// Width of the source excerpt window on each side of a failure position.
const SNIPPET_SPAN: usize = 60;

/// A structured, user-facing description of one analysis failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: FailureKind,
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

/// Format a raw failure against the source it came from.
pub fn render(failure: &ParseFailure, source: &str) -> Diagnostic {
    let snippet = source_context(source, failure.offset, SNIPPET_SPAN);

    let message = match failure.kind {
        FailureKind::Syntax => syntax_message(&failure.expected, snippet),
        FailureKind::Lex => lex_message(snippet),
    };

    Diagnostic {
        kind: failure.kind,
        message,
        line: Some(failure.line),
        column: Some(failure.column),
    }
}

fn syntax_message(expected: &[String], snippet: Option<String>) -> String {
    let mut message = String::from("Syntax error.");
    if !expected.is_empty() {
        message.push_str(" Expected one of: ");
        message.push_str(&expected.join(", "));
        message.push('.');
    }
    match snippet {
        Some(snippet) if expected.is_empty() => {
            message.push('\n');
            message.push_str(&snippet);
        }
        Some(snippet) => {
            message.push_str(" Here:\n");
            message.push_str(&snippet);
        }
        None => {}
    }
    message
}

fn lex_message(snippet: Option<String>) -> String {
    let mut message = String::from("Unexpected character.");
    if let Some(snippet) = snippet {
        message.push('\n');
        message.push_str(&snippet);
    }
    message
}

/// Extract a fixed-width excerpt of the failure line with a caret marking
/// the exact column: up to `span` characters before the position (cut at the
/// last newline) and up to `span` after (cut at the next newline).
///
/// Returns `None` only when the offset lies outside the source; any other
/// degenerate input still yields a best-effort excerpt.
fn source_context(source: &str, offset: usize, span: usize) -> Option<String> {
    if offset > source.len() {
        return None;
    }
    // Walk back to a char boundary so slicing cannot panic.
    let mut pos = offset;
    while pos > 0 && !source.is_char_boundary(pos) {
        pos -= 1;
    }

    let before_chars: Vec<char> = source[..pos].chars().collect();
    let window_start = before_chars.len().saturating_sub(span);
    let windowed: String = before_chars[window_start..].iter().collect();
    let before = windowed.rsplit('\n').next().unwrap_or_default();

    let after: String = source[pos..]
        .chars()
        .take(span)
        .take_while(|&c| c != '\n')
        .collect();

    let caret_pad = " ".repeat(before.chars().count());
    Some(format!("{before}{after}\n{caret_pad}^"))
}

/// Terminal-facing report carrying the original source, rendered by miette
/// with a labeled span at the failure position.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{message}")]
#[diagnostic(code(tinylang::syntax))]
pub struct SourceReport {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("unexpected input here")]
    span: SourceSpan,
}

impl SourceReport {
    pub fn new(failure: &ParseFailure, name: &str, source: &str) -> Self {
        let message = match failure.kind {
            FailureKind::Syntax if !failure.expected.is_empty() => format!(
                "Syntax error. Expected one of: {}.",
                failure.expected.join(", ")
            ),
            FailureKind::Syntax => "Syntax error.".to_string(),
            FailureKind::Lex => "Unexpected character.".to_string(),
        };
        let offset = failure.offset.min(source.len());
        SourceReport {
            message,
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from(offset..offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(line: usize, column: usize, offset: usize, expected: &[&str]) -> ParseFailure {
        ParseFailure {
            kind: FailureKind::Syntax,
            line,
            column,
            offset,
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn message_starts_with_fixed_literal() {
        let d = render(&failure(1, 6, 5, &[";"]), "int x");
        assert!(d.message.starts_with("Syntax error."));
        assert!(d.message.contains("Expected one of: ;."));
        assert_eq!(d.line, Some(1));
        assert_eq!(d.column, Some(6));
    }

    #[test]
    fn expected_clause_omitted_when_set_is_empty() {
        let d = render(&failure(1, 1, 0, &[]), "int x");
        assert!(d.message.starts_with("Syntax error.\n"));
        assert!(!d.message.contains("Expected one of"));
    }

    #[test]
    fn snippet_marks_the_exact_column() {
        let d = render(&failure(2, 5, 11, &[";"]), "int x;\nx = + 2;");
        // The snippet shows only the failing line, caret under column 5.
        let lines: Vec<&str> = d.message.lines().collect();
        assert_eq!(lines[1], "x = + 2;");
        assert_eq!(lines[2], "    ^");
    }

    #[test]
    fn snippet_window_is_bounded() {
        let long = "x".repeat(500);
        let source = format!("{long} = 1;");
        let snip = source_context(&source, 501, SNIPPET_SPAN).unwrap();
        let first_line_len = snip.lines().next().unwrap_or_default().chars().count();
        assert!(first_line_len <= 2 * SNIPPET_SPAN);
    }

    #[test]
    fn offset_past_end_of_source_degrades_to_no_snippet() {
        assert_eq!(source_context("abc", 10, SNIPPET_SPAN), None);
        let d = render(&failure(1, 1, 10, &[";"]), "abc");
        assert_eq!(d.message, "Syntax error. Expected one of: ;.");
    }

    #[test]
    fn end_of_input_snippet_has_caret_past_last_char() {
        let snip = source_context("int x", 5, SNIPPET_SPAN).unwrap();
        assert_eq!(snip, "int x\n     ^");
    }

    #[test]
    fn lex_failure_keeps_its_own_kind() {
        let f = ParseFailure {
            kind: FailureKind::Lex,
            line: 1,
            column: 5,
            offset: 4,
            expected: vec![],
        };
        let d = render(&f, "x = $;");
        assert_eq!(d.kind, FailureKind::Lex);
        assert!(d.message.starts_with("Unexpected character."));
    }
}
