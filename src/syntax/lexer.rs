//! TinyLang Lexer.
//!
//! Drives the grammar's `token_stream` rule to turn raw source text into an
//! ordered token sequence with 1-based line/column positions. Whitespace and
//! `//` line comments are consumed silently by the grammar. The first
//! character that cannot start any token fails the whole lex.

use pest::Parser;

use crate::syntax::{token_kind, FailureKind, ParseFailure, Rule, TinyLangParser, Token};

/// Lex source text into tokens, or fail at the first unrecognized character.
///
/// Pure function of the input; lexing the same text twice yields the same
/// sequence.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseFailure> {
    let mut pairs = TinyLangParser::parse(Rule::token_stream, source)
        .map_err(|e| ParseFailure::from_pest(FailureKind::Lex, &e))?;

    let stream = pairs.next().unwrap(); // pest guarantees the matched rule exists

    let mut tokens = Vec::new();
    for pair in stream.into_inner() {
        let Some(kind) = token_kind(pair.as_rule()) else {
            continue; // EOI
        };
        let (line, column) = pair.line_col();
        tokens.push(Token {
            kind,
            text: pair.as_str().to_string(),
            line,
            column,
        });
    }
    Ok(tokens)
}
