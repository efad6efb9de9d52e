//! Syntax module for TinyLang.
//!
//! Shared types for the front end: positioned tokens, the closed syntax-tree
//! variant (`Interior` vs `Leaf`), the explicit rule-tag enum carried by
//! interior nodes, and the raw failure type produced by the lexer and parser
//! before the diagnostics formatter turns it into a user-facing message.

use pest::error::{Error, ErrorVariant, InputLocation, LineColLocation};
use pest_derive::Parser;
use serde::{Serialize, Serializer};
use thiserror::Error as ThisError;

pub mod lexer;
pub mod parser;

/// The pest-generated parser for `grammar.pest`. The grammar table is built
/// at compile time, so there is no runtime initialization to synchronize.
#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub(crate) struct TinyLangParser;

// ============================================================================
// TOKENS
// ============================================================================

/// Classification of a lexed token.
///
/// Keywords are reserved words and always win over `Name`; the lexer never
/// produces a `Name` token whose text equals a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Number,
    Int,
    Print,
    If,
    Else,
    While,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    Assign,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semi,
}

impl TokenKind {
    /// Stable wire name of this kind, as it appears in the `type` field of a
    /// serialized token and in `KIND:text` leaf labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::Int => "INT",
            TokenKind::Print => "PRINT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Percent => "PERCENT",
            TokenKind::Gt => "GT",
            TokenKind::Lt => "LT",
            TokenKind::Ge => "GE",
            TokenKind::Le => "LE",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semi => "SEMI",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single lexed token with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(rename = "value")]
    pub text: String,
    pub line: usize,
    pub column: usize,
}

// ============================================================================
// SYNTAX TREE
// ============================================================================

/// Grammar production tag carried by every interior node.
///
/// Label strings match the rule names and aliases of the grammar, and are
/// part of the tree-serialization contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTag {
    Program,
    Declaration,
    Assign,
    PrintStmt,
    IfStmt,
    WhileStmt,
    Block,
    Add,
    Sub,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    Mul,
    Div,
    Mod,
    Number,
    Var,
}

impl RuleTag {
    pub fn label(&self) -> &'static str {
        match self {
            RuleTag::Program => "program",
            RuleTag::Declaration => "declaration",
            RuleTag::Assign => "assign",
            RuleTag::PrintStmt => "print_stmt",
            RuleTag::IfStmt => "if_stmt",
            RuleTag::WhileStmt => "while_stmt",
            RuleTag::Block => "block",
            RuleTag::Add => "add",
            RuleTag::Sub => "sub",
            RuleTag::Gt => "gt",
            RuleTag::Lt => "lt",
            RuleTag::Ge => "ge",
            RuleTag::Le => "le",
            RuleTag::Eq => "eq",
            RuleTag::Ne => "ne",
            RuleTag::Mul => "mul",
            RuleTag::Div => "div",
            RuleTag::Mod => "mod",
            RuleTag::Number => "number",
            RuleTag::Var => "var",
        }
    }
}

/// A node of the parse tree: either a grammar rule application with ordered
/// children, or a single terminal token. Every node is exclusively owned by
/// its parent; the root owns the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Interior {
        rule: RuleTag,
        children: Vec<SyntaxNode>,
    },
    Leaf(Token),
}

impl SyntaxNode {
    pub fn interior(rule: RuleTag, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Interior { rule, children }
    }

    pub fn leaf(token: Token) -> Self {
        SyntaxNode::Leaf(token)
    }

    /// Display label of this node: the rule name for interior nodes,
    /// `KIND:text` for leaves.
    pub fn label(&self) -> String {
        match self {
            SyntaxNode::Interior { rule, .. } => rule.label().to_string(),
            SyntaxNode::Leaf(token) => format!("{}:{}", token.kind, token.text),
        }
    }

    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Interior { children, .. } => children,
            SyntaxNode::Leaf(_) => &[],
        }
    }
}

// ============================================================================
// RAW FAILURES
// ============================================================================

/// Which front-end pass rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Syntax,
    Lex,
}

/// Raw lexer/parser failure: the exact position that could not be consumed
/// and the terminal symbols that would have been legal there. The
/// diagnostics formatter turns this into a user-facing
/// [`crate::diagnostics::Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{kind:?} error at line {line}, column {column}")]
pub struct ParseFailure {
    pub kind: FailureKind,
    /// 1-based line of the offending position.
    pub line: usize,
    /// 1-based column of the offending position.
    pub column: usize,
    /// Byte offset of the offending position, for snippet extraction.
    pub offset: usize,
    /// Sorted, deduplicated display names of the terminals that could have
    /// continued the parse. Empty when no useful set is available.
    pub expected: Vec<String>,
}

impl ParseFailure {
    /// Convert a pest error into a raw failure, collapsing its expected-rule
    /// set to surface terminal names.
    pub(crate) fn from_pest(kind: FailureKind, error: &Error<Rule>) -> Self {
        let (line, column) = match error.line_col {
            LineColLocation::Pos((line, column)) => (line, column),
            LineColLocation::Span((line, column), _) => (line, column),
        };
        let offset = match error.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        let mut expected: Vec<String> = match &error.variant {
            ErrorVariant::ParsingError { positives, .. } => positives
                .iter()
                .filter_map(|rule| terminal_label(*rule))
                .map(str::to_string)
                .collect(),
            ErrorVariant::CustomError { .. } => Vec::new(),
        };
        expected.sort();
        expected.dedup();
        ParseFailure {
            kind,
            line,
            column,
            offset,
            expected,
        }
    }
}

/// Display name of a terminal rule, or `None` for non-terminals (which have
/// no place in an expected-token list shown to users).
pub(crate) fn terminal_label(rule: Rule) -> Option<&'static str> {
    match rule {
        Rule::kw_int => Some("int"),
        Rule::kw_print => Some("print"),
        Rule::kw_if => Some("if"),
        Rule::kw_else => Some("else"),
        Rule::kw_while => Some("while"),
        Rule::NAME => Some("NAME"),
        Rule::NUMBER => Some("NUMBER"),
        Rule::ge => Some(">="),
        Rule::le => Some("<="),
        Rule::eq => Some("=="),
        Rule::ne => Some("!="),
        Rule::gt => Some(">"),
        Rule::lt => Some("<"),
        Rule::plus => Some("+"),
        Rule::minus => Some("-"),
        Rule::star => Some("*"),
        Rule::slash => Some("/"),
        Rule::percent => Some("%"),
        Rule::assign_op => Some("="),
        Rule::lparen => Some("("),
        Rule::rparen => Some(")"),
        Rule::lbrace => Some("{"),
        Rule::rbrace => Some("}"),
        Rule::semi => Some(";"),
        _ => None,
    }
}

/// Token kind for a terminal rule of the grammar.
pub(crate) fn token_kind(rule: Rule) -> Option<TokenKind> {
    match rule {
        Rule::kw_int => Some(TokenKind::Int),
        Rule::kw_print => Some(TokenKind::Print),
        Rule::kw_if => Some(TokenKind::If),
        Rule::kw_else => Some(TokenKind::Else),
        Rule::kw_while => Some(TokenKind::While),
        Rule::NAME => Some(TokenKind::Name),
        Rule::NUMBER => Some(TokenKind::Number),
        Rule::ge => Some(TokenKind::Ge),
        Rule::le => Some(TokenKind::Le),
        Rule::eq => Some(TokenKind::Eq),
        Rule::ne => Some(TokenKind::Ne),
        Rule::gt => Some(TokenKind::Gt),
        Rule::lt => Some(TokenKind::Lt),
        Rule::plus => Some(TokenKind::Plus),
        Rule::minus => Some(TokenKind::Minus),
        Rule::star => Some(TokenKind::Star),
        Rule::slash => Some(TokenKind::Slash),
        Rule::percent => Some(TokenKind::Percent),
        Rule::assign_op => Some(TokenKind::Assign),
        Rule::lparen => Some(TokenKind::LParen),
        Rule::rparen => Some(TokenKind::RParen),
        Rule::lbrace => Some(TokenKind::LBrace),
        Rule::rbrace => Some(TokenKind::RBrace),
        Rule::semi => Some(TokenKind::Semi),
        _ => None,
    }
}
