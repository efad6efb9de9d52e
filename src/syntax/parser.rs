//! TinyLang Parser.
//!
//! Parses source text with the grammar's `program` rule and lowers the pest
//! pair tree into [`SyntaxNode`]s. The lowering does three jobs:
//!
//! - tags every interior node with an explicit [`RuleTag`] instead of a
//!   stringly rule name;
//! - folds the PEG-factored `term ~ (op ~ term)*` sequences back into
//!   left-associative binary nodes (`add`, `gt`, `mul`, ...);
//! - filters anonymous terminals (keywords, punctuation, operator lexemes)
//!   out of the tree, so leaves are the meaningful `NAME`/`NUMBER` tokens.
//!
//! Parsing is purely syntactic; no name resolution or type checking happens
//! here. It stops at the first error and reports the position together with
//! the set of terminals that would have been legal there.

use pest::iterators::Pair;
use pest::Parser;

use crate::syntax::{
    token_kind, FailureKind, ParseFailure, Rule, RuleTag, SyntaxNode, TinyLangParser, Token,
};

/// Parse TinyLang source into a tree rooted at a `program` node whose
/// children are the top-level statements in source order.
pub fn parse(source: &str) -> Result<SyntaxNode, ParseFailure> {
    let mut pairs = TinyLangParser::parse(Rule::program, source)
        .map_err(|e| ParseFailure::from_pest(FailureKind::Syntax, &e))?;

    let program = pairs.next().unwrap(); // pest guarantees the program rule exists
    Ok(lower_program(program))
}

// ============================================================================
// LOWERING
// ============================================================================

fn lower_program(pair: Pair<Rule>) -> SyntaxNode {
    let children = lower_statements(pair);
    SyntaxNode::interior(RuleTag::Program, children)
}

/// Lower the statement children of `program` or `block`, dropping the
/// punctuation pairs (`;`, braces) and `EOI` that sit between them.
fn lower_statements(pair: Pair<Rule>) -> Vec<SyntaxNode> {
    pair.into_inner()
        .filter(|p| {
            matches!(
                p.as_rule(),
                Rule::declaration
                    | Rule::assign
                    | Rule::print_stmt
                    | Rule::if_stmt
                    | Rule::while_stmt
            )
        })
        .map(lower_statement)
        .collect()
}

fn lower_statement(pair: Pair<Rule>) -> SyntaxNode {
    match pair.as_rule() {
        Rule::declaration => {
            // int NAME ;
            let name = find_token(&pair, Rule::NAME);
            SyntaxNode::interior(RuleTag::Declaration, vec![SyntaxNode::leaf(name)])
        }
        Rule::assign => {
            // NAME = expr
            let name = find_token(&pair, Rule::NAME);
            let expr = find_rule(pair, Rule::expr);
            SyntaxNode::interior(
                RuleTag::Assign,
                vec![SyntaxNode::leaf(name), lower_expr(expr)],
            )
        }
        Rule::print_stmt => {
            let expr = find_rule(pair, Rule::expr);
            SyntaxNode::interior(RuleTag::PrintStmt, vec![lower_expr(expr)])
        }
        Rule::if_stmt => {
            // if ( expr ) block ( else block )?
            let mut children = Vec::with_capacity(3);
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::expr => children.push(lower_expr(inner)),
                    Rule::block => children.push(lower_block(inner)),
                    _ => {}
                }
            }
            SyntaxNode::interior(RuleTag::IfStmt, children)
        }
        Rule::while_stmt => {
            let mut children = Vec::with_capacity(2);
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::expr => children.push(lower_expr(inner)),
                    Rule::block => children.push(lower_block(inner)),
                    _ => {}
                }
            }
            SyntaxNode::interior(RuleTag::WhileStmt, children)
        }
        rule => unreachable!("statement lowering got unexpected rule {rule:?}"),
    }
}

fn lower_block(pair: Pair<Rule>) -> SyntaxNode {
    let children = lower_statements(pair);
    SyntaxNode::interior(RuleTag::Block, children)
}

/// Fold `term (op term)*` into left-associative binary nodes. A lone operand
/// lowers to itself, matching the grammar's single-child inlining.
fn lower_expr(pair: Pair<Rule>) -> SyntaxNode {
    let mut inner = pair.into_inner();
    let first = inner.next().unwrap(); // grammar guarantees at least one term
    let mut node = lower_term(first);
    while let Some(op) = inner.next() {
        let rhs = inner.next().unwrap(); // grammar pairs every operator with an operand
        node = SyntaxNode::interior(expr_op_tag(op.as_rule()), vec![node, lower_term(rhs)]);
    }
    node
}

fn lower_term(pair: Pair<Rule>) -> SyntaxNode {
    let mut inner = pair.into_inner();
    let first = inner.next().unwrap(); // grammar guarantees at least one factor
    let mut node = lower_factor(first);
    while let Some(op) = inner.next() {
        let rhs = inner.next().unwrap();
        node = SyntaxNode::interior(term_op_tag(op.as_rule()), vec![node, lower_factor(rhs)]);
    }
    node
}

fn lower_factor(pair: Pair<Rule>) -> SyntaxNode {
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::NUMBER => {
                let token = leaf_token(&inner);
                return SyntaxNode::interior(RuleTag::Number, vec![SyntaxNode::leaf(token)]);
            }
            Rule::NAME => {
                let token = leaf_token(&inner);
                return SyntaxNode::interior(RuleTag::Var, vec![SyntaxNode::leaf(token)]);
            }
            // ( expr ) inlines to the inner expression.
            Rule::expr => return lower_expr(inner),
            _ => {}
        }
    }
    unreachable!("factor lowering found no operand")
}

fn expr_op_tag(rule: Rule) -> RuleTag {
    match rule {
        Rule::plus => RuleTag::Add,
        Rule::minus => RuleTag::Sub,
        Rule::gt => RuleTag::Gt,
        Rule::lt => RuleTag::Lt,
        Rule::ge => RuleTag::Ge,
        Rule::le => RuleTag::Le,
        Rule::eq => RuleTag::Eq,
        Rule::ne => RuleTag::Ne,
        rule => unreachable!("not an expression operator: {rule:?}"),
    }
}

fn term_op_tag(rule: Rule) -> RuleTag {
    match rule {
        Rule::star => RuleTag::Mul,
        Rule::slash => RuleTag::Div,
        Rule::percent => RuleTag::Mod,
        rule => unreachable!("not a term operator: {rule:?}"),
    }
}

// ============================================================================
// PAIR UTILITIES
// ============================================================================

fn leaf_token(pair: &Pair<Rule>) -> Token {
    let (line, column) = pair.line_col();
    Token {
        kind: token_kind(pair.as_rule()).unwrap(), // callers only pass terminal rules
        text: pair.as_str().to_string(),
        line,
        column,
    }
}

/// First direct child matching `rule`, as a token.
fn find_token(pair: &Pair<Rule>, rule: Rule) -> Token {
    let inner = pair
        .clone()
        .into_inner()
        .find(|p| p.as_rule() == rule)
        .unwrap(); // grammar guarantees the terminal exists
    leaf_token(&inner)
}

/// First direct child matching `rule`, as a pair.
fn find_rule(pair: Pair<Rule>, rule: Rule) -> Pair<Rule> {
    pair.into_inner()
        .find(|p| p.as_rule() == rule)
        .unwrap() // grammar guarantees the rule exists
}
