// tests/analysis_tests.rs
//
// End-to-end checks of the analyze() bundle: token streams, tree shapes,
// diagnostics, and the serialized wire format.

use serde_json::Value;
use tinylang::{analyze, FailureKind, SyntaxNode, TokenKind};

fn leaves<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a tinylang::Token>) {
    match node {
        SyntaxNode::Interior { children, .. } => {
            for child in children {
                leaves(child, out);
            }
        }
        SyntaxNode::Leaf(token) => out.push(token),
    }
}

#[test]
fn empty_source_is_an_empty_program() {
    let result = analyze("");
    assert!(result.tokens.is_empty());
    assert!(result.diagnostics.is_empty());
    let tree = result.tree.expect("empty program still has a tree");
    assert_eq!(tree.children().len(), 0);
    assert_eq!(tree.label(), "program");
}

#[test]
fn declaration_and_assignment_with_precedence() {
    // Scenario A: int x; x = 1 + 2 * 3;
    let result = analyze("int x; x = 1 + 2 * 3;");
    assert!(result.diagnostics.is_empty());

    let json = serde_json::to_value(result.tree.unwrap()).unwrap();
    assert_eq!(json["label"], "program");
    assert_eq!(json["children"][0]["label"], "declaration");
    let assign = &json["children"][1];
    assert_eq!(assign["label"], "assign");
    assert_eq!(assign["children"][0]["label"], "NAME:x");
    let add = &assign["children"][1];
    assert_eq!(add["label"], "add");
    assert_eq!(add["children"][0]["label"], "number");
    assert_eq!(add["children"][0]["children"][0]["label"], "NUMBER:1");
    let mul = &add["children"][1];
    assert_eq!(mul["label"], "mul");
    assert_eq!(mul["children"][0]["children"][0]["label"], "NUMBER:2");
    assert_eq!(mul["children"][1]["children"][0]["label"], "NUMBER:3");
}

#[test]
fn if_statement_with_condition_and_block() {
    // Scenario B: if (x > 0) { print(x); }
    let result = analyze("if (x > 0) { print(x); }");
    assert!(result.diagnostics.is_empty());

    let json = serde_json::to_value(result.tree.unwrap()).unwrap();
    assert_eq!(json["children"].as_array().unwrap().len(), 1);
    let if_stmt = &json["children"][0];
    assert_eq!(if_stmt["label"], "if_stmt");
    let cond = &if_stmt["children"][0];
    assert_eq!(cond["label"], "gt");
    assert_eq!(cond["children"][0]["label"], "var");
    assert_eq!(cond["children"][0]["children"][0]["label"], "NAME:x");
    assert_eq!(cond["children"][1]["children"][0]["label"], "NUMBER:0");
    let block = &if_stmt["children"][1];
    assert_eq!(block["label"], "block");
    assert_eq!(block["children"].as_array().unwrap().len(), 1);
    assert_eq!(block["children"][0]["label"], "print_stmt");
}

#[test]
fn missing_semicolon_yields_one_syntax_diagnostic() {
    // Scenario C: int x
    let result = analyze("int x");
    assert!(result.tree.is_none());
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.kind, FailureKind::Syntax);
    assert!(diag.message.contains("Expected one of:"));
    assert!(diag.message.contains(';'));
    assert_eq!(diag.line, Some(1));
    // Tokens were still produced: the lex succeeded.
    assert_eq!(result.tokens.len(), 2);
}

#[test]
fn dangling_operator_reports_the_unexpected_semicolon() {
    // Scenario D: x = 1 +;
    let result = analyze("x = 1 +;");
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.kind, FailureKind::Syntax);
    assert_eq!(diag.line, Some(1));
    assert_eq!(diag.column, Some(8));
}

#[test]
fn unterminated_block_reports_at_end_of_input() {
    let result = analyze("while (x < 10) { x = x + 1;");
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.kind, FailureKind::Syntax);
    assert!(diag.message.contains('}'));
    assert!(result.tree.is_none());
}

#[test]
fn lex_failure_has_its_own_kind_and_empty_tokens() {
    let result = analyze("int x;\nx = 1 @ 2;");
    assert!(result.tokens.is_empty());
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.kind, FailureKind::Lex);
    assert_eq!(diag.line, Some(2));
    assert_eq!(diag.column, Some(7));
}

#[test]
fn tree_leaves_match_the_meaningful_token_subsequence() {
    // Anonymous terminals are filtered from the tree, so its leaves must
    // equal the NAME/NUMBER subsequence of the token stream, in order.
    let source = "int x; x = 0; while (x < 5) { print(x * 2); x = x + 1; }";
    let result = analyze(source);
    assert!(result.diagnostics.is_empty());

    let mut tree_leaves = Vec::new();
    leaves(result.tree.as_ref().unwrap(), &mut tree_leaves);
    let leaf_texts: Vec<&str> = tree_leaves.iter().map(|t| t.text.as_str()).collect();

    let token_texts: Vec<&str> = result
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Name | TokenKind::Number))
        .map(|t| t.text.as_str())
        .collect();

    assert_eq!(leaf_texts, token_texts);
}

#[test]
fn analysis_is_idempotent() {
    let source = "int n; n = 3; if (n >= 2) { print(n % 2); } else { print(0); }";
    let first = serde_json::to_value(analyze(source)).unwrap();
    let second = serde_json::to_value(analyze(source)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn wire_format_uses_the_documented_field_names() {
    let json = serde_json::to_value(analyze("print(1);")).unwrap();
    let obj = json.as_object().unwrap();
    assert!(obj.contains_key("tokens"));
    assert!(obj.contains_key("errors"));
    assert!(obj.contains_key("tree"));

    let token = &json["tokens"][0];
    assert_eq!(token["type"], "PRINT");
    assert_eq!(token["value"], "print");
    assert_eq!(token["line"], 1);
    assert_eq!(token["column"], 1);

    assert_eq!(json["tree"]["id"], "n0");
    assert!(json["tree"]["children"].is_array());
}

#[test]
fn wire_format_omits_tree_and_fills_errors_on_failure() {
    let json = serde_json::to_value(analyze("int x")).unwrap();
    let obj = json.as_object().unwrap();
    assert!(!obj.contains_key("tree"));
    let error = &json["errors"][0];
    assert_eq!(error["kind"], "syntax");
    assert!(error["message"].as_str().unwrap().starts_with("Syntax error."));
    assert_eq!(error["line"], Value::from(1));
}

#[test]
fn comparison_and_additive_share_one_tier() {
    // 1 + x > 2 folds left-to-right: gt(add(1, x), 2)
    let result = analyze("y = 1 + x > 2;");
    assert!(result.diagnostics.is_empty());
    let json = serde_json::to_value(result.tree.unwrap()).unwrap();
    let expr = &json["children"][0]["children"][1];
    assert_eq!(expr["label"], "gt");
    assert_eq!(expr["children"][0]["label"], "add");
}
