//! Graphviz DOT emission for parse trees.
//!
//! The analyzer's half of the rendering contract: a deterministic DOT
//! digraph a layout engine can turn into a diagram. Rule nodes are ellipses,
//! token nodes are boxes labeled `KIND\ntext`, and node ids follow the same
//! pre-order scheme as the serialized graph.

use crate::syntax::SyntaxNode;

/// Render a tree as DOT source.
pub fn to_dot(root: &SyntaxNode) -> String {
    let mut out = String::from("digraph ParseTree {\n");
    let mut next_id = 0;
    emit(root, &mut next_id, &mut out);
    out.push_str("}\n");
    out
}

fn emit(node: &SyntaxNode, next_id: &mut usize, out: &mut String) -> usize {
    let id = *next_id;
    *next_id += 1;
    match node {
        SyntaxNode::Interior { rule, children } => {
            out.push_str(&format!(
                "    n{id} [label=\"{}\", shape=ellipse];\n",
                escape(rule.label())
            ));
            for child in children {
                let child_id = emit(child, next_id, out);
                out.push_str(&format!("    n{id} -> n{child_id};\n"));
            }
        }
        SyntaxNode::Leaf(token) => {
            out.push_str(&format!(
                "    n{id} [label=\"{}\\n{}\", shape=box];\n",
                escape(token.kind.as_str()),
                escape(&token.text)
            ));
        }
    }
    id
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
