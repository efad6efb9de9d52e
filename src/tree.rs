//! Parse-tree serialization.
//!
//! Flattens a [`SyntaxNode`] tree into the labeled, uniquely-identified node
//! graph handed to transport and rendering collaborators. Identifiers are
//! assigned in pre-order (depth-first, left-to-right), so identical trees
//! always serialize to identical graphs.

use serde::{Serialize, Serializer};

use crate::syntax::SyntaxNode;

/// One node of the serialized graph: `n<index>` identifier, display label,
/// and the child nodes in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub children: Vec<GraphNode>,
}

/// Serialize a tree into its graph form.
pub fn to_graph(root: &SyntaxNode) -> GraphNode {
    let mut next_id = 0;
    walk(root, &mut next_id)
}

fn walk(node: &SyntaxNode, next_id: &mut usize) -> GraphNode {
    let id = format!("n{next_id}");
    *next_id += 1;
    GraphNode {
        id,
        label: node.label(),
        children: node.children().iter().map(|c| walk(c, next_id)).collect(),
    }
}

/// Trees serialize directly as their graph form, so an
/// [`crate::analysis::AnalysisResult`] carries the documented
/// `{ id, label, children }` shape without an extra conversion step.
impl Serialize for SyntaxNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_graph(self).serialize(serializer)
    }
}
