pub use crate::analysis::{analyze, AnalysisResult};
pub use crate::diagnostics::{Diagnostic, SourceReport};
pub use crate::syntax::{FailureKind, ParseFailure, RuleTag, SyntaxNode, Token, TokenKind};
pub use crate::tree::GraphNode;

pub mod analysis;
pub mod cli;
pub mod diagnostics;
pub mod render;
pub mod syntax;
pub mod tree;
