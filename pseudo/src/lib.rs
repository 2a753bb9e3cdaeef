pub mod keyword;
pub mod node;
pub mod parser;
pub mod render;

use std::fmt;

use crate::node::CodeNode;
use crate::render::TextOptions;

/// The structure recovered from one pseudocode body.
///
/// A forest rather than a tree: a body may hold several top-level
/// statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    pub nodes: Vec<CodeNode>,
}

impl Forest {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first flattening back to source lines. Always equal to the
    /// non-blank lines of the parsed text, in order.
    pub fn flatten(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.push_lines(&mut out);
        }
        out
    }

    /// Number of source lines held by the forest.
    pub fn line_count(&self) -> usize {
        self.nodes.iter().map(CodeNode::line_count).sum()
    }
}

impl fmt::Display for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::render_text(&self.nodes, &TextOptions::default()))
    }
}

/// Parse pseudocode text into its block forest, discarding warnings.
pub fn parse(source: &str) -> Forest {
    parser::parse_source(source, 0).forest
}
