pub mod error;
pub mod lines;
mod structural;

pub use error::{ParseWarning, WarningKind};
pub use lines::SourceLine;

use crate::Forest;

/// Result of a parse. The forest is always present; warnings describe
/// recovered anomalies and never change it.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub forest: Forest,
    pub warnings: Vec<ParseWarning>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Reconstruct the block structure of the source. Never fails.
    pub fn parse(&self) -> Parsed {
        parse_source(&self.source, self.file_id)
    }
}

pub(crate) fn parse_source(source: &str, file_id: usize) -> Parsed {
    let (nodes, warnings) = structural::build_forest(source, file_id);
    Parsed {
        forest: Forest { nodes },
        warnings,
        source_id: file_id,
    }
}
