use std::ops::Range;

use crate::keyword::{self, BlockKeyword, LineKind};
use crate::node::CodeNode;
use crate::parser::error::ParseWarning;
use crate::parser::lines::{SourceLine, source_lines};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the block forest for `source` in a single pass over its lines.
pub fn build_forest(source: &str, file_id: usize) -> (Vec<CodeNode>, Vec<ParseWarning>) {
    let mut state = ParseState::new(file_id);
    for line in source_lines(source) {
        state.process_line(&line);
    }
    state.finalize()
}

// ---------------------------------------------------------------------------
// Parse state
// ---------------------------------------------------------------------------

struct ParseState {
    file_id: usize,
    /// Stack of open blocks. Innermost = current container.
    block_stack: Vec<BlockBuilder>,
    /// Completed top-level nodes.
    top_nodes: Vec<CodeNode>,
    warnings: Vec<ParseWarning>,
}

struct BlockBuilder {
    keyword: BlockKeyword,
    header: String,
    header_span: Range<usize>,
    header_line: usize,
    children: Vec<CodeNode>,
}

impl BlockBuilder {
    fn into_node(self, footer: Option<String>) -> CodeNode {
        CodeNode::Block {
            keyword: self.keyword,
            header: self.header,
            children: self.children,
            footer,
        }
    }
}

impl ParseState {
    fn new(file_id: usize) -> Self {
        ParseState {
            file_id,
            block_stack: Vec::new(),
            top_nodes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Where the next node goes: the innermost open block, or the top level.
    fn container(&mut self) -> &mut Vec<CodeNode> {
        match self.block_stack.last_mut() {
            Some(builder) => &mut builder.children,
            None => &mut self.top_nodes,
        }
    }

    fn process_line(&mut self, line: &SourceLine<'_>) {
        let kind = keyword::classify(line.text);
        log::trace!("line {}: {:?}", line.number, kind);

        match kind {
            LineKind::BlockEnd(_) => {
                if let Some(builder) = self.block_stack.pop() {
                    let node = builder.into_node(Some(line.text.to_string()));
                    self.container().push(node);
                } else {
                    log::debug!("line {}: unbalanced end kept as text", line.number);
                    self.warnings.push(ParseWarning::unbalanced_end(
                        line.span.clone(),
                        line.number,
                        self.file_id,
                    ));
                    self.container().push(CodeNode::text(line.text));
                }
            }

            // Same-level annotation: no scope change.
            LineKind::Else => {
                self.container().push(CodeNode::else_marker(line.text));
            }

            LineKind::BlockStart(keyword) => {
                self.block_stack.push(BlockBuilder {
                    keyword,
                    header: line.text.to_string(),
                    header_span: line.span.clone(),
                    header_line: line.number,
                    children: Vec::new(),
                });
            }

            LineKind::Text => {
                self.container().push(CodeNode::text(line.text));
            }
        }
    }

    fn finalize(mut self) -> (Vec<CodeNode>, Vec<ParseWarning>) {
        // Blocks still open keep an absent footer.
        while let Some(builder) = self.block_stack.pop() {
            self.warnings.push(ParseWarning::unclosed_block(
                builder.keyword,
                builder.header_span.clone(),
                builder.header_line,
                self.file_id,
            ));
            let node = builder.into_node(None);
            self.container().push(node);
        }

        (self.top_nodes, self.warnings)
    }
}
