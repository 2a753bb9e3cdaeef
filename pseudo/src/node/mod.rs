use crate::keyword::BlockKeyword;

/// A node in the reconstructed block structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeNode {
    /// A single line that opens no scope.
    Text {
        content: String,
        /// Set only for else-marker lines.
        is_else: bool,
    },
    /// A block opened by a start keyword.
    Block {
        keyword: BlockKeyword,
        /// The literal start line.
        header: String,
        children: Vec<CodeNode>,
        /// The literal matching end line, absent if the block was never closed.
        footer: Option<String>,
    },
}

impl CodeNode {
    pub fn text(content: impl Into<String>) -> Self {
        CodeNode::Text {
            content: content.into(),
            is_else: false,
        }
    }

    pub fn else_marker(content: impl Into<String>) -> Self {
        CodeNode::Text {
            content: content.into(),
            is_else: true,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, CodeNode::Block { .. })
    }

    /// True for blocks with a footer. Leaves are never terminated.
    pub fn is_terminated(&self) -> bool {
        matches!(self, CodeNode::Block { footer: Some(_), .. })
    }

    /// Number of source lines this node accounts for, children included.
    pub fn line_count(&self) -> usize {
        match self {
            CodeNode::Text { .. } => 1,
            CodeNode::Block {
                children, footer, ..
            } => {
                let own = if footer.is_some() { 2 } else { 1 };
                own + children.iter().map(CodeNode::line_count).sum::<usize>()
            }
        }
    }

    /// Source lines in depth-first order: header, children, footer.
    pub fn lines(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.push_lines(&mut out);
        out
    }

    pub(crate) fn push_lines<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            CodeNode::Text { content, .. } => out.push(content),
            CodeNode::Block {
                header,
                children,
                footer,
                ..
            } => {
                out.push(header);
                for child in children {
                    child.push_lines(out);
                }
                if let Some(footer) = footer {
                    out.push(footer);
                }
            }
        }
    }
}
