pub mod layout;
pub mod text;

pub use layout::{LineRole, RenderedLine, layout};
pub use text::{TextOptions, render_text};

use crate::keyword::BlockKeyword;
use crate::node::CodeNode;

/// Receives the nodes of a forest in source order, each with its nesting
/// depth. Top-level nodes are at depth 0.
pub trait Sink {
    /// A block's start line.
    fn header(&mut self, depth: usize, keyword: BlockKeyword, text: &str);
    /// An ordinary line.
    fn line(&mut self, depth: usize, text: &str);
    /// An else-marker, already at the depth of its enclosing block's header.
    fn else_marker(&mut self, depth: usize, text: &str);
    /// A block's end line, at the depth of its header.
    fn footer(&mut self, depth: usize, keyword: BlockKeyword, text: &str);
}

struct Frame<'a> {
    nodes: std::slice::Iter<'a, CodeNode>,
    depth: usize,
    /// Footer to emit once `nodes` is exhausted.
    close: Option<(BlockKeyword, &'a str)>,
}

/// Walk `nodes` depth-first, feeding every line to `sink`.
///
/// Uses an explicit stack, so deeply nested input cannot exhaust the call
/// stack.
pub fn walk<S: Sink + ?Sized>(nodes: &[CodeNode], sink: &mut S) {
    let mut stack = vec![Frame {
        nodes: nodes.iter(),
        depth: 0,
        close: None,
    }];

    while let Some(frame) = stack.last_mut() {
        let depth = frame.depth;
        match frame.nodes.next() {
            Some(CodeNode::Text {
                content,
                is_else: false,
            }) => sink.line(depth, content),
            Some(CodeNode::Text {
                content,
                is_else: true,
            }) => sink.else_marker(depth.saturating_sub(1), content),
            Some(CodeNode::Block {
                keyword,
                header,
                children,
                footer,
            }) => {
                sink.header(depth, *keyword, header);
                stack.push(Frame {
                    nodes: children.iter(),
                    depth: depth + 1,
                    close: footer.as_deref().map(|f| (*keyword, f)),
                });
            }
            None => {
                if let Some((keyword, footer)) = frame.close {
                    sink.footer(depth - 1, keyword, footer);
                }
                stack.pop();
            }
        }
    }
}
