use crate::keyword::{self, BlockKeyword};
use crate::node::CodeNode;
use crate::render::{Sink, walk};

/// Options for plain-text rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Columns per nesting level.
    pub indent: usize,
    /// Draw a `│` guide at each nesting level instead of blank indentation.
    pub guides: bool,
    /// Drop each line's own leading whitespace so structure alone sets the
    /// indentation.
    pub trim: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            indent: 4,
            guides: false,
            trim: false,
        }
    }
}

struct TextSink<'o> {
    options: &'o TextOptions,
    out: String,
}

impl TextSink<'_> {
    fn emit(&mut self, depth: usize, text: &str) {
        let unit = self.options.indent;
        for _ in 0..depth {
            if self.options.guides && unit > 0 {
                self.out.push('│');
                self.out.extend(std::iter::repeat_n(' ', unit - 1));
            } else {
                self.out.extend(std::iter::repeat_n(' ', unit));
            }
        }
        let text = if self.options.trim {
            text.trim_start_matches(keyword::is_line_space)
        } else {
            text
        };
        self.out.push_str(text);
        self.out.push('\n');
    }
}

impl Sink for TextSink<'_> {
    fn header(&mut self, depth: usize, _keyword: BlockKeyword, text: &str) {
        self.emit(depth, text);
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.emit(depth, text);
    }

    fn else_marker(&mut self, depth: usize, text: &str) {
        self.emit(depth, text);
    }

    fn footer(&mut self, depth: usize, _keyword: BlockKeyword, text: &str) {
        self.emit(depth, text);
    }
}

/// Render nodes as indented text, one output line per source line.
pub fn render_text(nodes: &[CodeNode], options: &TextOptions) -> String {
    let mut sink = TextSink {
        options,
        out: String::new(),
    };
    walk(nodes, &mut sink);
    sink.out
}
