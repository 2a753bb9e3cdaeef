use crate::Forest;
use crate::keyword::BlockKeyword;
use crate::render::{Sink, walk};

/// What a rendered line represents, for styling by a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Header(BlockKeyword),
    Footer(BlockKeyword),
    Text,
    Else,
}

/// One line of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub depth: usize,
    pub role: LineRole,
    pub text: String,
}

#[derive(Default)]
struct LayoutSink {
    lines: Vec<RenderedLine>,
}

impl LayoutSink {
    fn push(&mut self, depth: usize, role: LineRole, text: &str) {
        self.lines.push(RenderedLine {
            depth,
            role,
            text: text.to_string(),
        });
    }
}

impl Sink for LayoutSink {
    fn header(&mut self, depth: usize, keyword: BlockKeyword, text: &str) {
        self.push(depth, LineRole::Header(keyword), text);
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.push(depth, LineRole::Text, text);
    }

    fn else_marker(&mut self, depth: usize, text: &str) {
        self.push(depth, LineRole::Else, text);
    }

    fn footer(&mut self, depth: usize, keyword: BlockKeyword, text: &str) {
        self.push(depth, LineRole::Footer(keyword), text);
    }
}

/// Lay the forest out as a flat list of lines with nesting depths.
pub fn layout(forest: &Forest) -> Vec<RenderedLine> {
    let mut sink = LayoutSink::default();
    walk(&forest.nodes, &mut sink);
    sink.lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn depths(source: &str) -> Vec<(usize, LineRole)> {
        layout(&parse(source))
            .into_iter()
            .map(|l| (l.depth, l.role))
            .collect()
    }

    #[test]
    fn else_sits_at_header_depth() {
        assert_eq!(
            depths("If(x)\n  push(y)\nElse\n  pop(y)\nEndIf"),
            vec![
                (0, LineRole::Header(BlockKeyword::If)),
                (1, LineRole::Text),
                (0, LineRole::Else),
                (1, LineRole::Text),
                (0, LineRole::Footer(BlockKeyword::If)),
            ]
        );
    }

    #[test]
    fn nested_else_dedents_one_level() {
        assert_eq!(
            depths("procedure p\nif a\nx\nelse\ny\nendif\nend"),
            vec![
                (0, LineRole::Header(BlockKeyword::Procedure)),
                (1, LineRole::Header(BlockKeyword::If)),
                (2, LineRole::Text),
                (1, LineRole::Else),
                (2, LineRole::Text),
                (1, LineRole::Footer(BlockKeyword::If)),
                (0, LineRole::Footer(BlockKeyword::Procedure)),
            ]
        );
    }

    #[test]
    fn open_block_has_no_footer_line() {
        assert_eq!(
            depths("while x\nstep"),
            vec![(0, LineRole::Header(BlockKeyword::While)), (1, LineRole::Text)]
        );
    }

    #[test]
    fn top_level_else_stays_at_zero() {
        assert_eq!(depths("else"), vec![(0, LineRole::Else)]);
    }
}
