use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

use crate::keyword::BlockKeyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An end marker with no open block. The line was kept as plain text.
    UnbalancedEnd,
    /// A block still open when the input ran out.
    UnclosedBlock(BlockKeyword),
}

/// A recovered parse anomaly with source location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub kind: WarningKind,
    pub message: String,
    pub span: Range<usize>,
    /// 1-based line number of `span`.
    pub line: usize,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl ParseWarning {
    pub fn unbalanced_end(span: Range<usize>, line: usize, file_id: usize) -> Self {
        ParseWarning {
            kind: WarningKind::UnbalancedEnd,
            message: "unbalanced end marker".to_string(),
            span,
            line,
            file_id,
            notes: Vec::new(),
        }
        .with_note("no block is open here; the line is kept as plain text")
    }

    pub fn unclosed_block(
        keyword: BlockKeyword,
        span: Range<usize>,
        line: usize,
        file_id: usize,
    ) -> Self {
        ParseWarning {
            kind: WarningKind::UnclosedBlock(keyword),
            message: format!("`{}` block is never closed", keyword),
            span,
            line,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(Severity::Warning)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
