use std::ops::Range;

use crate::keyword;

/// A non-blank line of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// The line without its terminator.
    pub text: &'a str,
    /// Byte span of `text` in the source.
    pub span: Range<usize>,
    /// 1-based line number.
    pub number: usize,
}

/// Split source into lines, dropping blank ones.
///
/// Lines end at `\n`; a trailing `\r` is removed so CRLF text splits the
/// same way as LF text.
pub fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().filter_map(move |(index, raw)| {
        let start = offset;
        offset += raw.len() + 1;

        let text = raw.strip_suffix('\r').unwrap_or(raw);
        if keyword::trim_line(text).is_empty() {
            return None;
        }
        Some(SourceLine {
            text,
            span: start..start + text.len(),
            number: index + 1,
        })
    })
}
