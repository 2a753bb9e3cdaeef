use std::fmt;

/// Keyword that opens a nested block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKeyword {
    Function,
    Procedure,
    If,
    For,
    While,
    Begin,
}

/// Keyword that closes the innermost open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndKeyword {
    EndIf,
    EndFor,
    EndWhile,
    End,
}

/// Classification of a single non-blank source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    BlockStart(BlockKeyword),
    BlockEnd(EndKeyword),
    /// `else`: splits the enclosing block without opening a scope.
    Else,
    Text,
}

/// Start keywords in match order. `None` marks the else-marker, which is
/// found through the same list but never opens a block.
///
/// Precedence is list order. No entry is currently a prefix of another, so
/// reordering by length would not change any classification today.
const START_KEYWORDS: [(&str, Option<BlockKeyword>); 7] = [
    ("function", Some(BlockKeyword::Function)),
    ("procedure", Some(BlockKeyword::Procedure)),
    ("if", Some(BlockKeyword::If)),
    ("for", Some(BlockKeyword::For)),
    ("while", Some(BlockKeyword::While)),
    ("begin", Some(BlockKeyword::Begin)),
    ("else", None),
];

/// End keywords in match order.
const END_KEYWORDS: [(&str, EndKeyword); 4] = [
    ("endif", EndKeyword::EndIf),
    ("endfor", EndKeyword::EndFor),
    ("endwhile", EndKeyword::EndWhile),
    ("end", EndKeyword::End),
];

impl BlockKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKeyword::Function => "function",
            BlockKeyword::Procedure => "procedure",
            BlockKeyword::If => "if",
            BlockKeyword::For => "for",
            BlockKeyword::While => "while",
            BlockKeyword::Begin => "begin",
        }
    }
}

impl EndKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            EndKeyword::EndIf => "endif",
            EndKeyword::EndFor => "endfor",
            EndKeyword::EndWhile => "endwhile",
            EndKeyword::End => "end",
        }
    }
}

impl fmt::Display for BlockKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EndKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whitespace for line trimming: Unicode whitespace plus the byte-order
/// mark, which editors on Windows leave at the start of saved files.
pub fn is_line_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// The line without leading or trailing [`is_line_space`] characters.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(is_line_space)
}

/// Classify one line of pseudocode.
///
/// Matching happens at the start of the trimmed line and ignores ASCII case.
/// End keywords are tested before start keywords, so `EndIf` is always an
/// end marker and never an `if` block.
pub fn classify(line: &str) -> LineKind {
    let trimmed = trim_line(line);

    for (word, keyword) in END_KEYWORDS {
        if starts_with_keyword(trimmed, word) {
            return LineKind::BlockEnd(keyword);
        }
    }

    for (word, keyword) in START_KEYWORDS {
        if starts_with_keyword(trimmed, word) {
            return match keyword {
                Some(keyword) => LineKind::BlockStart(keyword),
                None => LineKind::Else,
            };
        }
    }

    LineKind::Text
}

/// True if `text` begins with `keyword` followed by whitespace, `(`, or the
/// end of the text. `endpoint()` does not start with `end`.
fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    let Some(head) = text.get(..keyword.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(keyword) {
        return false;
    }
    match text[keyword.len()..].chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || c == '(',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_keywords_ignore_case() {
        for line in ["IF(x)", "if(x)", "If (x)", "iF"] {
            assert_eq!(classify(line), LineKind::BlockStart(BlockKeyword::If), "{line}");
        }
        assert_eq!(
            classify("Procedure push(s, x)"),
            LineKind::BlockStart(BlockKeyword::Procedure)
        );
        assert_eq!(classify("\tWHILE not empty(q)"), LineKind::BlockStart(BlockKeyword::While));
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        assert_eq!(classify("ifx(a)"), LineKind::Text);
        assert_eq!(classify("endpoint()"), LineKind::Text);
        assert_eq!(classify("endifx"), LineKind::Text);
        assert_eq!(classify("format(s)"), LineKind::Text);
        assert_eq!(classify("before = x"), LineKind::Text);
        assert_eq!(classify("if:"), LineKind::Text);
    }

    #[test]
    fn end_keywords_take_priority() {
        assert_eq!(classify("EndIf"), LineKind::BlockEnd(EndKeyword::EndIf));
        assert_eq!(classify("  endfor"), LineKind::BlockEnd(EndKeyword::EndFor));
        assert_eq!(classify("EndWhile (loop)"), LineKind::BlockEnd(EndKeyword::EndWhile));
        assert_eq!(classify("End"), LineKind::BlockEnd(EndKeyword::End));
        assert_eq!(classify("end if"), LineKind::BlockEnd(EndKeyword::End));
    }

    #[test]
    fn else_is_its_own_kind() {
        assert_eq!(classify("Else"), LineKind::Else);
        assert_eq!(classify("  else (otherwise)"), LineKind::Else);
        assert_eq!(classify("elseif x"), LineKind::Text);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(
            classify("\u{feff}procedure p"),
            LineKind::BlockStart(BlockKeyword::Procedure)
        );
        assert_eq!(classify("\u{feff}EndIf"), LineKind::BlockEnd(EndKeyword::EndIf));
        assert_eq!(trim_line(" \u{feff}\t"), "");
    }

    #[test]
    fn non_ascii_prefix_is_text() {
        assert_eq!(classify("éif x"), LineKind::Text);
        assert_eq!(classify("∀x"), LineKind::Text);
        assert_eq!(classify(""), LineKind::Text);
    }
}
