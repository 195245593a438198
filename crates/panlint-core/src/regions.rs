//! Region classification for raw template text.
//!
//! Most checks must not look inside string literals, comments, annotation
//! blocks or heredoc bodies. This module finds those regions:
//!
//! - [`string_ranges`]: quoted literals on a single line
//! - [`strip_trailing_comments`]: the code part of a line
//! - [`ignored_lines`]: whole lines covered by multi-line annotation blocks
//!   or heredoc bodies, computed once per file

use crate::utils::literal_regex;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::trace;

/// Start of a trailing comment: `#` or a single-line `@{...}` annotation.
static COMMENT: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"#|@\{.*?\}"));

/// A line holding nothing but a comment.
static COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"^\s*(?:#|@\{.*?\}).*$"));

/// Annotation blocks, possibly spanning lines.
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"(?s)@\w*\{.*?\}"));

/// Heredoc opener: `<<TAG;` followed by blanks up to the end of the line.
static HEREDOC_OPEN: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"(?m)<<(\w+);[^\S\n]*$"));

/// Set of 1-indexed line numbers excluded from linting.
pub type IgnoredLines = BTreeSet<usize>;

/// Byte range of a quoted string literal on a line, quotes included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StringRange {
    /// Offset of the opening quote.
    pub start: usize,
    /// Offset just past the closing quote.
    pub end: usize,
}

impl StringRange {
    /// Creates a new range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether `start..end` lies entirely within this range.
    #[must_use]
    pub fn contains(&self, start: usize, end: usize) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Finds all single- and double-quoted string literals on a line.
///
/// A single-quoted literal ends at the next `'`. A double-quoted literal
/// ends at the next `"` that is not preceded by a backslash. An opening
/// quote without a matching close is not a literal.
#[must_use]
pub fn string_ranges(text: &str) -> Vec<StringRange> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let close = match bytes[i] {
            b'\'' => bytes[i + 1..]
                .iter()
                .position(|&b| b == b'\'')
                .map(|p| i + 1 + p),
            b'"' => (i + 1..bytes.len()).find(|&j| bytes[j] == b'"' && bytes[j - 1] != b'\\'),
            _ => None,
        };

        match close {
            Some(close) => {
                trace!(start = i, end = close + 1, "string range");
                ranges.push(StringRange::new(i, close + 1));
                i = close + 1;
            }
            None => i += 1,
        }
    }

    ranges
}

/// Whether `start..end` is fully contained in any of `ranges`.
#[must_use]
pub fn inside_string(start: usize, end: usize, ranges: &[StringRange]) -> bool {
    ranges.iter().any(|r| r.contains(start, end))
}

/// Returns the code part of a line, without any trailing comment.
///
/// A comment marker whose first character lies inside a string literal is
/// not a comment. When a comment is removed the remaining text is
/// right-trimmed; otherwise the line is returned untouched.
#[must_use]
pub fn strip_trailing_comments<'a>(text: &'a str, ranges: &[StringRange]) -> &'a str {
    for comment in COMMENT.find_iter(text) {
        if !inside_string(comment.start(), comment.start() + 1, ranges) {
            trace!(start = comment.start(), end = comment.end(), "comment");
            return text[..comment.start()].trim_end();
        }
    }
    text
}

/// Whether a line contains nothing but a comment.
#[must_use]
pub fn is_comment_line(text: &str) -> bool {
    COMMENT_LINE.is_match(text)
}

/// Line numbers covered by annotation blocks, first through last line.
#[must_use]
pub fn annotation_lines(text: &str) -> IgnoredLines {
    let mut lines = IgnoredLines::new();
    for annotation in ANNOTATION.find_iter(text) {
        let first = line_of(text, annotation.start());
        let last = first + annotation.as_str().matches('\n').count();
        lines.extend(first..=last);
    }
    lines
}

/// Line numbers covered by heredoc bodies.
///
/// The opener line (`"/x" = <<EOF;`) is still linted; every following line
/// up to and including the closing tag line is ignored. The closing tag is
/// the first later occurrence of the tag directly followed by the end of a
/// line.
#[must_use]
pub fn heredoc_lines(text: &str) -> IgnoredLines {
    let mut lines = IgnoredLines::new();
    let mut search_from = 0;

    while let Some(caps) = HEREDOC_OPEN.captures_at(text, search_from) {
        let (Some(opener), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        match find_closing_tag(text, tag.as_str(), opener.end()) {
            Some(close_end) => {
                let first = line_of(text, opener.start());
                let last = first + text[opener.start()..close_end].matches('\n').count();
                lines.extend(first + 1..=last);
                search_from = close_end;
            }
            None => search_from = opener.end(),
        }
    }

    lines
}

/// All lines excluded from linting: annotation blocks and heredoc bodies.
#[must_use]
pub fn ignored_lines(text: &str) -> IgnoredLines {
    let mut lines = annotation_lines(text);
    lines.extend(heredoc_lines(text));
    lines
}

/// Finds the end offset of the first `tag` at or after `from` that is
/// directly followed by a line end.
fn find_closing_tag(text: &str, tag: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(found) = text[pos..].find(tag) {
        let end = pos + found + tag.len();
        if end == text.len() || text[end..].starts_with('\n') {
            return Some(end);
        }
        pos += found + tag.chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// 1-indexed line number of a byte offset.
fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(text: &str) -> Vec<(usize, usize)> {
        string_ranges(text)
            .into_iter()
            .map(|r| (r.start, r.end))
            .collect()
    }

    #[test]
    fn test_string_ranges() {
        assert_eq!(ranges(r#"there is a "string" in here"#), vec![(11, 19)]);
        assert_eq!(
            ranges(r#""string" + 'string' + something"#),
            vec![(0, 8), (11, 19)]
        );
    }

    #[test]
    fn test_string_ranges_escaped_quote() {
        assert_eq!(ranges(r#"x = "say \"hi\"" + 1;"#), vec![(4, 16)]);
    }

    #[test]
    fn test_string_ranges_unterminated() {
        assert!(ranges(r#"x = "never closed"#).is_empty());
        assert_eq!(ranges(r#"x = "it's" + 1;"#), vec![(4, 10)]);
    }

    #[test]
    fn test_inside_string() {
        let r = [StringRange::new(0, 25)];
        assert!(inside_string(3, 4, &r));
        assert!(inside_string(0, 25, &r));
        assert!(!inside_string(24, 26, &r));
        assert!(!inside_string(28, 29, &r));
    }

    #[test]
    fn test_strip_trailing_comments() {
        let plain = "Words; # This is a trailing comment";
        assert_eq!(strip_trailing_comments(plain, &[]), "Words;");

        let in_string = "words = '# Not a trailing comment' + pictures;";
        assert_eq!(
            strip_trailing_comments(in_string, &string_ranges(in_string)),
            in_string
        );

        let mixed = "words = '# Not a trailing comment';#But this is";
        assert_eq!(
            strip_trailing_comments(mixed, &string_ranges(mixed)),
            "words = '# Not a trailing comment';"
        );
    }

    #[test]
    fn test_strip_trailing_annotations() {
        let plain = "Words; @{This is a trailing annotation}";
        assert_eq!(strip_trailing_comments(plain, &[]), "Words;");

        let in_string = "words = '@{Not a trailing annotation}' + pictures;";
        assert_eq!(
            strip_trailing_comments(in_string, &string_ranges(in_string)),
            in_string
        );

        let mixed = "words = '@{Not a trailing annotation}';@{But this is}";
        assert_eq!(
            strip_trailing_comments(mixed, &string_ranges(mixed)),
            "words = '@{Not a trailing annotation}';"
        );
    }

    #[test]
    fn test_strip_keeps_trailing_whitespace_without_comment() {
        assert_eq!(strip_trailing_comments("x = 1;   ", &[]), "x = 1;   ");
    }

    #[test]
    fn test_comment_lines() {
        assert!(is_comment_line("# comment"));
        assert!(is_comment_line("    @{ desc }"));
        assert!(!is_comment_line("x = 1; # comment"));
        assert!(!is_comment_line("@{ unterminated"));
    }

    #[test]
    fn test_find_annotation_blocks() {
        let text = "structure template awesome;
        @{ desc = what is the point of this template? }

        'foo' : string
        'bar' ? long

        @{ This stuff on line seven is not code, things like x=x+1 should be ignored here... }
        'simon' : string = 'says';
        ";
        assert_eq!(annotation_lines(text), IgnoredLines::from([2, 7]));
        assert!(annotation_lines("template garbage;\n\n# Nothing to see here.\n\n").is_empty());
    }

    #[test]
    fn test_multiline_annotation_block() {
        let text = "template a;\n@documentation{\n  desc = x\n}\n'/x' = 1;\n";
        assert_eq!(annotation_lines(text), IgnoredLines::from([2, 3, 4]));
    }

    #[test]
    fn test_find_heredoc_blocks() {
        let text = "unique template awesome;
        \"/something\" = 1;
        \"/a/b/c\" = <<EOFF;
        \"/a/\" = 1+1;
        EOFF
        \"/very\" = 1;
        \"/more\" = <<EOFF;
        hello
        EOFF
        ";
        assert_eq!(heredoc_lines(text), IgnoredLines::from([4, 5, 8, 9]));
        assert!(heredoc_lines("template garbage;\n\n# Nothing to see here.\n\n").is_empty());
    }

    #[test]
    fn test_heredoc_closer_must_end_line() {
        let text = "template a;\n'/x' = <<END;\nEND of story\nEND\n'/y' = 1;\n";
        assert_eq!(heredoc_lines(text), IgnoredLines::from([3, 4]));
    }

    #[test]
    fn test_heredoc_non_ascii_tag() {
        let text = "template a;\n'/x' = <<\u{e9}OF;\n\u{e9}OF is not the end\n\u{e9}OF\n'/y' = 1;\n";
        assert_eq!(heredoc_lines(text), IgnoredLines::from([3, 4]));

        let unclosed = "template a;\n'/x' = <<\u{e9}\u{e9};\n\u{e9}\u{e9}\u{e9} here\n";
        assert!(heredoc_lines(unclosed).is_empty());
    }

    #[test]
    fn test_heredoc_overlapping_tag() {
        let text = "template a;\n'/x' = <<AA;\nbody\nAAA\n'/y' = 1;\n";
        assert_eq!(heredoc_lines(text), IgnoredLines::from([3, 4]));
    }

    #[test]
    fn test_unclosed_heredoc_ignores_nothing() {
        let text = "template a;\n'/x' = <<END;\nstill here\n";
        assert!(heredoc_lines(text).is_empty());
    }

    #[test]
    fn test_ignored_lines_union() {
        let text = "template a;\n@{\nnote\n}\n'/x' = <<EOT;\nbody\nEOT\n";
        assert_eq!(ignored_lines(text), IgnoredLines::from([2, 3, 4, 6, 7]));
    }
}
