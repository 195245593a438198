//! Utility functions for rule implementations.

use regex::Regex;

/// Compiles a regular expression written as a literal in the source.
///
/// Only use this for patterns fixed at compile time; patterns coming from
/// configuration must go through [`Regex::new`] and report their error.
#[must_use]
#[allow(clippy::expect_used)]
pub fn literal_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal regex must compile")
}

/// Steps `count` characters forward from byte offset `pos`.
///
/// Stops at the end of `text`; the result is always a char boundary.
#[must_use]
pub fn advance_chars(text: &str, pos: usize, count: usize) -> usize {
    let mut pos = pos.min(text.len());
    for _ in 0..count {
        match text[pos..].chars().next() {
            Some(c) => pos += c.len_utf8(),
            None => break,
        }
    }
    pos
}

/// Steps one character backward from byte offset `pos`.
#[must_use]
pub fn retreat_char(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text[..pos]
        .chars()
        .next_back()
        .map_or(0, |c| pos - c.len_utf8())
}
