//! Marker lines that point at problem ranges.
//!
//! A marker line is a string of spaces and carets aligned under the source
//! line, e.g.
//!
//! ```text
//! variable b = 8* 1;
//!              ^^
//! ```

use crate::types::Problem;

/// Marker character used under problem ranges.
pub const MARKER: char = '^';

/// Visible replacement for tab characters on UTF-8 terminals.
pub const TAB_ARROW: char = '\u{2192}';

/// Formats a marker line for the range `start..end`.
///
/// The result is `start` spaces followed by `end - start` carets. A range
/// with `end <= start` renders as `start` spaces.
#[must_use]
pub fn diagnose(start: usize, end: usize) -> String {
    let mut out = " ".repeat(start);
    out.extend(std::iter::repeat(MARKER).take(end.saturating_sub(start)));
    out
}

/// Merges several marker lines into one.
///
/// Every column that is non-blank in any input is non-blank in the output;
/// trailing blanks are dropped.
#[must_use]
pub fn merge_diagnoses<S: AsRef<str>>(diagnoses: &[S]) -> String {
    let width = diagnoses
        .iter()
        .map(|d| d.as_ref().trim_end().chars().count())
        .max()
        .unwrap_or(0);
    let mut merged = vec![' '; width];

    for diagnosis in diagnoses {
        for (i, c) in diagnosis.as_ref().trim_end().chars().enumerate() {
            if c != ' ' {
                merged[i] = c;
            }
        }
    }

    merged.into_iter().collect::<String>().trim_end().to_string()
}

/// Renders one merged marker line for all problems on `text`.
///
/// Problem offsets are byte offsets; they are converted to character
/// columns so the markers line up with the displayed text.
#[must_use]
pub fn render_line(text: &str, problems: &[Problem]) -> String {
    let diagnoses: Vec<String> = problems
        .iter()
        .map(|p| diagnose(char_column(text, p.start), char_column(text, p.end)))
        .collect();
    merge_diagnoses(&diagnoses)
}

/// Converts a byte offset into a character column.
///
/// Offsets past the end of `text` keep counting one column per byte.
#[must_use]
pub fn char_column(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.chars().count() + (offset - text.len());
    }
    text.char_indices().take_while(|(i, _)| *i < offset).count()
}

/// Replaces tabs with a visible character of the same display width.
#[must_use]
pub fn visible_tabs(text: &str, unicode: bool) -> String {
    let replacement = if unicode { TAB_ARROW } else { ' ' };
    text.replace('\t', &replacement.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Message, Severity};

    const MSG: Message = Message::new("LP900", Severity::Advice, "test");

    #[test]
    fn diagnose_ranges() {
        assert_eq!(diagnose(0, 0), "");
        assert_eq!(diagnose(0, 4), "^^^^");
        assert_eq!(diagnose(2, 8), "  ^^^^^^");
        assert_eq!(diagnose(7, 7), "       ");
        assert_eq!(diagnose(3, 0), "   ");
    }

    #[test]
    fn diagnose_length_and_caret_count() {
        for (a, b) in [(0, 3), (4, 9), (10, 11)] {
            let line = diagnose(a, b);
            assert_eq!(line.len(), b);
            assert_eq!(line.matches(MARKER).count(), b - a);
            assert!(line[..a].chars().all(|c| c == ' '));
        }
    }

    #[test]
    fn merge_empty() {
        let none: [&str; 0] = [];
        assert_eq!(merge_diagnoses(&none), "");
    }

    #[test]
    fn merge_single_and_pair() {
        let diag1 = " ^";
        let diag2 = "       ^^^";
        assert_eq!(merge_diagnoses(&[diag1]), diag1);
        assert_eq!(merge_diagnoses(&[diag2]), diag2);
        assert_eq!(merge_diagnoses(&[diag1, diag2]), " ^     ^^^");
        assert_eq!(merge_diagnoses(&[diag2, diag1]), " ^     ^^^");
    }

    #[test]
    fn merge_overlapping_ranges() {
        assert_eq!(merge_diagnoses(&["  ^^^", " ^^", "    ^^  "]), " ^^^^^");
    }

    #[test]
    fn render_line_uses_character_columns() {
        // "é" is two bytes but one column.
        let text = "'é' = x+1;";
        let plus = text.find('+').unwrap_or_default();
        let problems = vec![Problem::new(plus - 1, plus + 2, &MSG)];
        assert_eq!(render_line(text, &problems), "      ^^^");
    }

    #[test]
    fn visible_tabs_replacement() {
        assert_eq!(visible_tabs("\tx", true), "\u{2192}x");
        assert_eq!(visible_tabs("\tx", false), " x");
    }
}
