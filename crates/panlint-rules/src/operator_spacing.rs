//! Rule to require whitespace around operators.
//!
//! There is no tokenizer, so every operator-looking token is classified from
//! the text on either side of it. The first matching case wins:
//!
//! 1. Tokens inside a string literal are skipped.
//! 2. A heredoc opener (`<<EOF`) is not an operator and is skipped.
//! 3. Tokens that begin or end the code on a line belong to a multi-line
//!    expression and are skipped.
//! 4. A minus sign in front of a number, after another operator or an
//!    assignment, is a sign: it must not be followed by whitespace (LC006).
//! 5. `+` and `-` inside a simple index expression such as `b[c-1]` must
//!    not be spaced at all (LC007).
//! 6. Anything else needs a space or tab on both sides (LC003, LC004, LC005).
//!
//! # Examples
//!
//! ```text
//! variable b = 8* 1;       LC003
//! variable b = 16 /2;      LC004
//! variable d = 10-2;       LC005
//! variable x = - 1;        LC006
//! variable x = b[c + 1];   LC007
//! ```

use panlint_core::utils::{advance_chars, literal_regex, retreat_char};
use panlint_core::{FileContext, LineContext, Message, Problem, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Rule name for operator-spacing.
pub const NAME: &str = "operator-spacing";

static OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"<<\w+|[>=<!?]=|[<>+*=/-]"));

/// Something other than a word, `)` or `=` ends the text before a sign.
static SIGN_AFTER_OPERATOR: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"[^\w\s)=]\s*$"));
static NUMBER_THEN_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"^\s*\d+\s*[^\w\s]"));
static ASSIGNMENT_END: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"=\s*$"));
static NUMBER_START: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"^\s*\d+"));

static BRACKET_OPEN: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"\[([\s\w+-]*)$"));
static BRACKET_CLOSE: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"^([\s\w+-]*)\]"));

/// LC003.
pub static MISSING_BEFORE: Message = Message::new(
    "LC003",
    Severity::Warning,
    "Missing space before operator",
);
/// LC004.
pub static MISSING_AFTER: Message =
    Message::new("LC004", Severity::Warning, "Missing space after operator");
/// LC005.
pub static MISSING_BOTH: Message = Message::new(
    "LC005",
    Severity::Warning,
    "Missing space before and after operator",
);
/// LC006.
pub static SPACE_AFTER_SIGN: Message = Message::new(
    "LC006",
    Severity::Warning,
    "Unwanted space after minus sign (not operator)",
);
/// LC007.
pub static SPACE_IN_INDEX: Message = Message::new(
    "LC007",
    Severity::Warning,
    "Unwanted space in simple expression in square brackets",
);

/// Requires whitespace around operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorSpacing;

impl OperatorSpacing {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OperatorSpacing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires whitespace around binary operators"
    }

    fn messages(&self) -> Vec<&'static Message> {
        vec![
            &MISSING_BEFORE,
            &MISSING_AFTER,
            &MISSING_BOTH,
            &SPACE_AFTER_SIGN,
            &SPACE_IN_INDEX,
        ]
    }

    fn check(&self, _file: &FileContext, line: &LineContext) -> Vec<Problem> {
        let text = line.code;
        let mut problems = Vec::new();

        for token in OPERATOR.find_iter(text) {
            let (start, end) = (token.start(), token.end());
            if line.inside_string(start, end) {
                continue;
            }
            if token.as_str().starts_with("<<") {
                trace!(start, end, "heredoc opener");
                continue;
            }
            if text[..start].trim().is_empty() || text[end..].trim().is_empty() {
                continue;
            }

            if let Some(problem) = check_operator(text, token.as_str(), start, end) {
                trace!(start = problem.start, end = problem.end, "operator spacing");
                problems.push(problem);
            }
        }

        problems
    }
}

fn check_operator(text: &str, op: &str, start: usize, end: usize) -> Option<Problem> {
    let before = &text[..start];
    let after = &text[end..];

    if op == "-" && is_sign(before, after) {
        return after
            .starts_with(char::is_whitespace)
            .then(|| Problem::new(start, advance_chars(text, end, 2), &SPACE_AFTER_SIGN));
    }

    if matches!(op, "+" | "-") {
        let open = BRACKET_OPEN.captures(before).and_then(|c| c.get(1));
        let close = BRACKET_CLOSE.captures(after).and_then(|c| c.get(1));
        if let (Some(open), Some(close)) = (open, close) {
            let expression = format!("{}{op}{}", open.as_str(), close.as_str());
            return expression.find(char::is_whitespace).map(|at| {
                let at = open.start() + at;
                Problem::new(at, advance_chars(text, at, 1), &SPACE_IN_INDEX)
            });
        }
    }

    let missing_before = !before.ends_with([' ', '\t']);
    let missing_after = !after.starts_with([' ', '\t']);
    let message = match (missing_before, missing_after) {
        (true, true) => &MISSING_BOTH,
        (true, false) => &MISSING_BEFORE,
        (false, true) => &MISSING_AFTER,
        (false, false) => return None,
    };

    let start = if missing_before { retreat_char(text, start) } else { start };
    let end = if missing_after { advance_chars(text, end, 1) } else { end };
    Some(Problem::new(start, end, message))
}

/// Whether a `-` between `before` and `after` is the sign of a number.
fn is_sign(before: &str, after: &str) -> bool {
    (SIGN_AFTER_OPERATOR.is_match(before) && NUMBER_THEN_SYMBOL.is_match(after))
        || (ASSIGNMENT_END.is_match(before) && NUMBER_START.is_match(after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use panlint_core::regions::StringRange;
    use std::path::Path;

    fn check(text: &str) -> Vec<Problem> {
        let file = FileContext::new(Path::new("ops.pan"), "");
        OperatorSpacing::new().check(&file, &LineContext::new(1, text))
    }

    #[test]
    fn test_good_lines() {
        let good = [
            "variable a = 5 + 3;",
            "variable a = afunction() + 3;",
            "variable a = afunction() + 31;",
            "for (idx = 31; idx >= 0; idx = idx - 1) {",
            "variable x = b[c-1];",
            "variable x = -1;",
            "variable x = f(-1, 2);",
            "variable TitleCase ?= -3;",
            "+ 42;",
            "variable x = 42 +",
            "'/x' = <<EOF;",
            "'/a/b' = \"c+d\";",
        ];
        for text in good {
            assert!(check(text).is_empty(), "{text}");
        }
    }

    #[test]
    fn test_heredoc_openers_ignored() {
        for text in ["'/x' = <<EOF", "x = a<<b;", "'/x' = <<\u{c9}OF;", "'/x' = <<\u{c9}OF"] {
            assert!(check(text).is_empty(), "{text}");
        }
    }

    #[test]
    fn test_bad_lines() {
        let bad = [
            ("variable b = 8* 1;", "LC003", "             ^^"),
            ("variable b = 16 /2;", "LC004", "                ^^"),
            ("variable d = 10-2;", "LC005", "              ^^^"),
            ("variable x = b[c + 1];", "LC007", "                ^"),
            ("variable x = - 1;", "LC006", "             ^^^"),
        ];
        for (text, id, diagnosis) in bad {
            let problems = check(text);
            assert_eq!(problems.len(), 1, "{text}");
            assert_eq!(problems[0].id(), id, "{text}");
            assert_eq!(problems[0].diagnose(), diagnosis, "{text}");
        }
    }

    #[test]
    fn test_one_problem_per_operator() {
        let ids: Vec<_> = check("x = a+b*c;").iter().map(Problem::id).collect();
        assert_eq!(ids, vec!["LC005", "LC005"]);
    }

    #[test]
    fn test_supplied_string_ranges() {
        let file = FileContext::new(Path::new("foo.pan"), "");
        let line = LineContext::with_string_ranges(
            251,
            "'/software/components/bar' = 5+5;",
            vec![StringRange::new(0, 25)],
        );
        let problems = OperatorSpacing::new().check(&file, &line);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].id(), "LC005");
    }

    #[test]
    fn test_ranges_step_over_multibyte() {
        let problems = check("x = é+1;");
        assert_eq!((problems[0].start, problems[0].end), (4, 8));
    }
}
