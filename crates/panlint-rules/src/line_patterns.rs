//! Regex checks run against the code part of every line.
//!
//! # Detected Patterns
//!
//! | Id | Pattern |
//! |----|---------|
//! | LP001 | indentation that is not a multiple of four spaces |
//! | LP002 | tab characters |
//! | LP003 | trailing whitespace |
//! | LP004 | `nlist(...)` and `is_nlist(...)` |
//! | LP005 | `include { ... }` |
//! | LP006 | lines longer than 120 characters, except `include` lines |
//! | LP007 | commas not followed by exactly one space |
//! | LP008 | whitespace before a semicolon |
//! | LP009 | semicolons not followed by one space or end of line |
//! | LP010 | global variable names containing lowercase letters |
//! | LP011 | global variable names shorter than five characters |
//! | LP012 | `error(format(...))` and `debug(format(...))` |

use panlint_core::{
    CatalogError, FileContext, LineContext, Message, PatternCatalog, PatternEntry, Problem, Rule,
    Severity, LINE_PREFIX,
};

/// Rule name for line-patterns.
pub const NAME: &str = "line-patterns";

/// Lines longer than this many characters are reported.
pub const LINE_LENGTH_LIMIT: usize = 120;

/// LP001.
pub static INDENTATION: Message = Message::new(
    "LP001",
    Severity::Warning,
    "Indentation should be a multiple of four spaces",
);
/// LP002.
pub static TABS: Message = Message::new(
    "LP002",
    Severity::Warning,
    "Spaces should be used instead of tabs",
);
/// LP003.
pub static TRAILING_WHITESPACE: Message =
    Message::new("LP003", Severity::Warning, "Trailing whitespace");
/// LP004.
pub static NLIST: Message = Message::new("LP004", Severity::Warning, "Use dicts instead of nlists");
/// LP005.
pub static INCLUDE_BRACES: Message = Message::new(
    "LP005",
    Severity::Warning,
    "Include statements no longer need curly braces",
);
/// LP006.
pub static LINE_LENGTH: Message = Message::new(
    "LP006",
    Severity::Advice,
    "Line is longer than 120 characters (lines that are include statements are exempt)",
);
/// LP007.
pub static COMMA_SPACING: Message = Message::new(
    "LP007",
    Severity::Advice,
    "Commas should be followed by exactly one space",
);
/// LP008.
pub static SPACE_BEFORE_SEMICOLON: Message =
    Message::new("LP008", Severity::Advice, "Whitespace before semicolon");
/// LP009.
pub static SEMICOLON_SPACING: Message = Message::new(
    "LP009",
    Severity::Advice,
    "Semicolons should be followed exactly one space or end-of-line",
);
/// LP010.
pub static GLOBAL_UPPERCASE: Message = Message::new(
    "LP010",
    Severity::Warning,
    "Global variables should be uppercase",
);
/// LP011.
pub static GLOBAL_LENGTH: Message = Message::new(
    "LP011",
    Severity::Advice,
    "Global variables should be five or more characters",
);
/// LP012.
pub static REDUNDANT_FORMAT: Message = Message::new(
    "LP012",
    Severity::Advice,
    "Redundant use of format within error or debug call",
);

/// The line catalog. The first alternative of LP001 and LP006 describes
/// acceptable text and has no `error` group, so it never reports.
pub const ENTRIES: &[PatternEntry] = &[
    PatternEntry::new(&INDENTATION, r"^(?:(?: {4})*(?:\S.*)?$|(?P<error>\s+))"),
    PatternEntry::new(&TABS, r"(?P<error>\t+)"),
    PatternEntry::new(&TRAILING_WHITESPACE, r"(?P<error>\s+$)"),
    PatternEntry::new(&NLIST, r"\b(?P<error>(?:is_)?nlist)\s*\("),
    PatternEntry::new(&INCLUDE_BRACES, r"include\s+(?P<error>\{[^;]+\})"),
    PatternEntry::new(&LINE_LENGTH, r"^(?:\s*include\s.*|.{0,120}(?P<error>.*?))$"),
    PatternEntry::new(&COMMA_SPACING, r"(?P<error>,(?:\S|\s{2,}))"),
    PatternEntry::new(&SPACE_BEFORE_SEMICOLON, r"(?P<error>\s+;)"),
    PatternEntry::new(&SEMICOLON_SPACING, r";(?P<error>(?:\S|\s{2,}))"),
    PatternEntry::new(&GLOBAL_UPPERCASE, r"variable\s+(?P<error>\w+[a-z]\w)"),
    PatternEntry::new(&GLOBAL_LENGTH, r"variable\s+(?P<error>\w{1,4})\b"),
    PatternEntry::new(
        &REDUNDANT_FORMAT,
        r"(?:error|debug)\s*\(\s*(?P<error>format)\s*\(",
    ),
];

/// Runs the line catalog against the comment-stripped text of each line.
#[derive(Debug, Clone)]
pub struct LinePatterns {
    catalog: PatternCatalog,
}

impl LinePatterns {
    /// Compiles the line catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid.
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: PatternCatalog::compile(LINE_PREFIX, ENTRIES)?,
        })
    }
}

impl Rule for LinePatterns {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Whitespace, naming and deprecated-syntax checks driven by regular expressions"
    }

    fn messages(&self) -> Vec<&'static Message> {
        self.catalog.messages().collect()
    }

    fn check(&self, _file: &FileContext, line: &LineContext) -> Vec<Problem> {
        self.catalog.check(line.code, 0, &line.string_ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::Path;

    fn ids(text: &str) -> BTreeSet<&'static str> {
        let rule = LinePatterns::new().unwrap();
        let file = FileContext::new(Path::new("patterns.pan"), "");
        let line = LineContext::new(1, text);
        rule.check(&file, &line).iter().map(Problem::id).collect()
    }

    fn spans(text: &str) -> Vec<(&'static str, usize, usize)> {
        let rule = LinePatterns::new().unwrap();
        let file = FileContext::new(Path::new("patterns.pan"), "");
        let line = LineContext::new(1, text);
        rule.check(&file, &line)
            .iter()
            .map(|p| (p.id(), p.start, p.end))
            .collect()
    }

    #[test]
    fn test_global_variable_names() {
        let cases: &[(&str, &[&str])] = &[
            ("variable UNIVERSAL_TRUTH = 42;", &[]),
            ("variable BAD = -1;", &["LP011"]),
            ("variable bad_long = \":-(\";", &["LP010"]),
            ("variable bad = \"all lower\";", &["LP010", "LP011"]),
            ("variable tricky_onE = \"Uhoh\";", &["LP010"]),
            ("variable camelCase = \"camels!\";", &["LP010"]),
            ("variable TitleCase ?= -3;", &["LP010"]),
        ];
        for (text, expected) in cases {
            let expected: BTreeSet<_> = expected.iter().copied().collect();
            assert_eq!(ids(text), expected, "{text}");
        }
    }

    #[test]
    fn test_no_spaces_around_conditional_assignment() {
        let found = ids("variable NoSpacesHere?=True;");
        assert!(found.contains("LP010"));
        assert!(!found.contains("LP011"));
    }

    #[test]
    fn test_redundant_format() {
        assert_eq!(
            ids("error(format(\"Duplicate %s in foo\", mp));"),
            BTreeSet::from(["LP012"])
        );
        assert_eq!(
            ids("debug(format(\"%s: bar: %s\", OBJECT, ARGV[0]));"),
            BTreeSet::from(["LP012"])
        );
        assert!(ids("error(\"is_asndate: invalid format for time\");").is_empty());
        assert!(ids("debug(\"Foo\" + bar + \" has an unexpected format (should be a dict)\");")
            .is_empty());
    }

    #[test]
    fn test_indentation() {
        assert_eq!(spans("   x = x + 1;"), vec![("LP001", 0, 3)]);
        assert!(spans("        x = 1;").is_empty());
        assert!(spans("x = 1;").is_empty());
        assert_eq!(
            spans("\tx = 1;"),
            vec![("LP001", 0, 1), ("LP002", 0, 1)]
        );
    }

    #[test]
    fn test_semicolon_spacing() {
        assert_eq!(spans("foreach(k; v;  things) {"), vec![("LP009", 13, 15)]);
        assert_eq!(
            spans("foreach(k;    v;  things) {"),
            vec![("LP009", 10, 14), ("LP009", 16, 18)]
        );
        assert_eq!(spans("x = 1 ;"), vec![("LP008", 5, 7)]);
    }

    #[test]
    fn test_commas() {
        assert_eq!(spans("x = list(1,2,  3);"), vec![("LP007", 10, 12), ("LP007", 12, 15)]);
        assert!(spans("x = list(1, 2, 3);").is_empty());
    }

    #[test]
    fn test_deprecated_syntax() {
        assert_eq!(spans("x = nlist(\"a\", 1);"), vec![("LP004", 4, 9)]);
        assert_eq!(spans("if (is_nlist(x)) {"), vec![("LP004", 4, 12)]);
        assert_eq!(spans("include {'foo/bar'};"), vec![("LP005", 8, 19)]);
    }

    #[test]
    fn test_line_length() {
        let long = format!("'/x' = \"{}\";", "a".repeat(LINE_LENGTH_LIMIT));
        assert_eq!(
            spans(&long),
            vec![("LP006", LINE_LENGTH_LIMIT, long.len())]
        );

        let include = format!("include 'site/{}';", "a".repeat(LINE_LENGTH_LIMIT));
        assert!(spans(&include).is_empty());
    }

    #[test]
    fn test_trailing_whitespace_after_comment_is_stripped() {
        assert_eq!(spans("x = 1;   "), vec![("LP003", 6, 9)]);
        assert!(spans("x = 1;   # note   ").is_empty());
    }

    #[test]
    fn test_matches_inside_strings_ignored() {
        assert!(spans("'/x' = \"a\tb,c ;\";").is_empty());
    }
}
