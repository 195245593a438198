//! Context types for rule execution.

use crate::header;
use crate::regions::{self, IgnoredLines, StringRange};
use crate::utils::literal_regex;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

/// An include of a component's config template, e.g. `include 'components/ntpd/config';`.
static COMPONENT_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"(?m)^\s*[^#]?\s*include.*components/(?P<name>\w+)/config"));

/// A file living in a component's own source tree.
static COMPONENT_SOURCE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    literal_regex(r"^/?(?:\S+/)?(?:core/components/|ncm-)(?P<name>\w+)/\S+$")
});

/// Context provided to rules for the file being linted.
///
/// Everything here is computed once from the whole file before any line is
/// checked, and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the file.
    pub path: &'a Path,
    /// Full raw contents.
    pub content: &'a str,
    /// Lines inside multi-line annotation blocks and heredoc bodies.
    pub ignored_lines: IgnoredLines,
    /// Components whose config the file is regarded as including.
    pub components_included: BTreeSet<String>,
    /// Name from the template declaration header, if the file has a valid one.
    pub template_name: Option<String>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str) -> Self {
        let ignored_lines = regions::ignored_lines(content);

        let mut components_included = declared_components(content);
        if let Some(name) = detect_component_source(path) {
            components_included.insert(name);
        }

        let template_name = first_code_line(content, &ignored_lines)
            .and_then(header::template_name)
            .map(String::from);

        Self {
            path,
            content,
            ignored_lines,
            components_included,
            template_name,
        }
    }

    /// Adds components to treat as included regardless of the file's contents.
    #[must_use]
    pub fn with_included_components<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components_included
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether a component's config counts as included.
    #[must_use]
    pub fn is_component_included(&self, name: &str) -> bool {
        self.components_included.contains(name)
    }

    /// Whether a line is excluded from linting as part of a multi-line block.
    #[must_use]
    pub fn is_ignored(&self, line_number: usize) -> bool {
        self.ignored_lines.contains(&line_number)
    }
}

/// Context provided to rules for the line being linted.
#[derive(Debug, Clone)]
pub struct LineContext<'a> {
    /// Line number (1-indexed).
    pub number: usize,
    /// Raw line text.
    pub raw: &'a str,
    /// Line text with any trailing comment removed.
    pub code: &'a str,
    /// Quoted string literals on the raw line.
    pub string_ranges: Vec<StringRange>,
}

impl<'a> LineContext<'a> {
    /// Classifies a raw line: finds its strings, then strips its trailing comment.
    #[must_use]
    pub fn new(number: usize, raw: &'a str) -> Self {
        let string_ranges = regions::string_ranges(raw);
        Self::with_string_ranges(number, raw, string_ranges)
    }

    /// Builds a line context from already known string ranges.
    #[must_use]
    pub fn with_string_ranges(number: usize, raw: &'a str, string_ranges: Vec<StringRange>) -> Self {
        let code = regions::strip_trailing_comments(raw, &string_ranges);
        Self {
            number,
            raw,
            code,
            string_ranges,
        }
    }

    /// Whether `start..end` lies entirely inside a string literal.
    #[must_use]
    pub fn inside_string(&self, start: usize, end: usize) -> bool {
        regions::inside_string(start, end, &self.string_ranges)
    }
}

/// Components whose config is explicitly included anywhere in `content`.
#[must_use]
pub fn declared_components(content: &str) -> BTreeSet<String> {
    COMPONENT_INCLUDE
        .captures_iter(content)
        .filter_map(|caps| caps.name("name"))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Detects whether a file is part of a component's own source tree.
///
/// Matches both template-library layouts (`.../core/components/<name>/...`)
/// and component repositories (`.../ncm-<name>/...`).
#[must_use]
pub fn detect_component_source(path: &Path) -> Option<String> {
    let path = path.to_string_lossy();
    COMPONENT_SOURCE_FILE
        .captures(&path)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str().to_string())
}

/// First line that is neither blank, ignored, nor a comment.
fn first_code_line<'c>(content: &'c str, ignored: &IgnoredLines) -> Option<&'c str> {
    content
        .lines()
        .enumerate()
        .find(|(i, text)| {
            !text.is_empty() && !ignored.contains(&(i + 1)) && !regions::is_comment_line(text)
        })
        .map(|(_, text)| text)
}
