//! Regex checks run against the profile path at the start of a line.
//!
//! A profile path is the quoted string on the left of an assignment
//! (`'/system/hostname' = ...;`) or after `prefix`. Only the text between
//! the quotes is checked, so these patterns are not subject to the usual
//! inside-a-string suppression.

use panlint_core::utils::literal_regex;
use panlint_core::{
    CatalogError, FileContext, LineContext, Message, PatternCatalog, PatternEntry, Problem, Rule,
    Severity, PATH_PREFIX,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Rule name for path-patterns.
pub const NAME: &str = "path-patterns";

/// A leading quoted profile path, optionally after `prefix`.
static PROFILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r#"^\s*(?:prefix)?\s*(?P<path>'\S+'|"\S+")"#));

/// PP001.
pub static TRAILING_SLASH: Message = Message::new(
    "PP001",
    Severity::Warning,
    "Unnecessary trailing slash at end of profile path",
);

/// The path catalog.
pub const ENTRIES: &[PatternEntry] = &[PatternEntry::new(&TRAILING_SLASH, r".(?P<error>/+)$")];

/// Runs the path catalog against a line's leading profile path.
#[derive(Debug, Clone)]
pub struct PathPatterns {
    catalog: PatternCatalog,
}

impl PathPatterns {
    /// Compiles the path catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid.
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: PatternCatalog::compile(PATH_PREFIX, ENTRIES)?,
        })
    }
}

impl Rule for PathPatterns {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Checks on the profile path being assigned to"
    }

    fn messages(&self) -> Vec<&'static Message> {
        self.catalog.messages().collect()
    }

    fn check(&self, _file: &FileContext, line: &LineContext) -> Vec<Problem> {
        let Some(path) = PROFILE_PATH.captures(line.code).and_then(|c| c.name("path")) else {
            return Vec::new();
        };
        trace!(start = path.start(), end = path.end(), "profile path");

        // Quotes are single bytes, so the inner text starts one byte in.
        let inner = &line.code[path.start() + 1..path.end() - 1];
        self.catalog.check(inner, path.start() + 1, &[])
    }
}
