//! Message catalogs and regular-expression pattern catalogs.
//!
//! A pattern catalog is an ordered list of `(message, regex)` entries. Every
//! regex exposes a named group `error` marking the offending span; a match
//! whose `error` group is absent or empty produces no problem.

use crate::regions::{inside_string, StringRange};
use crate::types::{Message, Problem};
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;
use tracing::trace;

/// Name of the capture group marking the offending span.
pub const ERROR_GROUP: &str = "error";

/// Id prefix of the line pattern catalog.
pub const LINE_PREFIX: &str = "LP";
/// Id prefix of the path pattern catalog.
pub const PATH_PREFIX: &str = "PP";
/// Id prefix of messages generated by checker code rather than a catalog.
pub const CHECKER_PREFIX: &str = "LC";

/// Errors detected while validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Identifier does not follow the two-letter, three-digit convention.
    #[error("invalid message id `{0}`: expected two uppercase letters and three digits")]
    InvalidId(String),

    /// Identifier used by more than one message.
    #[error("duplicate message id `{0}`")]
    DuplicateId(String),

    /// Pattern failed to compile.
    #[error("pattern for {id} does not compile: {source}")]
    Pattern {
        /// Identifier of the message owning the pattern.
        id: String,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// Identifier does not carry the prefix of the catalog it belongs to.
    #[error("message id `{id}` does not belong to the {expected} catalog")]
    WrongPrefix {
        /// Offending identifier.
        id: String,
        /// Prefix every id of the catalog must carry.
        expected: String,
    },

    /// Pattern has no `error` capture group.
    #[error("pattern for {0} has no `error` capture group")]
    MissingErrorGroup(String),
}

/// Whether an identifier follows the `XX000` convention.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 5
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..].iter().all(u8::is_ascii_digit)
}

/// Checks that every message id is well formed and unique.
///
/// # Errors
///
/// Returns the first malformed or duplicated identifier.
pub fn validate_messages<'m, I>(messages: I) -> Result<(), CatalogError>
where
    I: IntoIterator<Item = &'m Message>,
{
    let mut seen = HashSet::new();
    for message in messages {
        if !is_valid_id(message.id) {
            return Err(CatalogError::InvalidId(message.id.to_string()));
        }
        if !seen.insert(message.id) {
            return Err(CatalogError::DuplicateId(message.id.to_string()));
        }
    }
    Ok(())
}

/// Checks that every message id carries `prefix`.
///
/// # Errors
///
/// Returns the first identifier with another prefix.
pub fn validate_prefix<'m, I>(prefix: &str, messages: I) -> Result<(), CatalogError>
where
    I: IntoIterator<Item = &'m Message>,
{
    match messages.into_iter().find(|m| !m.id.starts_with(prefix)) {
        Some(message) => Err(CatalogError::WrongPrefix {
            id: message.id.to_string(),
            expected: prefix.to_string(),
        }),
        None => Ok(()),
    }
}

/// Static description of one catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct PatternEntry {
    /// Message emitted on a match.
    pub message: &'static Message,
    /// Regex source; must contain an `error` group.
    pub pattern: &'static str,
}

impl PatternEntry {
    /// Creates a new entry.
    #[must_use]
    pub const fn new(message: &'static Message, pattern: &'static str) -> Self {
        Self { message, pattern }
    }
}

/// A compiled pattern catalog.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    entries: Vec<(&'static Message, Regex)>,
}

impl PatternCatalog {
    /// Compiles and validates a list of entries.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is malformed, duplicated or lacks `prefix`,
    /// a pattern does not compile, or a pattern lacks the `error` group.
    pub fn compile(prefix: &str, entries: &[PatternEntry]) -> Result<Self, CatalogError> {
        validate_messages(entries.iter().map(|e| e.message))?;
        validate_prefix(prefix, entries.iter().map(|e| e.message))?;

        let mut compiled = Vec::with_capacity(entries.len());
        for entry in entries {
            let regex = Regex::new(entry.pattern).map_err(|source| CatalogError::Pattern {
                id: entry.message.id.to_string(),
                source,
            })?;
            if !regex.capture_names().any(|n| n == Some(ERROR_GROUP)) {
                return Err(CatalogError::MissingErrorGroup(entry.message.id.to_string()));
            }
            compiled.push((entry.message, regex));
        }

        Ok(Self { entries: compiled })
    }

    /// Messages in catalog order.
    pub fn messages(&self) -> impl Iterator<Item = &'static Message> + '_ {
        self.entries.iter().map(|(m, _)| *m)
    }

    /// Runs every entry against `text`.
    ///
    /// Offsets of the returned problems are shifted by `offset`, so a
    /// catalog can run against a substring of a line. Matches lying
    /// entirely inside one of `string_ranges` (in line offsets) are dropped.
    #[must_use]
    pub fn check(&self, text: &str, offset: usize, string_ranges: &[StringRange]) -> Vec<Problem> {
        let mut problems = Vec::new();

        for (message, regex) in &self.entries {
            for caps in regex.captures_iter(text) {
                let Some(error) = caps.name(ERROR_GROUP) else {
                    continue;
                };
                if error.is_empty() {
                    continue;
                }

                let (start, end) = (error.start() + offset, error.end() + offset);
                if inside_string(start, end, string_ranges) {
                    continue;
                }
                trace!(id = message.id, start, end, "pattern match");
                problems.push(Problem::new(start, end, message));
            }
        }

        problems
    }
}
