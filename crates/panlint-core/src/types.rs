//! Core types for lint problems and results.

use crate::diagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint problems, ordered by seriousness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stylistic advice.
    Advice,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Advice => "advice",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "advice" => Ok(Self::Advice),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown severity `{other}`. Valid values: advice, warning, error"
            )),
        }
    }
}

/// An immutable catalog entry describing one kind of problem.
///
/// Identifiers are two uppercase letters followed by three digits; the
/// prefix names the catalog (`LP` line patterns, `PP` path patterns,
/// `LC` checker-generated messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Message {
    /// Unique identifier (e.g., "LP003").
    pub id: &'static str,
    /// Default severity.
    pub severity: Severity,
    /// Human-readable text. A `{}` placeholder is filled with the problem detail.
    pub text: &'static str,
}

impl Message {
    /// Creates a new catalog message.
    #[must_use]
    pub const fn new(id: &'static str, severity: Severity, text: &'static str) -> Self {
        Self { id, severity, text }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.text)
    }
}

/// A problem found on a single line: a half-open byte range plus a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Offset of the first character of the problem.
    pub start: usize,
    /// Offset just past the last character of the problem.
    pub end: usize,
    /// Catalog entry describing the problem.
    pub message: &'static Message,
    /// Effective severity (the message default unless overridden by configuration).
    pub severity: Severity,
    /// Value substituted into the message placeholder, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Creates a new problem carrying the message's default severity.
    #[must_use]
    pub fn new(start: usize, end: usize, message: &'static Message) -> Self {
        Self {
            start,
            end,
            message,
            severity: message.severity,
            detail: None,
        }
    }

    /// Attaches the detail used to fill the message placeholder.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Message identifier.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.message.id
    }

    /// Rendered message text.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.detail {
            Some(detail) => self.message.text.replacen("{}", detail, 1),
            None => self.message.text.to_string(),
        }
    }

    /// Marker line for this problem alone, in byte columns.
    #[must_use]
    pub fn diagnose(&self) -> String {
        diagnostics::diagnose(self.start, self.end)
    }
}

/// A single line of a template together with the problems found on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// File the line belongs to.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub number: usize,
    /// Raw text of the line, without the line terminator.
    pub text: String,
    /// Problems found on this line.
    pub problems: Vec<Problem>,
}

impl Line {
    /// Creates a line with no problems.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, number: usize, text: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            number,
            text: text.into(),
            problems: Vec::new(),
        }
    }

    /// Most serious severity among the problems on this line.
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.problems.iter().map(|p| p.severity).max()
    }

    /// Distinct problem messages in first-seen order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for problem in &self.problems {
            let text = format!("[{}] {}", problem.id(), problem.text());
            if !seen.contains(&text) {
                seen.push(text);
            }
        }
        seen
    }

    /// Builds the structured record handed to report printers.
    #[must_use]
    pub fn report(&self) -> LineReport {
        LineReport {
            file: self.file.clone(),
            line: self.number,
            text: self.text.clone(),
            marker: diagnostics::render_line(&self.text, &self.problems),
            messages: self.messages(),
            severity: self.worst_severity().unwrap_or(Severity::Advice),
        }
    }
}

/// Structured record for one flagged line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    /// File path.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Raw line text.
    pub text: String,
    /// Merged marker line aligned with `text`.
    pub marker: String,
    /// Deduplicated messages.
    pub messages: Vec<String>,
    /// Worst severity on the line.
    pub severity: Severity,
}

/// Problem counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    /// Number of advice-level problems.
    pub advice: usize,
    /// Number of warnings.
    pub warning: usize,
    /// Number of errors.
    pub error: usize,
}

impl SeverityCounts {
    /// Counts one problem of the given severity.
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Advice => self.advice += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
        }
    }

    /// Adds another histogram to this one.
    pub fn merge(&mut self, other: Self) {
        self.advice += other.advice;
        self.warning += other.warning;
        self.error += other.error;
    }

    /// Total number of problems.
    #[must_use]
    pub fn total(&self) -> usize {
        self.advice + self.warning + self.error
    }

    /// Most serious severity with a non-zero count.
    #[must_use]
    pub fn worst(&self) -> Option<Severity> {
        if self.error > 0 {
            Some(Severity::Error)
        } else if self.warning > 0 {
            Some(Severity::Warning)
        } else if self.advice > 0 {
            Some(Severity::Advice)
        } else {
            None
        }
    }
}

/// Lint outcome for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File path.
    pub path: PathBuf,
    /// Lines with at least one reported problem, in file order.
    pub lines: Vec<Line>,
    /// Problem counts per severity.
    pub counts: SeverityCounts,
}

impl FileReport {
    /// Creates an empty report for a file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Records a flagged line.
    pub fn push(&mut self, line: Line) {
        for problem in &line.problems {
            self.counts.add(problem.severity);
        }
        self.lines.push(line);
    }

    /// Number of problems in this file.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.counts.total()
    }
}

/// A file that could not be linted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    /// File path.
    pub path: PathBuf,
    /// Description of the failure.
    pub message: String,
}

/// Result of linting a batch of files.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// Per-file reports, including files without problems.
    pub files: Vec<FileReport>,
    /// Files that could not be read or decoded.
    pub errors: Vec<FileError>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files that were linted.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.files.len()
    }

    /// Total number of problems across all files.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.files.iter().map(FileReport::problem_count).sum()
    }

    /// Total number of flagged lines across all files.
    #[must_use]
    pub fn flagged_lines(&self) -> usize {
        self.files.iter().map(|f| f.lines.len()).sum()
    }

    /// Problem counts per severity across all files.
    #[must_use]
    pub fn counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for file in &self.files {
            counts.merge(file.counts);
        }
        counts
    }

    /// Most serious severity encountered.
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.files.iter().filter_map(|f| f.counts.worst()).max()
    }

    /// Iterates over every flagged line in file order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.files.iter().flat_map(|f| f.lines.iter())
    }

    /// Whether the batch should fail at the given severity threshold.
    #[must_use]
    pub fn fails_at(&self, threshold: Severity) -> bool {
        self.problem_count() > 0 && self.worst_severity().is_some_and(|s| s >= threshold)
    }
}
