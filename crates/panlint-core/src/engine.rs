//! The lint engine: drives every rule over every line of a file.

use crate::catalog::{self, CatalogError};
use crate::config::Config;
use crate::context::{FileContext, LineContext};
use crate::header;
use crate::regions;
use crate::rule::{Rule, RuleBox};
use crate::types::{FileError, FileReport, Line, LintResult, Message, Problem, Severity};

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Reported when the first code line is not a template declaration.
pub static FIRST_LINE: Message = Message::new(
    "LC001",
    Severity::Error,
    "First non-comment line must be the template type and name",
);

/// Errors that can occur while linting.
#[derive(Debug, Error, Diagnostic)]
pub enum LintError {
    /// IO error reading a file.
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(panlint::io))]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// File contents are not valid UTF-8.
    #[error("Failed to decode {path}: contents are not valid UTF-8")]
    #[diagnostic(code(panlint::decode), help("pan templates must be UTF-8 encoded"))]
    Decode {
        /// Path of the file.
        path: PathBuf,
    },

    /// The combined message catalog is invalid.
    #[error("Invalid message catalog: {0}")]
    #[diagnostic(code(panlint::catalog))]
    Catalog(#[from] CatalogError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    min_severity: Option<Severity>,
    allow_build_templates: Option<bool>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the linter.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the minimum severity to report.
    #[must_use]
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    /// Overrides whether `${...}` first lines are accepted.
    #[must_use]
    pub fn allow_build_templates(mut self, allow: bool) -> Self {
        self.allow_build_templates = Some(allow);
        self
    }

    /// Builds the linter, validating the combined message catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if two messages share an id or an id is malformed.
    pub fn build(self) -> Result<Linter, LintError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(severity) = self.min_severity {
            config.lint.min_severity = severity;
        }
        if let Some(allow) = self.allow_build_templates {
            config.lint.allow_build_templates = allow;
        }

        let linter = Linter {
            rules: self.rules,
            config,
        };
        catalog::validate_messages(linter.messages())?;

        Ok(linter)
    }
}

/// The lint engine.
///
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Every message the engine and its rules can emit.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static Message> {
        let mut messages = vec![&FIRST_LINE];
        for rule in &self.rules {
            messages.extend(rule.messages());
        }
        messages
    }

    /// Lints every file, recording unreadable files instead of failing.
    #[must_use]
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintResult {
        let mut result = LintResult::new();

        for path in paths {
            match self.lint_file(path) {
                Ok(report) => result.files.push(report),
                Err(e) => {
                    warn!("{e}");
                    result.errors.push(FileError {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Lint complete: {} problems in {} lines across {} files",
            result.problem_count(),
            result.flagged_lines(),
            result.files_checked()
        );

        result
    }

    /// Reads and lints a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn lint_file(&self, path: &Path) -> Result<FileReport, LintError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::InvalidData {
                LintError::Decode {
                    path: path.to_path_buf(),
                }
            } else {
                LintError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Ok(self.lint_text(path, &text))
    }

    /// Lints the full text of a file.
    #[must_use]
    pub fn lint_text(&self, path: &Path, text: &str) -> FileReport {
        debug!("Linting: {}", path.display());

        let file = FileContext::new(path, text)
            .with_included_components(self.config.lint.included_components.iter().cloned());
        let mut report = FileReport::new(path);
        let mut first_line = true;

        for (index, raw) in text.lines().enumerate() {
            let number = index + 1;

            if raw.is_empty() || file.is_ignored(number) || regions::is_comment_line(raw) {
                trace!(line = number, "ignored");
                continue;
            }

            let mut line = Line::new(path, number, raw);
            self.lint_line(&file, &mut line, first_line);
            first_line = false;

            if !line.problems.is_empty() {
                report.push(line);
            }
        }

        debug!(
            "{}: {} problems in {} lines",
            path.display(),
            report.problem_count(),
            report.lines.len()
        );

        report
    }

    /// Runs all checks against one line.
    ///
    /// The first code line of a file is only checked against the template
    /// declaration grammar. Every other line runs through all rules. The
    /// caller is responsible for clearing `first_line` afterwards, whether
    /// or not the header was valid.
    pub fn lint_line(&self, file: &FileContext, line: &mut Line, first_line: bool) {
        let Line { text, problems, .. } = line;

        if first_line {
            if !self.is_valid_header(text) {
                problems.push(Problem::new(0, text.len(), &FIRST_LINE));
            }
        } else {
            let ctx = LineContext::new(line.number, text);
            for rule in &self.rules {
                if !self.config.is_rule_enabled(rule.name()) {
                    trace!("Skipping disabled rule: {}", rule.name());
                    continue;
                }
                let found = rule.check(file, &ctx);
                problems.extend(self.apply_severity_override(rule.name(), found));
            }
        }

        let min = self.config.lint.min_severity;
        problems.retain(|p| p.severity >= min && !self.config.is_message_ignored(p.id()));
    }

    fn is_valid_header(&self, text: &str) -> bool {
        header::is_template_header(text)
            || (self.config.lint.allow_build_templates && header::is_build_template(text))
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, rule_name: &str, mut problems: Vec<Problem>) -> Vec<Problem> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for p in &mut problems {
                p.severity = severity;
            }
        }
        problems
    }
}
