//! Configuration types for panlint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for panlint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Engine options.
    #[serde(default)]
    pub lint: LintOptions,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Whether problems with this message id are suppressed.
    #[must_use]
    pub fn is_message_ignored(&self, id: &str) -> bool {
        self.lint.ignore.iter().any(|i| i == id)
    }
}

/// Options consumed by the lint engine and the exit-code decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintOptions {
    /// Problems below this severity are not reported.
    #[serde(default = "default_severity")]
    pub min_severity: Severity,

    /// Reported problems at or above this severity fail the run.
    #[serde(default = "default_severity")]
    pub fail_on: Severity,

    /// Accept a build-tool substitution token (`${...}`) as the first line.
    #[serde(default)]
    pub allow_build_templates: bool,

    /// Exit successfully even when problems are found.
    #[serde(default)]
    pub always_exit_success: bool,

    /// Components treated as included in every file.
    #[serde(default)]
    pub included_components: Vec<String>,

    /// Require feature templates to include only their own descendants.
    #[serde(default)]
    pub feature_includes: bool,

    /// Message ids to suppress entirely.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            min_severity: default_severity(),
            fail_on: default_severity(),
            allow_build_templates: false,
            always_exit_success: false,
            included_components: Vec::new(),
            feature_includes: false,
            ignore: Vec::new(),
        }
    }
}

fn default_severity() -> Severity {
    Severity::Advice
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for every problem of this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
