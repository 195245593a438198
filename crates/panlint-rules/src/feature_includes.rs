//! Rule to keep feature templates self-contained.
//!
//! A template named `features/<area>/...` may only include other feature
//! templates from its own directory or below it. Pulling in a sibling
//! feature couples two features that sites enable independently.
//!
//! This rule is site-specific and only runs when enabled with
//! `feature_includes = true` or `--feature-includes`.

use panlint_core::utils::literal_regex;
use panlint_core::{FileContext, LineContext, Message, Problem, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule name for feature-includes.
pub const NAME: &str = "feature-includes";

const FEATURE_PREFIX: &str = "features/";

static FEATURE_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    literal_regex(r#"^\s*include\s+['"]?(?P<path>features/[\w/.\-]+)"#)
});

/// LC008.
pub static FOREIGN_FEATURE: Message = Message::new(
    "LC008",
    Severity::Error,
    "Feature templates should only include their own descendants",
);

/// Restricts includes in feature templates to their own subtree.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureIncludes;

impl FeatureIncludes {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for FeatureIncludes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Feature templates may only include their own descendants"
    }

    fn messages(&self) -> Vec<&'static Message> {
        vec![&FOREIGN_FEATURE]
    }

    fn check(&self, file: &FileContext, line: &LineContext) -> Vec<Problem> {
        let Some(own_dir) = file.template_name.as_deref().and_then(feature_root) else {
            return Vec::new();
        };

        let Some(path) = FEATURE_INCLUDE.captures(line.code).and_then(|c| c.name("path")) else {
            return Vec::new();
        };

        let descendant = path
            .as_str()
            .strip_prefix(own_dir)
            .is_some_and(|rest| rest.starts_with('/'));
        if descendant {
            Vec::new()
        } else {
            vec![Problem::new(path.start(), path.end(), &FOREIGN_FEATURE)]
        }
    }
}

/// Directory a feature template may include from. A template directly under
/// `features/` is the root of its own subtree.
fn feature_root(name: &str) -> Option<&str> {
    let rest = name.strip_prefix(FEATURE_PREFIX)?;
    if rest.contains('/') {
        name.rsplit_once('/').map(|(dir, _)| dir)
    } else {
        Some(name)
    }
}
