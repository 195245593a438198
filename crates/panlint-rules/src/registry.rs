//! The statically declared list of built-in rules.

use crate::{ComponentUse, FeatureIncludes, LinePatterns, OperatorSpacing, PathPatterns};
use panlint_core::{CatalogError, LintOptions, Message, RuleBox};

/// Returns the rules enabled by the given options, in execution order.
///
/// Includes:
/// - `component-use` (LC002)
/// - `line-patterns` (LP001-LP012)
/// - `path-patterns` (PP001)
/// - `operator-spacing` (LC003-LC007)
/// - `feature-includes` (LC008), only when `feature_includes` is set
///
/// # Errors
///
/// Returns an error if a built-in catalog fails validation.
pub fn default_rules(options: &LintOptions) -> Result<Vec<RuleBox>, CatalogError> {
    let mut rules: Vec<RuleBox> = vec![
        Box::new(ComponentUse::new()),
        Box::new(LinePatterns::new()?),
        Box::new(PathPatterns::new()?),
        Box::new(OperatorSpacing::new()),
    ];
    if options.feature_includes {
        rules.push(Box::new(FeatureIncludes::new()));
    }
    Ok(rules)
}

/// Returns every available rule.
///
/// # Errors
///
/// Returns an error if a built-in catalog fails validation.
pub fn all_rules() -> Result<Vec<RuleBox>, CatalogError> {
    let options = LintOptions {
        feature_includes: true,
        ..LintOptions::default()
    };
    default_rules(&options)
}

/// Every message any built-in rule can emit, excluding the engine's own.
///
/// # Errors
///
/// Returns an error if a built-in catalog fails validation.
pub fn all_messages() -> Result<Vec<&'static Message>, CatalogError> {
    Ok(all_rules()?.iter().flat_map(|rule| rule.messages()).collect())
}
