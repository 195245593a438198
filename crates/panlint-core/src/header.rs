//! The mandatory template declaration header.
//!
//! Every template must start (after comments and blank lines) with a line
//! such as `structure template foo.bar;` or `unique template site/config;`.

use crate::utils::literal_regex;
use regex::Regex;
use std::sync::LazyLock;

static TEMPLATE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    literal_regex(
        r"^\s*(?:(?:declaration|unique|structure|object)\s+)?template (?P<name>(?:[\S-]+/)*[\S-]+);$",
    )
});

/// Build-tool variable substitution such as `${project.artifactId}`.
static BUILD_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"^\$\{\S+\}"));

/// Returns the template name declared by a header line.
#[must_use]
pub fn template_name(text: &str) -> Option<&str> {
    TEMPLATE_HEADER
        .captures(text)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str())
}

/// Whether a line is a valid template declaration header.
#[must_use]
pub fn is_template_header(text: &str) -> bool {
    TEMPLATE_HEADER.is_match(text)
}

/// Whether a line starts with a build-tool substitution token.
#[must_use]
pub fn is_build_template(text: &str) -> bool {
    BUILD_TEMPLATE.is_match(text)
}
