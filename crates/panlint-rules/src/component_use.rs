//! Rule to require a component's config to be included before its paths are used.
//!
//! # Rationale
//!
//! Setting `/software/components/<name>/...` without including
//! `components/<name>/config` leaves the component without its schema and
//! defaults, which surfaces much later as a confusing compile error.
//!
//! A component counts as included when the file includes its config
//! anywhere, when it was named on the command line or in configuration, or
//! when the file lives in that component's own source tree.

use panlint_core::utils::literal_regex;
use panlint_core::{FileContext, LineContext, Message, Problem, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Rule name for component-use.
pub const NAME: &str = "component-use";

static COMPONENT_PATH: LazyLock<Regex> =
    LazyLock::new(|| literal_regex(r"/software/components/(?P<name>\w+)/"));

/// LC002.
pub static COMPONENT_NOT_INCLUDED: Message = Message::new(
    "LC002",
    Severity::Error,
    "Component {} in use, but component config has not been included",
);

/// Requires components to be included before use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentUse;

impl ComponentUse {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ComponentUse {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires component config to be included before component paths are used"
    }

    fn messages(&self) -> Vec<&'static Message> {
        vec![&COMPONENT_NOT_INCLUDED]
    }

    fn check(&self, file: &FileContext, line: &LineContext) -> Vec<Problem> {
        COMPONENT_PATH
            .captures_iter(line.code)
            .filter_map(|caps| caps.name("name"))
            .filter(|name| !file.is_component_included(name.as_str()))
            .map(|name| {
                trace!(start = name.start(), end = name.end(), "component use");
                Problem::new(name.start(), name.end(), &COMPONENT_NOT_INCLUDED)
                    .with_detail(name.as_str())
            })
            .collect()
    }
}
