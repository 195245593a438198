//! The rule trait implemented by every per-line check.

use crate::context::{FileContext, LineContext};
use crate::types::{Message, Problem};

/// A per-line lint check.
///
/// Rules receive the file-wide context (computed once) and one classified
/// line, and return zero or more problems. They never fail: a check that
/// cannot make sense of a line reports nothing for it.
///
/// # Example
///
/// ```ignore
/// use panlint_core::{FileContext, LineContext, Message, Problem, Rule, Severity};
///
/// static NO_TODO: Message = Message::new("LC900", Severity::Advice, "TODO left in code");
///
/// pub struct NoTodo;
///
/// impl Rule for NoTodo {
///     fn name(&self) -> &'static str { "no-todo" }
///     fn messages(&self) -> Vec<&'static Message> { vec![&NO_TODO] }
///
///     fn check(&self, _file: &FileContext, line: &LineContext) -> Vec<Problem> {
///         line.code
///             .find("TODO")
///             .map(|at| vec![Problem::new(at, at + 4, &NO_TODO)])
///             .unwrap_or_default()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "operator-spacing").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Every catalog message this rule can emit.
    fn messages(&self) -> Vec<&'static Message>;

    /// Checks a single line and returns any problems found.
    fn check(&self, file: &FileContext, line: &LineContext) -> Vec<Problem>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use std::path::Path;

    static TEST_MESSAGE: Message = Message::new("LC900", Severity::Advice, "Test problem");

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }

        fn messages(&self) -> Vec<&'static Message> {
            vec![&TEST_MESSAGE]
        }

        fn check(&self, _file: &FileContext, line: &LineContext) -> Vec<Problem> {
            vec![Problem::new(0, line.code.len(), &TEST_MESSAGE)]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.description(), "");

        let file = FileContext::new(Path::new("t.pan"), "");
        let line = LineContext::new(1, "x = 1; # hi");
        let problems = rule.check(&file, &line);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].end, 6);
    }
}
