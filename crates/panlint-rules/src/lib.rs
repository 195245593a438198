//! # panlint-rules
//!
//! Built-in lint rules for panlint.
//!
//! ## Available Rules
//!
//! | Ids | Name | Description |
//! |-----|------|-------------|
//! | LC002 | `component-use` | Component paths used without including the component config |
//! | LP001-LP012 | `line-patterns` | Whitespace, naming and deprecated-syntax patterns |
//! | PP001 | `path-patterns` | Problems inside the profile path being assigned |
//! | LC003-LC007 | `operator-spacing` | Whitespace around operators, signs and index arithmetic |
//! | LC008 | `feature-includes` | Feature templates including foreign features (opt-in) |
//!
//! LC001, the template declaration check, belongs to the engine itself.
//!
//! ## Usage
//!
//! ```ignore
//! use panlint_core::{Config, Linter};
//! use panlint_rules::default_rules;
//!
//! let config = Config::default();
//! let mut builder = Linter::builder();
//! for rule in default_rules(&config.lint)? {
//!     builder = builder.rule_box(rule);
//! }
//! let linter = builder.config(config).build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod component_use;
pub mod feature_includes;
pub mod line_patterns;
pub mod operator_spacing;
pub mod path_patterns;
mod registry;

pub use component_use::ComponentUse;
pub use feature_includes::FeatureIncludes;
pub use line_patterns::LinePatterns;
pub use operator_spacing::OperatorSpacing;
pub use path_patterns::PathPatterns;
pub use registry::{all_messages, all_rules, default_rules};

/// Re-export core types for convenience.
pub use panlint_core::{Message, Problem, Rule, Severity};
