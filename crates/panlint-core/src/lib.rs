//! # panlint-core
//!
//! Core framework for linting Pan configuration templates.
//!
//! Pan checks are lexical: every line is classified (string literals,
//! trailing comments, annotation blocks, heredoc bodies) and then handed to
//! a set of per-line rules. This crate provides:
//!
//! - [`Rule`] trait for per-line checks
//! - [`Linter`] for orchestrating lint execution over files
//! - [`PatternCatalog`] for regex-driven checks with an `error` span group
//! - [`Problem`], [`Line`] and [`LintResult`] for representing findings
//! - [`regions`] and [`diagnostics`] helpers shared by rules and printers
//!
//! ## Example
//!
//! ```ignore
//! use panlint_core::{Config, Linter};
//!
//! let linter = Linter::builder()
//!     .config(Config::from_file("panlint.toml".as_ref())?)
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = linter.lint_files(&paths);
//! println!("{} problems found", result.problem_count());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod context;
mod engine;
mod rule;
mod types;

pub mod diagnostics;
pub mod header;
pub mod regions;

/// Utility functions for rule implementations.
pub mod utils;

pub use catalog::{
    is_valid_id, validate_messages, validate_prefix, CatalogError, PatternCatalog, PatternEntry,
    CHECKER_PREFIX, LINE_PREFIX, PATH_PREFIX,
};
pub use config::{Config, ConfigError, LintOptions, RuleConfig};
pub use context::{declared_components, detect_component_source, FileContext, LineContext};
pub use engine::{LintError, Linter, LinterBuilder, FIRST_LINE};
pub use regions::StringRange;
pub use rule::{Rule, RuleBox};
pub use types::{
    FileError, FileReport, Line, LineReport, LintResult, Message, Problem, Severity,
    SeverityCounts,
};
