//! Check command implementation.

use anyhow::{Context, Result};
use panlint_core::{LintOptions, Linter, RuleBox};
use panlint_rules::{all_rules, default_rules};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::CheckArgs;

/// Runs the check command.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<()> {
    if args.paths.is_empty() {
        println!("No files were provided, not doing anything");
        return Ok(());
    }

    let mut config = source.load()?;
    apply_flags(&mut config.lint, args);

    let files = expand_paths(&args.paths)?;
    let rules = select_rules(args.rules.as_deref(), &config.lint)?;

    let mut builder = Linter::builder();
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let fail_on = config.lint.fail_on;
    let always_exit_success = config.lint.always_exit_success;
    let linter = builder
        .config(config)
        .build()
        .context("Failed to build linter")?;

    tracing::info!(
        "Checking {} files with {} rules",
        files.len(),
        linter.rule_count()
    );

    let result = linter.lint_files(&files);

    super::output::print(&result, args.format, args.table)?;

    if !always_exit_success && result.fails_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

/// Command-line flags override values from the configuration file.
fn apply_flags(options: &mut LintOptions, args: &CheckArgs) {
    if let Some(severity) = args.min_severity {
        options.min_severity = severity;
    }
    if let Some(severity) = args.fail_on {
        options.fail_on = severity;
    }
    options.allow_build_templates |= args.allow_mvn_templates;
    options.always_exit_success |= args.always_exit_success;
    options.feature_includes |= args.feature_includes;
    options
        .included_components
        .extend(args.include_components.iter().cloned());
}

/// Expands command-line arguments into the list of files to lint.
///
/// Glob patterns are expanded, directories are walked for `*.pan` files and
/// anything else is taken literally, so a missing file is reported by the
/// linter rather than silently dropped.
fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if is_glob(pattern) {
            let entries =
                glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
            for entry in entries {
                let path = entry.with_context(|| format!("Failed to expand {pattern}"))?;
                push_path(&mut files, path)?;
            }
        } else {
            push_path(&mut files, PathBuf::from(pattern))?;
        }
    }

    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn push_path(files: &mut Vec<PathBuf>, path: PathBuf) -> Result<()> {
    if path.is_dir() {
        files.extend(discover_templates(&path)?);
    } else {
        files.push(path);
    }
    Ok(())
}

fn discover_templates(root: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "pan") {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    tracing::debug!("Found {} templates under {}", files.len(), root.display());
    Ok(files)
}

/// Picks the rules to run.
///
/// Without a filter the rules enabled by the options run. A filter is a
/// comma-separated list of rule names or message ids; naming an id selects
/// the whole rule that owns it.
fn select_rules(filter: Option<&str>, options: &LintOptions) -> Result<Vec<RuleBox>> {
    let Some(filter) = filter else {
        return default_rules(options).context("Failed to load built-in rules");
    };

    let names: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();
    let rules = all_rules().context("Failed to load built-in rules")?;

    for name in &names {
        let known = rules
            .iter()
            .any(|rule| rule_matches(rule, name) || *name == panlint_core::FIRST_LINE.id);
        if !known {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    Ok(rules
        .into_iter()
        .filter(|rule| names.iter().any(|name| rule_matches(rule, name)))
        .collect())
}

fn rule_matches(rule: &RuleBox, name: &str) -> bool {
    rule.name() == name || rule.messages().iter().any(|m| m.id == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn directories_are_walked_for_templates() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("site/features")).unwrap();
        fs::write(tmp.path().join("site/b.pan"), "").unwrap();
        fs::write(tmp.path().join("site/features/a.pan"), "").unwrap();
        fs::write(tmp.path().join("site/notes.txt"), "").unwrap();

        let files = expand_paths(&[tmp.path().join("site").display().to_string()]).unwrap();
        assert_eq!(
            files,
            vec![
                tmp.path().join("site/b.pan"),
                tmp.path().join("site/features/a.pan"),
            ]
        );
    }

    #[test]
    fn glob_patterns_are_expanded() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("one.pan"), "").unwrap();
        fs::write(tmp.path().join("two.pan"), "").unwrap();
        fs::write(tmp.path().join("three.tpl"), "").unwrap();

        let pattern = format!("{}/*.pan", tmp.path().display());
        let files = expand_paths(&[pattern]).unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("one.pan"), tmp.path().join("two.pan")]
        );
    }

    #[test]
    fn literal_paths_are_kept_even_when_missing() {
        let files = expand_paths(&["does/not/exist.pan".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("does/not/exist.pan")]);
    }

    #[test]
    fn unmatched_glob_expands_to_nothing() {
        let tmp = TempDir::new().unwrap();
        let pattern = format!("{}/*.pan", tmp.path().display());
        assert!(expand_paths(&[pattern]).unwrap().is_empty());
    }

    #[test]
    fn default_selection_follows_options() {
        let mut options = LintOptions::default();
        assert_eq!(select_rules(None, &options).unwrap().len(), 4);

        options.feature_includes = true;
        let rules = select_rules(None, &options).unwrap();
        assert!(names(&rules).contains(&"feature-includes"));
    }

    #[test]
    fn filter_by_name_and_message_id() {
        let options = LintOptions::default();

        let rules = select_rules(Some("operator-spacing"), &options).unwrap();
        assert_eq!(names(&rules), vec!["operator-spacing"]);

        let rules = select_rules(Some("PP001, LP004"), &options).unwrap();
        assert_eq!(names(&rules), vec!["line-patterns", "path-patterns"]);

        let rules = select_rules(Some("LC008"), &options).unwrap();
        assert_eq!(names(&rules), vec!["feature-includes"]);

        assert!(select_rules(Some("no-such-rule"), &options)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn flags_override_config() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CheckArgs,
        }

        let wrapper = Wrapper::parse_from([
            "panlint",
            "--min-severity",
            "warning",
            "--fail-on",
            "error",
            "--allow-mvn-templates",
            "--include-component",
            "spma",
            "a.pan",
        ]);

        let mut options = LintOptions {
            included_components: vec!["ntpd".to_string()],
            ..LintOptions::default()
        };
        apply_flags(&mut options, &wrapper.args);

        assert_eq!(options.min_severity, panlint_core::Severity::Warning);
        assert_eq!(options.fail_on, panlint_core::Severity::Error);
        assert!(options.allow_build_templates);
        assert!(!options.always_exit_success);
        assert_eq!(options.included_components, vec!["ntpd", "spma"]);
        assert_eq!(wrapper.args.paths, vec!["a.pan"]);
    }
}
