//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# panlint configuration

[lint]
# Problems below this severity are not reported (advice, warning, error)
min_severity = "advice"

# Reported problems at or above this severity fail the run
fail_on = "advice"

# Accept a build-tool variable such as ${project.artifactId} as the first line
allow_build_templates = false

# Exit cleanly even when problems are found
always_exit_success = false

# Components treated as included in every template
included_components = []

# Feature templates may only include templates below their own directory
feature_includes = false

# Message ids that are never reported
ignore = []

# Rule configurations
# Each rule can be disabled and have the severity of its problems overridden

[rules.operator-spacing]
enabled = true
# severity = "advice"

# [rules.line-patterns]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("panlint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created panlint.toml");
    println!("\nNext steps:");
    println!("  1. Edit panlint.toml to configure rules");
    println!("  2. Run: panlint check templates/");

    Ok(())
}
