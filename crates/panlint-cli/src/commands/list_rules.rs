//! List rules command implementation.

use anyhow::{Context, Result};
use panlint_core::{Message, FIRST_LINE};
use panlint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let rules = all_rules().context("Failed to load built-in rules")?;

    println!("Available messages:\n");
    println!("{:<7} {:<9} {:<18} Message", "Id", "Severity", "Rule");
    println!("{}", "-".repeat(100));

    print_message(&FIRST_LINE, "(engine)");
    for rule in &rules {
        for message in rule.messages() {
            print_message(message, rule.name());
        }
    }

    println!("\nRules:");
    for rule in &rules {
        println!("  {:<18} {}", rule.name(), rule.description());
    }
    println!("\nfeature-includes runs only with --feature-includes or `feature_includes = true`.");

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  panlint check --rules operator-spacing,path-patterns templates/");
    println!("  panlint check --rules LP001,LC002 templates/");

    Ok(())
}

fn print_message(message: &Message, rule: &str) {
    println!(
        "{:<7} {:<9} {:<18} {}",
        message.id,
        message.severity,
        rule,
        message.text.replace("{}", "<name>")
    );
}
