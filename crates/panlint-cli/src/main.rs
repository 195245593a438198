//! panlint CLI tool.
//!
//! Usage:
//! ```bash
//! panlint check [OPTIONS] [PATHS]...
//! panlint list-rules
//! panlint init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use panlint_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Linter for the pan configuration language
#[derive(Parser)]
#[command(name = "panlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PANLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check(CheckArgs),

    /// List available rules and messages
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Options of the check command. Flags override the configuration file.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files, directories or glob patterns to check
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Display a table of per-file problem counts
    #[arg(long)]
    pub table: bool,

    /// Accept a build-tool variable such as `${project.artifactId}` as the first line
    #[arg(long, alias = "allow_mvn_templates")]
    pub allow_mvn_templates: bool,

    /// Always exit cleanly even if problems are found
    #[arg(long, alias = "always_exit_success")]
    pub always_exit_success: bool,

    /// Do not report problems below this severity
    #[arg(long, value_name = "SEVERITY")]
    pub min_severity: Option<Severity>,

    /// Exit with failure only for problems at or above this severity
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// Treat a component as included in every file (can be specified multiple times)
    #[arg(long = "include-component", value_name = "NAME")]
    pub include_components: Vec<String>,

    /// Require feature templates to include only their own descendants
    #[arg(long)]
    pub feature_includes: bool,

    /// Only run specific rules (comma-separated rule names or message ids)
    #[arg(long)]
    pub rules: Option<String>,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report per flagged line.
    #[default]
    Text,
    /// Like text, with locations in `file +line` form for editors.
    Vi,
    /// One-line-per-problem compact format.
    Compact,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check(args) => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let source = config_resolver::resolve(&cwd, cli.config.as_deref());
            commands::check::run(&args, &source)
        }
        Commands::ListRules => commands::list_rules::run(),
        Commands::Init { force } => commands::init::run(force),
    }
}
