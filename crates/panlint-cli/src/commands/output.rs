//! Shared output formatting for lint results.

use anyhow::Result;
use panlint_core::diagnostics::{char_column, visible_tabs};
use panlint_core::{FileError, LineReport, LintResult, Problem, Severity, SeverityCounts};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use crate::OutputFormat;

const GREEN: &str = "\x1b[32m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Terminal capabilities affecting text output.
#[derive(Debug, Clone, Copy, Default)]
struct Style {
    color: bool,
    unicode: bool,
    vi: bool,
}

impl Style {
    fn detect(vi: bool) -> Self {
        let color = io::stdout().is_terminal();
        Self {
            color,
            unicode: color && utf8_locale(),
            vi,
        }
    }

    fn paint(self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn utf8_locale() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .is_some_and(|v| {
            let v = v.to_ascii_lowercase();
            v.contains("utf-8") || v.contains("utf8")
        })
}

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, table: bool) -> Result<()> {
    print_file_errors(&result.errors);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text(&mut out, result, Style::detect(false), table)?,
        OutputFormat::Vi => write_text(&mut out, result, Style::detect(true), table)?,
        OutputFormat::Compact => write_compact(&mut out, result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &JsonReport::from(result))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_file_errors(errors: &[FileError]) {
    for error in errors {
        let report = miette::miette!(
            code = "panlint::file",
            help = "the file was skipped; the remaining files were still checked",
            "{}: {}",
            error.path.display(),
            error.message
        );
        eprintln!("{report:?}");
    }
}

fn write_text(
    out: &mut impl Write,
    result: &LintResult,
    style: Style,
    table: bool,
) -> io::Result<()> {
    for line in result.lines() {
        write_line(out, &line.report(), style)?;
    }

    if table {
        write_table(out, result)?;
    }

    writeln!(
        out,
        "\n{} problems found in {} lines",
        result.problem_count(),
        result.flagged_lines()
    )
}

fn write_line(out: &mut impl Write, report: &LineReport, style: Style) -> io::Result<()> {
    let messages = report.messages.join(", ");
    writeln!(out)?;
    if style.vi {
        writeln!(out, "{} +{} #{}", report.file.display(), report.line, messages)?;
    } else {
        writeln!(out, "{}:{}: {}", report.file.display(), report.line, messages)?;
    }
    writeln!(
        out,
        "{}",
        style.paint(GREEN, &visible_tabs(&report.text, style.unicode))
    )?;
    writeln!(out, "{}", style.paint(BLUE, &report.marker))
}

fn write_table(out: &mut impl Write, result: &LintResult) -> io::Result<()> {
    let mut rows: Vec<(String, usize)> = result
        .files
        .iter()
        .filter(|f| f.problem_count() > 0)
        .map(|f| (f.path.display().to_string(), f.problem_count()))
        .collect();
    rows.sort();

    const HEADERS: (&str, &str) = ("Filename", "Problems");
    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain([HEADERS.0.len()])
        .max()
        .unwrap_or(0);
    let count_width = HEADERS.1.len();
    let rule = format!("+{}+{}+", "-".repeat(name_width + 2), "-".repeat(count_width + 2));

    writeln!(out, "\nProblem count per file:")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "| {:<name_width$} | {:<count_width$} |", HEADERS.0, HEADERS.1)?;
    writeln!(out, "{rule}")?;
    for (name, count) in &rows {
        writeln!(out, "| {name:<name_width$} | {count:>count_width$} |")?;
    }
    writeln!(out, "{rule}")
}

fn write_compact(out: &mut impl Write, result: &LintResult) -> io::Result<()> {
    for line in result.lines() {
        for problem in &line.problems {
            writeln!(
                out,
                "{}:{}:{}: {} [{}] {}",
                line.file.display(),
                line.number,
                char_column(&line.text, problem.start) + 1,
                problem.severity,
                problem.id(),
                problem.text(),
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files_checked: usize,
    problem_count: usize,
    flagged_lines: usize,
    counts: SeverityCounts,
    worst_severity: Option<Severity>,
    lines: Vec<JsonLine<'a>>,
    errors: &'a [FileError],
}

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    report: LineReport,
    problems: &'a [Problem],
}

impl<'a> From<&'a LintResult> for JsonReport<'a> {
    fn from(result: &'a LintResult) -> Self {
        Self {
            files_checked: result.files_checked(),
            problem_count: result.problem_count(),
            flagged_lines: result.flagged_lines(),
            counts: result.counts(),
            worst_severity: result.worst_severity(),
            lines: result
                .lines()
                .map(|line| JsonLine {
                    report: line.report(),
                    problems: &line.problems,
                })
                .collect(),
            errors: &result.errors,
        }
    }
}
