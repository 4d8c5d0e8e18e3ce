//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::analyze::InputReport;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable listing
    #[default]
    Pretty,
    /// Tables of aliases, columns and diagnostics
    Table,
    /// One `column<TAB>table` line per resolved column
    Pairs,
}

/// Color output modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => colored::control::set_override(io::stdout().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Serialize a value as JSON
pub fn format_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Render analysis reports in the requested format
pub fn render_reports(reports: &[InputReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(reports, true),
        OutputFormat::Pretty => render_pretty(reports).context("Failed to render report"),
        OutputFormat::Table => render_tables(reports).context("Failed to render tables"),
        OutputFormat::Pairs => Ok(render_pairs(reports)),
    }
}

fn render_pretty(reports: &[InputReport]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writeln!(out, "{}", report.source.cyan().bold())?;

        if let Some(error) = &report.error {
            writeln!(out, "  {}", error.render())?;
            continue;
        }
        let Some(analysis) = &report.analysis else {
            continue;
        };

        writeln!(out, "  {}", "aliases".bold())?;
        if analysis.aliases.is_empty() {
            writeln!(out, "    {}", "(none)".dimmed())?;
        }
        for (alias, table) in analysis.aliases.iter() {
            writeln!(out, "    {alias} -> {}", table.green())?;
        }

        writeln!(out, "  {}", "columns".bold())?;
        if analysis.columns.is_empty() {
            writeln!(out, "    {}", "(none)".dimmed())?;
        }
        for (column, table) in analysis.columns.iter() {
            writeln!(out, "    {column} -> {}", table.green())?;
        }

        if !analysis.diagnostics.is_empty() {
            writeln!(out, "  {}", "diagnostics".bold())?;
            for diagnostic in &analysis.diagnostics {
                writeln!(out, "    {}", diagnostic.render().replace('\n', "\n    "))?;
            }
        }
    }
    Ok(out.trim_end().to_string())
}

#[derive(Tabled)]
struct BindingRow<'a> {
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Table")]
    table: &'a str,
}

#[derive(Tabled)]
struct DiagnosticRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Location")]
    location: String,
}

fn bindings_table<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let rows: Vec<BindingRow<'a>> = entries
        .map(|(name, table)| BindingRow { name, table })
        .collect();
    Table::new(rows).with(Style::modern()).to_string()
}

fn render_tables(reports: &[InputReport]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for report in reports {
        writeln!(out, "{}", report.source.cyan().bold())?;

        let diagnostics: Vec<_> = match (&report.error, &report.analysis) {
            (Some(error), _) => vec![error.clone()],
            (None, Some(analysis)) => {
                writeln!(out, "Aliases\n{}", bindings_table(analysis.aliases.iter()))?;
                writeln!(out, "Columns\n{}", bindings_table(analysis.columns.iter()))?;
                analysis.diagnostics.clone()
            }
            (None, None) => Vec::new(),
        };

        if !diagnostics.is_empty() {
            let rows: Vec<DiagnosticRow> = diagnostics
                .iter()
                .map(|d| DiagnosticRow {
                    severity: d.severity.to_string(),
                    code: d.code.to_string(),
                    message: d.message.clone(),
                    location: d.location.map(|l| l.to_string()).unwrap_or_default(),
                })
                .collect();
            writeln!(
                out,
                "Diagnostics\n{}",
                Table::new(rows).with(Style::modern())
            )?;
        }
    }
    Ok(out.trim_end().to_string())
}

fn render_pairs(reports: &[InputReport]) -> String {
    let prefix = reports.len() > 1;
    let mut lines = Vec::new();
    for report in reports {
        let Some(analysis) = &report.analysis else {
            continue;
        };
        for binding in analysis.columns.bindings() {
            if prefix {
                lines.push(format!("{}\t{}\t{}", report.source, binding.column, binding.table));
            } else {
                lines.push(format!("{}\t{}", binding.column, binding.table));
            }
        }
    }
    lines.join("\n")
}
