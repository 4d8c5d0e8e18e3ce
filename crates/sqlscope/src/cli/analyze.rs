//! Analyze command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use serde::Serialize;
use sqlscope_diagnostics::{Diagnostic, LogSink, Severity, Tee};
use sqlscope_parser::parse_select;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::{Analysis, Analyzer, AnalyzerOptions, ParseOptions, SqlDialect};

/// Configuration for analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub files: Vec<PathBuf>,
    pub sql: Vec<String>,
    pub dialect: SqlDialect,
    pub max_depth: usize,
    pub projection_subqueries: bool,
    pub strict: bool,
    pub verbose: bool,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

impl AnalyzeConfig {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new(self.dialect)
    }

    fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions::new()
            .with_max_depth(self.max_depth)
            .with_projection_subqueries(self.projection_subqueries)
    }
}

/// Analysis result for one input
#[derive(Debug, Clone, Serialize)]
pub struct InputReport {
    /// File path, `-e #n` or `<stdin>`
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    /// Set when the input failed to parse or is not a single SELECT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Diagnostic>,
}

impl InputReport {
    /// Whether the input could not be analyzed at all
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Whether analysis reported a warning or worse
    pub fn has_warnings(&self) -> bool {
        self.analysis
            .as_ref()
            .is_some_and(|a| a.has_diagnostics_at(Severity::Warning))
    }
}

/// Analyze every configured input and print the reports
///
/// Returns whether the run succeeded: no input failed and, in strict mode,
/// no warning was reported.
pub fn analyze(config: AnalyzeConfig) -> Result<bool> {
    let inputs = collect_inputs(&config)?;
    let parse = config.parse_options();
    let options = config.analyzer_options();

    let reports: Vec<InputReport> = inputs
        .into_iter()
        .map(|(source, sql)| analyze_source(source, &sql, &parse, &options, config.verbose))
        .collect();

    let content = output::render_reports(&reports, config.format)?;
    output::write_output(&content, config.output_file.as_deref())?;

    let failed = reports.iter().filter(|r| r.failed()).count();
    let flagged = reports.iter().filter(|r| r.has_warnings()).count();
    if failed > 0 {
        eprintln!(
            "{}",
            output::format_warning(&format!("{failed} input(s) could not be analyzed"))
        );
    }
    if config.strict && flagged > 0 {
        eprintln!(
            "{}",
            output::format_warning(&format!(
                "Strict mode: {flagged} input(s) reported warnings"
            ))
        );
    }

    Ok(failed == 0 && !(config.strict && flagged > 0))
}

/// Analyze one SQL text
pub fn analyze_source(
    source: String,
    sql: &str,
    parse: &ParseOptions,
    options: &AnalyzerOptions,
    verbose: bool,
) -> InputReport {
    log::info!("Analyzing: {source}");

    let select = match parse_select(sql, parse) {
        Ok(select) => select,
        Err(err) => {
            log::debug!("{source}: {err}");
            return InputReport {
                source,
                analysis: None,
                error: Some(err.to_diagnostic()),
            };
        }
    };

    let analyzer = Analyzer::new(*options);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let resolution = if verbose {
        analyzer.resolve_select(&select, &mut Tee(LogSink, &mut diagnostics))
    } else {
        analyzer.resolve_select(&select, &mut diagnostics)
    };

    InputReport {
        source,
        analysis: Some(Analysis {
            aliases: resolution.aliases,
            columns: resolution.columns,
            diagnostics,
        }),
        error: None,
    }
}

/// Inline statements first, then files, then stdin when neither was given
fn collect_inputs(config: &AnalyzeConfig) -> Result<Vec<(String, String)>> {
    let mut inputs = Vec::new();

    for (i, sql) in config.sql.iter().enumerate() {
        inputs.push((format!("-e #{}", i + 1), sql.clone()));
    }

    for file in &config.files {
        let sql = fs::read_to_string(file)
            .with_context(|| format!("Failed to read file: {}", file.display()))?;
        inputs.push((file.display().to_string(), sql));
    }

    if inputs.is_empty() {
        let sql = io::read_to_string(io::stdin()).context("Failed to read SQL from stdin")?;
        inputs.push(("<stdin>".to_string(), sql));
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlscope_diagnostics::{SQS0051, SQS0102};

    fn report(sql: &str) -> InputReport {
        analyze_source(
            "test".to_string(),
            sql,
            &ParseOptions::default(),
            &AnalyzerOptions::default(),
            false,
        )
    }

    #[test]
    fn test_report_for_failed_input() {
        let report = report("SELECT 1; SELECT 2");
        assert!(report.failed());
        assert!(report.analysis.is_none());
        assert_eq!(report.error.map(|e| e.code), Some(SQS0051));
    }

    #[test]
    fn test_report_with_warning() {
        let report = report("SELECT 1 FROM users u WHERE x.age > 1");
        assert!(!report.failed());
        assert!(report.has_warnings());
        let analysis = report.analysis.unwrap();
        assert_eq!(analysis.diagnostics[0].code, SQS0102);
    }

    #[test]
    fn test_info_is_not_a_warning() {
        let report = report("SELECT 1 FROM users WHERE age > 1");
        assert!(!report.has_warnings());
    }
}
