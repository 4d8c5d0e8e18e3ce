//! Codes command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use serde::Serialize;
use sqlscope_diagnostics::ErrorCode;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One registered diagnostic or error code
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CodeEntry {
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Category")]
    pub category: &'static str,
    #[tabled(rename = "Description")]
    pub description: &'static str,
    #[tabled(rename = "Help", display_with = "display_help")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

fn display_help(help: &Option<&'static str>) -> String {
    help.unwrap_or_default().to_string()
}

fn category(code: ErrorCode) -> &'static str {
    if code.is_parse_error() {
        "parse"
    } else if code.is_precondition_error() {
        "precondition"
    } else if code.is_analysis_diagnostic() {
        "analysis"
    } else {
        "other"
    }
}

/// All registered codes in numeric order
pub fn entries() -> Vec<CodeEntry> {
    ErrorCode::all()
        .map(|(code, info)| CodeEntry {
            code: code.to_string(),
            category: category(code),
            description: info.description,
            help: info.help,
        })
        .collect()
}

/// Print the code table
pub fn codes(format: OutputFormat, output_file: Option<&Path>) -> Result<()> {
    let entries = entries();
    let content = match format {
        OutputFormat::Json => output::format_json(&entries, true)?,
        OutputFormat::Pairs => entries
            .iter()
            .map(|e| format!("{}\t{}", e.code, e.description))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Pretty | OutputFormat::Table => {
            Table::new(&entries).with(Style::modern()).to_string()
        }
    };
    output::write_output(&content, output_file)
}
