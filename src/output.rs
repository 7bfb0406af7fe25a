use colored::Colorize;
use serde::Serialize;

use crate::rules::{Issue, ValidationReport};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Suggestion result for serialization
#[derive(Debug, Serialize)]
pub struct SuggestionResult<'a> {
    pub query:      &'a str,
    pub issues:     Vec<String>,
    pub suggestion: &'a str
}

/// Format a validation report.
///
/// JSON and YAML render the plain list of issue strings.
pub fn format_report(report: &ValidationReport, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report.messages()).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&report.messages()).unwrap_or_default(),
        OutputFormat::Text => format_text_report(report, opts)
    }
}

/// Format a DocsBot suggestion together with the issues it addresses
pub fn format_suggestion(
    query: &str,
    report: &ValidationReport,
    suggestion: &str,
    opts: &OutputOptions
) -> String {
    let result = SuggestionResult {
        query,
        issues: report.messages(),
        suggestion
    };
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&result).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = String::new();
            if opts.colored {
                output.push_str(&"=== Suggested SQL ===\n\n".bold().to_string());
            } else {
                output.push_str("=== Suggested SQL ===\n\n");
            }
            output.push_str(suggestion);
            output
        }
    }
}

fn format_issue(issue: &Issue, colored: bool) -> String {
    if !colored {
        return issue.to_string();
    }
    match issue.line {
        Some(line) => format!(
            "{} {}",
            format!("Line {}:", line).yellow().bold(),
            issue.message
        ),
        None => issue.message.red().to_string()
    }
}

fn format_text_report(report: &ValidationReport, opts: &OutputOptions) -> String {
    let mut output = String::new();
    if opts.colored {
        output.push_str(&"=== SQL Convention Check ===\n\n".bold().to_string());
    } else {
        output.push_str("=== SQL Convention Check ===\n\n");
    }
    for issue in &report.issues {
        output.push_str(&format_issue(issue, opts.colored));
        output.push('\n');
    }
    if report.is_clean() {
        let summary = format!("No issues found ({} lines checked)", report.lines_count);
        if opts.colored {
            output.push_str(&summary.green().to_string());
        } else {
            output.push_str(&summary);
        }
    } else {
        output.push('\n');
        output.push_str(&format!(
            "{} issue(s) found in {} lines",
            report.issues.len(),
            report.lines_count
        ));
    }
    output.push('\n');
    output
}
