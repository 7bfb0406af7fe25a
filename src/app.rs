//! Application logic for the SQL Convention Validator CLI.
//!
//! This module contains the command logic separated from the main entry
//! point to enable testing.

use std::{
    fs::read_to_string,
    io::{self, Read},
    time::Duration
};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    cli::Format,
    config::{Config, RulesConfig},
    error::{AppResult, file_read_error},
    output::{OutputFormat, OutputOptions, format_report, format_suggestion},
    rules::{RuleRunner, ValidationReport},
    suggest::{DocsBotCredentials, SuggestClient}
};

/// Parameters for the validate command
#[derive(Debug, Clone)]
pub struct ValidateParams {
    pub query_path:    String,
    pub output_format: Format,
    pub disabled:      Vec<String>,
    pub no_color:      bool
}

/// Parameters for the suggest command
#[derive(Debug, Clone)]
pub struct SuggestParams {
    pub query_path:    String,
    pub team_id:       Option<String>,
    pub bot_id:        Option<String>,
    pub api_key:       Option<String>,
    pub base_url:      Option<String>,
    pub output_format: Format,
    pub no_color:      bool
}

/// Result of a command: what to print and how to exit
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub output:    String
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Create output options from parameters
pub fn create_output_options(format: Format, no_color: bool) -> OutputOptions {
    OutputOptions {
        format:  convert_format(format),
        colored: !no_color
    }
}

/// Exit code: `0` when clean, `1` when any issue was found
pub fn calculate_exit_code(report: &ValidationReport) -> i32 {
    if report.is_clean() { 0 } else { 1 }
}

/// Read the query from file or stdin
pub fn read_query_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Merge rule IDs disabled on the command line into the configured ones
pub fn merge_disabled(mut rules: RulesConfig, extra: Vec<String>) -> RulesConfig {
    for id in extra {
        if !rules.is_disabled(&id) {
            rules.disabled.push(id);
        }
    }
    rules
}

/// Resolve DocsBot credentials: command line first, then configuration
pub fn resolve_credentials(
    params: &SuggestParams,
    config: &Config
) -> AppResult<DocsBotCredentials> {
    DocsBotCredentials::new(
        params.team_id.clone().or_else(|| config.docsbot.team_id.clone()),
        params.bot_id.clone().or_else(|| config.docsbot.bot_id.clone()),
        params.api_key.clone().or_else(|| config.docsbot.api_key.clone())
    )
}

/// Run the validate command
pub fn run_validate(params: ValidateParams, config: Config) -> AppResult<CommandResult> {
    let query = read_query_input(&params.query_path)?;
    let rules = merge_disabled(config.rules, params.disabled);
    let runner = RuleRunner::with_config(rules);
    let report = runner.analyze(&query);
    info!(path = %params.query_path, issues = report.issues.len(), "query validated");
    let opts = create_output_options(params.output_format, params.no_color);
    Ok(CommandResult {
        exit_code: calculate_exit_code(&report),
        output:    format_report(&report, &opts)
    })
}

/// Run the suggest command
///
/// Validates first; a clean query is reported without contacting DocsBot.
pub async fn run_suggest(params: SuggestParams, config: Config) -> AppResult<CommandResult> {
    let query = read_query_input(&params.query_path)?;
    let runner = RuleRunner::with_config(config.rules.clone());
    let report = runner.analyze(&query);
    let opts = create_output_options(params.output_format, params.no_color);
    if report.is_clean() {
        debug!("no issues found, skipping DocsBot");
        return Ok(CommandResult {
            exit_code: 0,
            output:    format_report(&report, &opts)
        });
    }
    let credentials = resolve_credentials(&params, &config)?;
    debug!(
        team_id = credentials.team_id(),
        bot_id = credentials.bot_id(),
        "DocsBot credentials resolved"
    );
    let base_url = params.base_url.unwrap_or(config.docsbot.base_url);
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Asking DocsBot for a fix...");
    pb.enable_steady_tick(Duration::from_millis(100));
    let client = SuggestClient::new(credentials, base_url, config.retry);
    let suggestion = client.suggest_fix(&query, &report.messages()).await;
    pb.finish_and_clear();
    let suggestion = suggestion?;
    Ok(CommandResult {
        exit_code: calculate_exit_code(&report),
        output:    format_suggestion(&query, &report, &suggestion, &opts)
    })
}
