//! # SQL Convention Validator
//!
//! Checks SQL text against a set of house conventions and, optionally, asks
//! DocsBot to rewrite the query so that it passes.
//!
//! # Quick Start
//!
//! ```bash
//! # Validate a file
//! sql-convention-validator validate -q report.sql
//!
//! # Validate stdin, JSON output, without the literal rule
//! cat report.sql | sql-convention-validator validate -q - -f json -d LIT001
//!
//! # Ask DocsBot for a corrected query
//! export DOCSBOT_TEAM_ID=... DOCSBOT_BOT_ID=... DOCSBOT_API_KEY=...
//! sql-convention-validator suggest -q report.sql
//! ```
//!
//! # Rules
//!
//! | ID | Description |
//! |----|-------------|
//! | LOCK001 | `WITH (NOLOCK)` policy and view-versus-base-table guidance |
//! | JOIN001 | `JOIN ... ON a.X = b.Y` with differently named columns |
//! | LIT001 | The same string literal compared against more than once |
//! | HIST001 | Missing `History: <Mon YYYY> - <XX> - <CLIENT>-<YY>-<####>` line |
//! | JOIN002 | The same ON predicate repeated across joins |
//!
//! # Exit Codes
//!
//! - `0` - No issues
//! - `1` - Issues found, or the command failed
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. Set `RUST_LOG` (e.g.
//! `RUST_LOG=sql_convention_validator=debug`) or pass `--verbose`.

use std::process;

use clap::Parser;
use sql_convention_validator::{
    app::{SuggestParams, ValidateParams, run_suggest, run_validate},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tokio::main;
use tracing_subscriber::EnvFilter;

#[main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());
    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e.render_message());
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> AppResult<i32> {
    let config = Config::load()?;
    let result = match cli.command {
        Commands::Validate {
            query,
            output_format,
            disable,
            verbose: _,
            no_color
        } => run_validate(
            ValidateParams {
                query_path: query.display().to_string(),
                output_format,
                disabled: disable,
                no_color
            },
            config
        )?,
        Commands::Suggest {
            query,
            team_id,
            bot_id,
            api_key,
            base_url,
            output_format,
            verbose: _,
            no_color
        } => {
            run_suggest(
                SuggestParams {
                    query_path: query.display().to_string(),
                    team_id,
                    bot_id,
                    api_key,
                    base_url,
                    output_format,
                    no_color
                },
                config
            )
            .await?
        }
    };
    println!("{}", result.output);
    Ok(result.exit_code)
}
