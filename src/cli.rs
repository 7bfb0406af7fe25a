use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Convention Validator - Check SQL against house conventions
#[derive(Parser, Debug)]
#[command(name = "sql-convention-validator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a SQL file against the convention rules
    Validate {
        /// Path to SQL file (use - for stdin)
        #[arg(short, long)]
        query: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Rule IDs to disable (repeatable)
        #[arg(short, long = "disable", value_name = "RULE_ID")]
        disable: Vec<String>,

        /// Enable debug logging on stderr
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },
    /// Validate a SQL file and ask DocsBot for a corrected version
    Suggest {
        /// Path to SQL file (use - for stdin)
        #[arg(short, long)]
        query: PathBuf,

        /// DocsBot team ID
        #[arg(long, env = "DOCSBOT_TEAM_ID")]
        team_id: Option<String>,

        /// DocsBot bot ID
        #[arg(long, env = "DOCSBOT_BOT_ID")]
        bot_id: Option<String>,

        /// DocsBot API key
        #[arg(long, env = "DOCSBOT_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// DocsBot API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Enable debug logging on stderr
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Self::Validate {
                verbose, ..
            }
            | Self::Suggest {
                verbose, ..
            } => *verbose
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
