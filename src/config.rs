//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.env` in current directory
//! 4. `.sql-validator.toml` in current directory
//! 5. `~/.config/sql-validator/config.toml`
//! 6. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [rules]
//! disabled = ["LIT001"]
//!
//! [docsbot]
//! team_id = "..."
//! bot_id = "..."
//! api_key = "..."              # or use DOCSBOT_API_KEY env var
//! base_url = "https://api.docsbot.ai"
//!
//! [retry]
//! max_retries = 3
//! initial_delay_ms = 1000
//! max_delay_ms = 30000
//! backoff_factor = 2.0
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `DOCSBOT_TEAM_ID` | DocsBot team identifier |
//! | `DOCSBOT_BOT_ID` | DocsBot bot identifier |
//! | `DOCSBOT_API_KEY` | DocsBot API key |
//! | `DOCSBOT_BASE_URL` | DocsBot API base URL |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppResult, config_error};

/// Default DocsBot API endpoint
pub const DEFAULT_DOCSBOT_URL: &str = "https://api.docsbot.ai";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules:   RulesConfig,
    #[serde(default)]
    pub docsbot: DocsBotConfig,
    #[serde(default)]
    pub retry:   RetryConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>
}

impl RulesConfig {
    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled.iter().any(|d| d.eq_ignore_ascii_case(rule_id))
    }
}

/// DocsBot suggestion service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DocsBotConfig {
    pub team_id:  Option<String>,
    pub bot_id:   Option<String>,
    pub api_key:  Option<String>,
    #[serde(default = "default_docsbot_url")]
    pub base_url: String
}

fn default_docsbot_url() -> String {
    String::from(DEFAULT_DOCSBOT_URL)
}

impl Default for DocsBotConfig {
    fn default() -> Self {
        Self {
            team_id:  None,
            bot_id:   None,
            api_key:  None,
            base_url: default_docsbot_url()
        }
    }
}

/// Retry configuration for suggestion requests
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub max_retries:      u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms:     u64,
    pub backoff_factor:   f64
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries:      3,
            initial_delay_ms: 1000,
            max_delay_ms:     30000,
            backoff_factor:   2.0
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Load configuration from files and environment
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-validator")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }
        let local_config = PathBuf::from(".sql-validator.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded environment file");
        }
        config.apply_env();
        Ok(config)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&content)
    }

    /// Override DocsBot settings with `DOCSBOT_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(team_id) = env::var("DOCSBOT_TEAM_ID") {
            self.docsbot.team_id = Some(team_id);
        }
        if let Ok(bot_id) = env::var("DOCSBOT_BOT_ID") {
            self.docsbot.bot_id = Some(bot_id);
        }
        if let Ok(api_key) = env::var("DOCSBOT_API_KEY") {
            self.docsbot.api_key = Some(api_key);
        }
        if let Ok(url) = env::var("DOCSBOT_BASE_URL") {
            self.docsbot.base_url = url;
        }
    }
}
