//! DocsBot integration for suggested fixes.
//!
//! The client forwards a query together with the validator's issue list to a
//! DocsBot chat endpoint and returns the bot's answer verbatim. It has no
//! decision logic of its own and the rule engine never depends on it.
//!
//! # Retry Behavior
//!
//! The client automatically retries on transient errors:
//! - Connection timeouts
//! - Rate limiting (429)
//! - Server errors (5xx)
//!
//! Retry delays use exponential backoff with configurable parameters.
//!
//! # Example
//!
//! ```
//! use sql_convention_validator::{
//!     config::RetryConfig,
//!     suggest::{DocsBotCredentials, SuggestClient}
//! };
//!
//! let credentials = DocsBotCredentials::new(
//!     Some("team".into()),
//!     Some("bot".into()),
//!     Some("key".into())
//! )
//! .unwrap();
//!
//! let client = SuggestClient::new(credentials, "https://api.docsbot.ai", RetryConfig::default());
//! assert_eq!(client.chat_url(), "https://api.docsbot.ai/teams/team/bots/bot/chat");
//! ```

use std::{fmt, time::Duration};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    config::RetryConfig,
    error::{AppError, AppResult, MISSING_CREDENTIALS, config_error, http_error, suggest_api_error}
};

/// Answer used when DocsBot replies without one.
pub const NO_ANSWER: &str = "No answer returned from DocsBot.";

/// Validated DocsBot credentials.
#[derive(Clone)]
pub struct DocsBotCredentials {
    team_id: String,
    bot_id:  String,
    api_key: String
}

impl fmt::Debug for DocsBotCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocsBotCredentials")
            .field("team_id", &self.team_id)
            .field("bot_id", &self.bot_id)
            .field("api_key", &"***")
            .finish()
    }
}

impl DocsBotCredentials {
    /// Build credentials, failing if any value is missing or blank
    pub fn new(
        team_id: Option<String>,
        bot_id: Option<String>,
        api_key: Option<String>
    ) -> AppResult<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (present(team_id), present(bot_id), present(api_key)) {
            (Some(team_id), Some(bot_id), Some(api_key)) => Ok(Self {
                team_id,
                bot_id,
                api_key
            }),
            _ => Err(config_error(MISSING_CREDENTIALS))
        }
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }
}

/// HTTP client for the DocsBot chat API with retry support.
pub struct SuggestClient {
    credentials:  DocsBotCredentials,
    base_url:     String,
    client:       reqwest::Client,
    retry_config: RetryConfig
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    question: &'a str
}

#[derive(Deserialize)]
struct ChatResponse {
    answer: Option<String>
}

/// Prompt asking DocsBot to rewrite the query so the issues go away.
pub fn build_prompt(query: &str, issues: &[String]) -> String {
    format!(
        "You are a SQL assistant. A user submitted the following SQL query:\n\n\
         {query}\n\n\
         It triggered these validation issues:\n\
         {issues}\n\n\
         Please suggest a corrected version of the SQL query, considering all the above \
         issues. Return only the SQL code. No need to start with \"```sql\" or end with \
         \"```\".\n",
        query = query,
        issues = issues.join("\n")
    )
}

impl SuggestClient {
    pub fn new(
        credentials: DocsBotCredentials,
        base_url: impl Into<String>,
        retry_config: RetryConfig
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            credentials,
            base_url: base_url.into(),
            client,
            retry_config
        }
    }

    /// Chat endpoint for the configured team and bot
    pub fn chat_url(&self) -> String {
        format!(
            "{}/teams/{}/bots/{}/chat",
            self.base_url.trim_end_matches('/'),
            self.credentials.team_id,
            self.credentials.bot_id
        )
    }

    /// Ask DocsBot for a corrected query with automatic retry
    pub async fn suggest_fix(&self, query: &str, issues: &[String]) -> AppResult<String> {
        let prompt = build_prompt(query, issues);
        self.call_with_retry(&prompt).await
    }

    async fn call_with_retry(&self, prompt: &str) -> AppResult<String> {
        let mut delay = self.retry_config.initial_delay_ms;
        let mut attempt = 0;
        loop {
            let failure = match self.call_docsbot(prompt).await {
                Ok(result) => return Ok(result),
                Err(failure) => failure
            };
            if !failure.retryable || attempt >= self.retry_config.max_retries {
                return Err(failure.error);
            }
            attempt += 1;
            warn!(
                attempt = attempt + 1,
                max_attempts = self.retry_config.max_retries + 1,
                delay_ms = delay,
                error = %failure.error.render_message(),
                "retrying DocsBot request"
            );
            sleep(Duration::from_millis(delay)).await;
            delay = ((delay as f64 * self.retry_config.backoff_factor) as u64)
                .min(self.retry_config.max_delay_ms);
        }
    }

    async fn call_docsbot(&self, prompt: &str) -> Result<String, AttemptFailure> {
        let url = self.chat_url();
        debug!(%url, prompt_len = prompt.len(), "sending DocsBot request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.api_key)
            .json(&ChatRequest {
                question: prompt
            })
            .send()
            .await
            .map_err(AttemptFailure::transport)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AttemptFailure::status(status, &text));
        }
        let result: ChatResponse = response.json().await.map_err(AttemptFailure::transport)?;
        debug!(has_answer = result.answer.is_some(), "DocsBot response received");
        Ok(result.answer.unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}

/// A failed DocsBot attempt and whether repeating it may succeed.
struct AttemptFailure {
    error:     AppError,
    retryable: bool
}

impl AttemptFailure {
    fn transport(err: reqwest::Error) -> Self {
        let retryable = err.is_timeout() || err.is_connect();
        Self {
            error: http_error(err),
            retryable
        }
    }

    fn status(status: StatusCode, body: &str) -> Self {
        Self {
            error:     suggest_api_error(format!("DocsBot API error {}: {}", status, body)),
            retryable: is_retryable_status(status)
        }
    }
}

/// Rate limiting and server-side failures are transient.
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
