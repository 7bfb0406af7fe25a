//! Error constructors for the outer layers.
//!
//! The rule engine itself never fails. Errors only come from reading input,
//! loading configuration and talking to the suggestion service.

pub use masterror::{AppError, AppResult};

/// Message used when DocsBot credentials are incomplete.
pub const MISSING_CREDENTIALS: &str =
    "DocsBot API key, team ID, or bot ID not found in environment.";

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create suggestion service error
pub fn suggest_api_error(message: impl Into<String>) -> AppError {
    AppError::service(message.into())
}

/// Create HTTP error
pub fn http_error(err: reqwest::Error) -> AppError {
    let msg = if err.is_timeout() {
        format!("Request timeout: {}", err)
    } else if err.is_connect() {
        format!("Connection failed: {}", err)
    } else if err.is_status() {
        format!("HTTP error {}: {}", err.status().unwrap_or_default(), err)
    } else {
        err.to_string()
    };
    AppError::service(msg)
}
