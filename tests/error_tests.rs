use std::io;

use sql_convention_validator::{
    error::{MISSING_CREDENTIALS, config_error, file_read_error, suggest_api_error},
    suggest::DocsBotCredentials
};

#[test]
fn test_file_read_error() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/query.sql", io_error);
    assert_eq!(
        error.render_message(),
        "Failed to read file '/path/to/query.sql': file not found"
    );
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid configuration value");
    assert_eq!(error.render_message(), "Invalid configuration value");
}

#[test]
fn test_suggest_api_error() {
    let error = suggest_api_error("DocsBot API error 500: boom");
    assert_eq!(error.render_message(), "DocsBot API error 500: boom");
}

#[test]
fn test_missing_credentials_message() {
    let error = DocsBotCredentials::new(Some("team".into()), None, Some("key".into()))
        .expect_err("bot id is missing");
    assert_eq!(error.render_message(), MISSING_CREDENTIALS);
    assert_eq!(
        MISSING_CREDENTIALS,
        "DocsBot API key, team ID, or bot ID not found in environment."
    );
}
