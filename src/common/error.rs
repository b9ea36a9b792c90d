//! Error types for the story harness
//!
//! Authentication errors abort a run before any step executes. Every other
//! variant raised inside a step is recorded as that step's failure.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the story harness
#[derive(Error, Debug)]
pub enum Error {
    // === Authentication Errors ===
    #[error("Authentication failed: {0}")]
    Authentication(String),

    // === Transport Errors ===
    #[error("HTTP {method} {url} failed: {source}")]
    Http {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // === Scenario Errors ===
    #[error("Step '{0}' needs a story id, but no earlier step recorded one")]
    MissingStoryId(String),

    #[error("Test assertion failed: {0}")]
    TestAssertion(String),

    #[error("Failed to decode response body as JSON: {message}. Response: {body}")]
    Decoding { message: String, body: String },

    #[error("{failed} of {total} steps failed")]
    ScenarioFailed { failed: usize, total: usize },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an HTTP transport error
    pub fn http(method: &reqwest::Method, url: &str, source: reqwest::Error) -> Self {
        Self::Http {
            method: method.to_string(),
            url: url.to_string(),
            source,
        }
    }

    /// Create a decoding error for a response body
    pub fn decoding(message: impl ToString, body: &str) -> Self {
        Self::Decoding {
            message: message.to_string(),
            body: body.to_string(),
        }
    }
}
