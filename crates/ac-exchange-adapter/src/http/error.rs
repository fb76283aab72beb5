/*
[INPUT]:  Error sources (validation, credentials, HTTP, API, serialization, config)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the exchange adapter
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Request parameters failed local validation; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Secret could not be decoded into HMAC key material
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A bulk cancel page failed; already cancelled ids are not reported
    #[error("Bulk cancel aborted on page {page}: {source}")]
    BulkCancelAborted {
        page: usize,
        #[source]
        source: Box<ExchangeError>,
    },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExchangeError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ExchangeError::Http(_) | ExchangeError::InvalidResponse(_) => true,
            ExchangeError::Api { status, .. } => *status == 429 || *status >= 500,
            ExchangeError::BulkCancelAborted { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Check if the error was raised locally before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(self, ExchangeError::Validation(_))
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            ExchangeError::InvalidCredentials(_) => true,
            ExchangeError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        ExchangeError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ExchangeError::Validation(message.into())
    }
}

impl From<config::ConfigError> for ExchangeError {
    fn from(err: config::ConfigError) -> Self {
        ExchangeError::Config(err.to_string())
    }
}

/// Result type alias for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;
