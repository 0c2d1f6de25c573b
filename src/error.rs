//! Error types for the SoundCloud client.

use thiserror::Error;

/// Errors that can occur while authenticating or querying the API.
#[derive(Error, Debug)]
pub enum Error {
    /// Neither a refresh nor a fresh client-credentials grant produced a token
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// API returned something other than 200
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Request never produced a status (DNS, TLS, timeout, ...)
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Response body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Constructed URL does not fit the configured capacity
    #[error("URL length {len} exceeds maximum of {max} bytes")]
    LengthExceeded { len: usize, max: usize },

    /// Caller-supplied URL is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
