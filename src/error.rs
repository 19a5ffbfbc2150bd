//! Error types for bulvds-feed
//!
//! [`Error`] is what the config layer, the content loader and the CLI
//! return. Listing pages fail softly with [`FetchError`] instead; it only
//! becomes an [`Error`] when page 1 fails and a caller uses `?`.

use crate::pagination::FetchError;
use thiserror::Error;

/// The main error type for bulvds-feed
#[derive(Error, Debug)]
pub enum Error {
    // Config
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Transport
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // Payloads
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Page fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Missing config field
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Config field with a value that cannot be used
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Non-2xx response
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Body that did not match the expected shape
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Result type alias for bulvds-feed
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with what was being attempted
pub trait ResultExt<T> {
    /// Add a fixed context message
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add a context message built on failure only
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.with_context(|| message.into())
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}
