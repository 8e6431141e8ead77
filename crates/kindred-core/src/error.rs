//! Core error types for kindred-core.
//!
//! This module defines the error hierarchy using thiserror. Read paths in the
//! scheduler and the suggestion engine swallow [`ApiError`]s and degrade to
//! empty results; write paths surface them to the caller as [`CoreError::Api`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kindred-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// External API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while talking to an external collaborator.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Endpoint could not be built from the configured base URL
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend refused or is not reachable
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A wall-clock string that is not `HH:MM`
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// A categorical value outside its fixed set
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
