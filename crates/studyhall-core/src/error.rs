//! Core error types for studyhall-core.
//!
//! The planner never fails; these cover configuration, the remembered-user
//! file, and calls to the study backend.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyhall-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call errors
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

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

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// No usable data directory
    #[error("Cannot determine data directory: {0}")]
    DataDir(String),
}

/// Errors talking to the study backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused or other network failure
    #[error("Cannot connect to server. Make sure the backend is running on {base_url}")]
    Unreachable {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request took longer than the configured timeout
    #[error("Request to {path} timed out after {timeout_secs} seconds")]
    Timeout { path: String, timeout_secs: u64 },

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Response body was not the expected JSON
    #[error("Malformed response from {path}: {message}")]
    Decode { path: String, message: String },

    /// Base URL or path could not be joined into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Local file to upload could not be read
    #[error("Cannot read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request could not be built
    #[error("Request failed: {0}")]
    Request(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Required form field left blank
    #[error("{0}")]
    MissingField(&'static str),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
