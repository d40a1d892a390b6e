//! Error types for the portfolio contact pipeline.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Validation errors live in [`crate::domain`] since they never cross the public contract.

use thiserror::Error;

/// Errors that can occur when handing a message to the email delivery service.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Transport-level failure (DNS, connection refused, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Credentials rejected by the service
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Sending quota or rate limit exhausted
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Service rejected the payload
    #[error("Malformed request: {0}")]
    Malformed(String),

    /// Service returned an unexpected error status code
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Generic delivery error with context
    #[error("Delivery error: {0}")]
    Other(String),
}

/// Errors raised by the analytics collaborator.
///
/// These never reach a caller of the submission pipeline; they are logged and swallowed.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Ingestion API answered with an error
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to encode or parse JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A protocol call was given an unusable argument
    #[error("Invalid analytics call: {0}")]
    InvalidCall(String),

    /// The in-memory client state is unusable
    #[error("Analytics client unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with DeliveryError
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Convenience type alias for Results with AnalyticsError
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
