//! Error types for parameter store operations.

use thiserror::Error;

/// Result type for parameter store operations.
pub type Result<T> = std::result::Result<T, ParameterError>;

/// Errors that can occur while fetching suite parameters.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// Parameter not found in the backend.
    #[error("Parameter not found: {name}")]
    NotFound { name: String },

    /// Failed to reach the parameter backend.
    #[error("Backend connection failed: {message}")]
    ConnectionFailed { message: String },

    /// Backend-specific error.
    #[error("Backend error: {message}")]
    BackendError { message: String },

    /// The parameter exists but its value is not what we expect.
    #[error("Malformed parameter '{name}': {reason}")]
    Malformed { name: String, reason: String },
}

impl ParameterError {
    /// Create a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed { message: message.into() }
    }

    /// Create a backend error.
    pub fn backend_error(message: impl Into<String>) -> Self {
        Self::BackendError { message: message.into() }
    }

    /// Create a malformed parameter error.
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed { name: name.into(), reason: reason.into() }
    }
}
