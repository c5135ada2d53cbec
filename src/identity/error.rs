//! Error types for identity API operations.

use thiserror::Error;

/// Result type for identity API operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Errors raised by the identity API client.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The request did not produce a response.
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with an error status.
    #[error("{operation}: HTTP {status}: {body}")]
    Status { operation: &'static str, status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("{operation}: unexpected response body: {message}")]
    Decode { operation: &'static str, message: String },

    /// A required resource does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Token acquisition failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The HTTP client could not be constructed.
    #[error("Invalid client configuration: {0}")]
    Client(String),
}

impl IdentityError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound { kind, name: name.into() }
    }

    pub fn decode(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Decode { operation, message: message.into() }
    }

    /// HTTP status of a [`IdentityError::Status`] failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = IdentityError::not_found("population", "acme");
        assert_eq!(err.to_string(), "population 'acme' not found");

        let err = IdentityError::Status { operation: "create_user", status: 400, body: "bad".into() };
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().starts_with("create_user: HTTP 400"));
    }
}
