//! # Error Handling
//!
//! Crate-level error type for the console SSO check. Each subsystem owns a
//! narrower error enum; [`Error`] aggregates them so suite setup and test
//! bodies can propagate with `?`.

use crate::browser::BrowserError;
use crate::identity::IdentityError;
use crate::parameters::ParameterError;
use crate::reachability::ProbeError;

/// Custom result type for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the console SSO check
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or invalid environment variables)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parameter store lookup or parsing failed
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Identity API call failed
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Reachability probe failed
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Browser automation failed
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// A UI assertion did not hold. Carries the rendered page for debugging.
    #[error("Assertion failed: {message}. Browser contents: {page_source}")]
    Assertion { message: String, page_source: String },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new assertion failure carrying the page markup
    pub fn assertion<S: Into<String>, P: Into<String>>(message: S, page_source: P) -> Self {
        Self::Assertion { message: message.into(), page_source: page_source.into() }
    }

    /// Whether this error is a UI assertion failure rather than an infrastructure fault
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion { .. })
    }
}
