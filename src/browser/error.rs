//! Browser session errors.

use thiserror::Error;

/// Result alias for browser operations
pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Error, Debug)]
pub enum BrowserError {
    /// Element lookup timed out
    #[error("No such element: {locator}")]
    NoSuchElement { locator: String },

    /// Could not start a WebDriver session
    #[error("Failed to start browser session at {webdriver_url}: {message}")]
    SessionStart { webdriver_url: String, message: String },

    /// Any other WebDriver command failure
    #[error("Browser command '{command}' failed: {message}")]
    Command { command: &'static str, message: String },

    /// Session already ended
    #[error("Browser session is closed")]
    SessionClosed,
}

impl BrowserError {
    pub fn no_such_element(locator: impl std::fmt::Display) -> Self {
        Self::NoSuchElement { locator: locator.to_string() }
    }

    pub fn command(command: &'static str, message: impl Into<String>) -> Self {
        Self::Command { command, message: message.into() }
    }

    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Self::NoSuchElement { .. })
    }
}
