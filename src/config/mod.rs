//! # Configuration Management
//!
//! Environment-driven settings for the console SSO check. Values are read
//! once in suite setup; `.env` files are honoured by the test harness via
//! `dotenvy` before [`SuiteSettings::from_env`] is called.

pub mod secret;
pub mod settings;

pub use secret::SecretString;
pub use settings::{
    IdentityApiSettings, ParameterBackend, SuiteSettings, DEFAULT_API_LOCATION,
    DEFAULT_AUTH_LOCATION, DEFAULT_CONSOLE_URL, DEFAULT_WEBDRIVER_URL, TEST_USER_PASSWORD,
};

/// Load a `.env` file if one exists. A missing file is not an error.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }
}
