//! # Structured Logging
//!
//! `tracing` subscriber setup and span helpers for the suite.
//!
//! The filter comes from `RUST_LOG` (default `info`). Set `LOG_FORMAT=json`
//! to emit one JSON object per event, which is what the CI log shipper
//! expects.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::SuiteSettings;

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything other than `json` means pretty output.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Install the global subscriber.
///
/// Safe to call from every test: if a subscriber is already installed the
/// call is a no-op and `false` is returned.
pub fn init_logging(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            fmt().with_env_filter(filter).with_target(true).finish(),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            fmt().json().with_env_filter(filter).with_current_span(true).finish(),
        ),
    };

    result.is_ok()
}

/// Create a tracing span for an identity API call.
#[macro_export]
macro_rules! identity_span {
    ($operation:expr) => {
        tracing::info_span!(
            "identity_api",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4()
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info_span!(
            "identity_api",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Create a tracing span for a browser step.
#[macro_export]
macro_rules! browser_span {
    ($step:expr) => {
        tracing::info_span!(
            "browser_step",
            step = %$step,
            step_id = %uuid::Uuid::new_v4()
        )
    };
    ($step:expr, $($field:tt)*) => {
        tracing::info_span!(
            "browser_step",
            step = %$step,
            step_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Log resolved settings at suite start. Secrets are never included.
pub fn log_settings(settings: &SuiteSettings) {
    tracing::info!(
        tenant = %settings.tenant_name,
        environment = %settings.environment,
        parameter = %settings.metadata_parameter_name(),
        parameter_backend = ?settings.parameter_backend,
        api_location = %settings.identity.api_location,
        console_url = %settings.console_url,
        webdriver_url = %settings.webdriver_url,
        username = %settings.username(),
        "Console SSO suite configuration"
    );
}
