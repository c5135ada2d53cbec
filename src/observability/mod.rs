//! # Observability
//!
//! Structured logging for the suite. Every component logs through
//! `tracing`; the harness installs the subscriber once per test binary.

pub mod logging;

pub use logging::{init_logging, log_settings, LogFormat};
