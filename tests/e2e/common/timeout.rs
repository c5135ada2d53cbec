//! Hard timeout utilities for E2E tests
//!
//! Every live step runs under a hard timeout so a stuck browser or API
//! never hangs CI.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Browser session: start, login and the home page check (3 minutes)
pub const BROWSER_TIMEOUT: Duration = Duration::from_secs(180);

/// Suite setup: token, metadata, user provisioning (2 minutes)
pub const SETUP_TIMEOUT: Duration = Duration::from_secs(120);

/// Full reachability budget (100 attempts, 5s apart) plus slack
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(100 * 5 + 60);

/// Timeout configuration for tests
#[derive(Debug, Clone)]
pub struct TestTimeout {
    /// Duration before timeout triggers
    pub duration: Duration,
    /// Human-readable label for error messages
    pub label: String,
}

impl TestTimeout {
    pub fn new(duration: Duration, label: impl Into<String>) -> Self {
        Self { duration, label: label.into() }
    }

    pub fn browser(label: impl Into<String>) -> Self {
        Self::new(BROWSER_TIMEOUT, label)
    }

    pub fn setup(label: impl Into<String>) -> Self {
        Self::new(SETUP_TIMEOUT, label)
    }

    pub fn reachability(label: impl Into<String>) -> Self {
        Self::new(REACHABILITY_TIMEOUT, label)
    }
}

/// Wrap an async operation with a hard timeout
pub async fn with_timeout<F, T>(timeout_cfg: TestTimeout, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match timeout(timeout_cfg.duration, fut).await {
        Ok(result) => result,
        Err(_elapsed) => {
            anyhow::bail!(
                "TIMEOUT: '{}' exceeded {:?} - test is likely stuck",
                timeout_cfg.label,
                timeout_cfg.duration
            )
        }
    }
}
