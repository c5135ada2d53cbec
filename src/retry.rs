//! Fixed-delay retry policy.
//!
//! A [`RetryPolicy`] is a plain value (attempt budget, delay between
//! attempts, label for logs). [`retry_if`] drives an async operation under a
//! policy and a caller-supplied predicate that separates retryable failures
//! from fatal ones. Fatal failures end the loop at once; retryable ones are
//! retried until the budget runs out, and the last failure is returned.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Attempt budget of the reachability probe
pub const REACHABILITY_MAX_ATTEMPTS: u32 = 100;

/// Delay between reachability probe attempts
pub const REACHABILITY_DELAY: Duration = Duration::from_secs(5);

/// Retry configuration with a fixed delay between attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay slept between two attempts
    pub delay: Duration,
    /// Description for logging purposes
    pub description: String,
}

impl RetryPolicy {
    /// Create a fixed-delay policy. A budget of zero is treated as one attempt.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), delay, description: "operation".to_string() }
    }

    /// Policy used while waiting for the console to come up: 100 attempts, 5s apart.
    pub fn reachability() -> Self {
        Self::fixed(REACHABILITY_MAX_ATTEMPTS, REACHABILITY_DELAY)
            .with_description("reachability probe")
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Retry `operation` while it fails with an error accepted by `is_retryable`.
///
/// `operation` receives the 1-based attempt number. An INFO event is logged
/// before every sleep. On exhaustion the error of the last attempt is
/// returned unchanged.
pub async fn retry_if<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, description = %policy.description, "Retry succeeded");
                }
                return Ok(value);
            }
            Err(e) if !is_retryable(&e) => {
                debug!(
                    attempt,
                    error = %e,
                    description = %policy.description,
                    "Non-retryable failure, giving up"
                );
                return Err(e);
            }
            Err(e) if attempt >= max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    description = %policy.description,
                    "Retry exhausted all attempts"
                );
                return Err(e);
            }
            Err(e) => {
                info!(
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    description = %policy.description,
                    "Retrying after failed attempt"
                );
                sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
