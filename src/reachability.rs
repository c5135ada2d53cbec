//! Reachability probe for the console URL.
//!
//! Issues GET requests until the target answers with a non-error status.
//! Only HTTP error statuses (4xx/5xx) are retried. Transport failures (DNS,
//! refused connections, TLS) end the probe on the spot.
//!
//! Certificate validation is disabled: the staging console is served with a
//! certificate the runner does not trust.

use reqwest::redirect;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::retry::{retry_if, RetryPolicy};

/// Maximum redirects followed per attempt
const MAX_REDIRECTS: usize = 10;

/// Probe failures
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The target answered with an HTTP error status. Retryable.
    #[error("{url} responded with HTTP {status} on attempt {attempt}")]
    Status { url: String, status: u16, attempt: u32 },

    /// The request never produced a response. Not retryable.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build probe HTTP client: {0}")]
    Client(String),
}

impl ProbeError {
    /// Only HTTP status failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Status code of an HTTP failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The attempt record behind an HTTP failure
    pub fn failed_attempt(&self) -> Option<ReachabilityAttempt> {
        match self {
            Self::Status { url, status, attempt } => Some(ReachabilityAttempt {
                url: url.clone(),
                outcome: AttemptOutcome::HttpError(*status),
                attempt_number: *attempt,
            }),
            _ => None,
        }
    }
}

/// Outcome of one probe attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success(u16),
    HttpError(u16),
}

/// Record of a single probe attempt. Lives only inside the retry loop and
/// as the return value of a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityAttempt {
    pub url: String,
    pub outcome: AttemptOutcome,
    pub attempt_number: u32,
}

/// Polls a URL until it responds successfully or the retry budget runs out
#[derive(Debug, Clone)]
pub struct ReachabilityProber {
    client: Client,
    policy: RetryPolicy,
}

impl ReachabilityProber {
    /// Prober with the default budget (100 attempts, 5s apart).
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_policy(RetryPolicy::reachability())
    }

    /// Prober with a custom retry policy.
    pub fn with_policy(policy: RetryPolicy) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;
        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Perform one GET against `url`.
    pub async fn probe_once(&self, url: &str, attempt: u32) -> Result<ReachabilityAttempt, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ProbeError::Transport { url: url.to_string(), source })?;

        let status = response.status();
        debug!(url = %url, attempt, status = status.as_u16(), final_url = %response.url(), "Probe response");

        if status.is_client_error() || status.is_server_error() {
            return Err(ProbeError::Status { url: url.to_string(), status: status.as_u16(), attempt });
        }

        Ok(ReachabilityAttempt {
            url: url.to_string(),
            outcome: AttemptOutcome::Success(status.as_u16()),
            attempt_number: attempt,
        })
    }

    /// Wait until `url` answers with a non-error status.
    ///
    /// Returns the successful attempt, or the last HTTP failure once the
    /// budget is exhausted, or the first transport failure.
    pub async fn wait_until_reachable(&self, url: &str) -> Result<ReachabilityAttempt, ProbeError> {
        let attempt = retry_if(
            &self.policy,
            |attempt| self.probe_once(url, attempt),
            ProbeError::is_retryable,
        )
        .await?;

        info!(url = %url, attempts = attempt.attempt_number, "URL is reachable");
        Ok(attempt)
    }
}
