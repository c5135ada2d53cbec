//! Live suite start-up.

use sso_console_e2e::observability::{init_logging, LogFormat};
use sso_console_e2e::SuiteContext;
use tracing::info;

use super::timeout::{with_timeout, TestTimeout};

/// Whether live tests are enabled for this run
pub fn e2e_enabled() -> bool {
    std::env::var("RUN_E2E").ok().as_deref() == Some("1")
}

/// Provision the test user and build the suite context.
pub async fn start_suite(test_name: &str) -> anyhow::Result<SuiteContext> {
    if !e2e_enabled() {
        anyhow::bail!("E2E tests disabled (set RUN_E2E=1 to enable)");
    }

    init_logging(LogFormat::from_env());
    info!(test = %test_name, "Starting console SSO suite");

    with_timeout(TestTimeout::setup("Suite setup"), async {
        Ok(SuiteContext::setup().await?)
    })
    .await
}
