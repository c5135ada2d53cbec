//! Suite setup, per-test browser sessions and teardown.
//!
//! [`SuiteContext`] is built once before any test body runs and is read-only
//! afterwards. Test bodies get a fresh browser session each through
//! [`SuiteContext::run_test`]; [`run_suite`] guarantees the test user is
//! deleted whatever the bodies do.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::browser::{BrowserDriver, ChromeOptions, FantocciniDriver};
use crate::config::{load_dotenv, SuiteSettings};
use crate::errors::Result;
use crate::identity::{IdentityApi, PingOneClient};
use crate::lifecycle::{TestUser, TestUserLifecycle, TestUserSpec};
use crate::login::LoginFlow;
use crate::observability::log_settings;
use crate::parameters::{build_parameter_store, EnvironmentDescriptor, ParameterStore};
use crate::reachability::{ReachabilityAttempt, ReachabilityProber};

/// Everything a test body needs, resolved once in setup
pub struct SuiteContext {
    settings: SuiteSettings,
    descriptor: EnvironmentDescriptor,
    console_url: String,
    identity: Box<dyn IdentityApi>,
    test_user: TestUser,
}

impl std::fmt::Debug for SuiteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteContext")
            .field("settings", &self.settings)
            .field("descriptor", &self.descriptor)
            .field("console_url", &self.console_url)
            .field("test_user", &self.test_user)
            .finish_non_exhaustive()
    }
}

impl SuiteContext {
    /// Full setup from the process environment.
    pub async fn setup() -> Result<Self> {
        load_dotenv();
        let settings = SuiteSettings::from_env()?;
        log_settings(&settings);

        let store = build_parameter_store(settings.parameter_backend).await?;
        Self::setup_with(settings, store.as_ref()).await
    }

    /// Setup against a given parameter store, connecting to the live identity API.
    pub async fn setup_with(settings: SuiteSettings, store: &dyn ParameterStore) -> Result<Self> {
        let descriptor = EnvironmentDescriptor::fetch(
            store,
            &settings.metadata_parameter_name(),
            settings.identity.api_location.clone(),
        )
        .await?;

        let client = PingOneClient::connect(&settings.identity, &descriptor.environment_id).await?;
        Self::provision(settings, descriptor, Box::new(client)).await
    }

    /// Delete any leftover test user, then create a fresh one.
    pub async fn provision(
        settings: SuiteSettings,
        descriptor: EnvironmentDescriptor,
        identity: Box<dyn IdentityApi>,
    ) -> Result<Self> {
        let spec = TestUserSpec::from_settings(&settings, descriptor.environment_id.clone());
        let test_user = TestUserLifecycle::new(identity.as_ref(), spec).recreate_test_user().await?;
        let console_url = settings.console_home_url(&descriptor.environment_id);

        info!(
            environment_id = %descriptor.environment_id,
            console_url = %console_url,
            username = %test_user.username,
            "Suite setup complete"
        );

        Ok(Self { settings, descriptor, console_url, identity, test_user })
    }

    pub fn settings(&self) -> &SuiteSettings {
        &self.settings
    }

    pub fn descriptor(&self) -> &EnvironmentDescriptor {
        &self.descriptor
    }

    /// Console home page for the environment under test
    pub fn console_url(&self) -> &str {
        &self.console_url
    }

    pub fn test_user(&self) -> &TestUser {
        &self.test_user
    }

    pub fn identity(&self) -> &dyn IdentityApi {
        self.identity.as_ref()
    }

    /// Login flow for `browser` against the console home page.
    pub fn login_flow<'a, B: BrowserDriver + ?Sized>(&'a self, browser: &'a B) -> LoginFlow<'a, B> {
        LoginFlow::new(browser, &self.console_url)
    }

    /// Poll the console URL until it stops answering with an HTTP error.
    pub async fn wait_until_console_reachable(&self) -> Result<ReachabilityAttempt> {
        let prober = ReachabilityProber::new()?;
        Ok(prober.wait_until_reachable(&self.console_url).await?)
    }

    /// Run `body` with a fresh headless Chrome session that is always closed afterwards.
    pub async fn run_test<F, Fut, T>(&self, body: F) -> Result<T>
    where
        F: FnOnce(Arc<FantocciniDriver>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let driver =
            FantocciniDriver::connect(&self.settings.webdriver_url, &ChromeOptions::new()).await?;
        with_browser_session(Arc::new(driver), body).await
    }

    /// Delete the test user. Returns whether it still existed.
    pub async fn teardown(&self) -> Result<bool> {
        let spec = TestUserSpec::from_settings(&self.settings, self.descriptor.environment_id.clone());
        let lifecycle = TestUserLifecycle::new(self.identity.as_ref(), spec);
        Ok(lifecycle.delete_test_user(&self.test_user.username).await?)
    }
}

/// Run `body` against `browser`, then quit the session even if `body` fails or panics.
///
/// A failure to quit is logged and does not replace the body's outcome.
pub async fn with_browser_session<B, F, Fut, T>(browser: Arc<B>, body: F) -> Result<T>
where
    B: BrowserDriver + ?Sized,
    F: FnOnce(Arc<B>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let outcome = AssertUnwindSafe(body(Arc::clone(&browser))).catch_unwind().await;

    if let Err(e) = browser.quit().await {
        warn!(error = %e, "Failed to quit browser session");
    }

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Run the suite body, then tear down unconditionally.
///
/// A panic in `body` is re-raised after teardown. A teardown failure is
/// logged and returned only when the body itself succeeded.
pub async fn run_suite<F, Fut, T>(context: SuiteContext, body: F) -> Result<T>
where
    F: FnOnce(Arc<SuiteContext>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let context = Arc::new(context);
    let outcome = AssertUnwindSafe(body(Arc::clone(&context))).catch_unwind().await;

    let teardown = context.teardown().await;
    if let Err(e) = &teardown {
        error!(error = %e, username = %context.test_user().username, "Suite teardown failed");
    }

    match outcome {
        Ok(Ok(value)) => teardown.map(|_| value),
        Ok(Err(e)) => Err(e),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
