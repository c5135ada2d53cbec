//! WebDriver-backed [`BrowserDriver`] over `fantoccini`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::elements::Element;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};
use tracing::{debug, info, warn, Instrument};
use url::Url;

use super::error::{BrowserError, Result};
use super::options::ChromeOptions;
use super::{BrowserDriver, Locator};
use crate::browser_span;

/// A live chromedriver session
pub struct FantocciniDriver {
    client: Client,
    webdriver_url: String,
    closed: AtomicBool,
}

impl std::fmt::Debug for FantocciniDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FantocciniDriver")
            .field("webdriver_url", &self.webdriver_url)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

/// reqwest and fantoccini both pull in rustls; pin the process-wide provider once.
fn install_rustls_provider() {
    use rustls::crypto::{ring, CryptoProvider};

    if CryptoProvider::get_default().is_none() {
        // Losing the race to another installer is fine.
        let _ = ring::default_provider().install_default();
    }
}

fn to_webdriver_locator(locator: Locator<'_>) -> fantoccini::Locator<'_> {
    match locator {
        Locator::Id(id) => fantoccini::Locator::Id(id),
        Locator::Css(css) => fantoccini::Locator::Css(css),
        Locator::XPath(xpath) => fantoccini::Locator::XPath(xpath),
    }
}

impl FantocciniDriver {
    /// Open a new session against the WebDriver server at `webdriver_url`.
    pub async fn connect(webdriver_url: &str, options: &ChromeOptions) -> Result<Self> {
        install_rustls_provider();

        let session_error = |message: String| BrowserError::SessionStart {
            webdriver_url: webdriver_url.to_string(),
            message,
        };

        let client = ClientBuilder::rustls()
            .map_err(|e| session_error(e.to_string()))?
            .capabilities(options.to_capabilities())
            .connect(webdriver_url)
            .await
            .map_err(|e| session_error(e.to_string()))?;

        info!(webdriver_url = %webdriver_url, "Browser session started");
        Ok(Self { client, webdriver_url: webdriver_url.to_string(), closed: AtomicBool::new(false) })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BrowserError::SessionClosed);
        }
        Ok(())
    }

    async fn find(&self, locator: Locator<'_>) -> Result<Element> {
        self.ensure_open()?;
        self.client
            .find(to_webdriver_locator(locator))
            .await
            .map_err(|e| map_lookup_error(locator, e))
    }
}

fn map_lookup_error(locator: Locator<'_>, error: CmdError) -> BrowserError {
    if error.is_no_such_element() {
        BrowserError::no_such_element(locator)
    } else {
        BrowserError::command("find", error.to_string())
    }
}

fn command_error(command: &'static str) -> impl FnOnce(CmdError) -> BrowserError {
    move |e| BrowserError::command(command, e.to_string())
}

#[async_trait]
impl BrowserDriver for FantocciniDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.ensure_open()?;
        self.client
            .goto(url)
            .instrument(browser_span!("goto", url = %url))
            .await
            .map_err(command_error("goto"))
    }

    async fn current_url(&self) -> Result<Url> {
        self.ensure_open()?;
        self.client.current_url().await.map_err(command_error("current_url"))
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()> {
        self.ensure_open()?;
        debug!(timeout_ms = timeout.as_millis() as u64, "Setting implicit wait");
        self.client
            .update_timeouts(TimeoutConfiguration::new(None, None, Some(timeout)))
            .await
            .map_err(command_error("set_implicit_wait"))
    }

    async fn type_into(&self, locator: Locator<'_>, text: &str) -> Result<()> {
        let span = browser_span!("type_into", locator = %locator);
        let element = self.find(locator).instrument(span.clone()).await?;
        element.send_keys(text).instrument(span).await.map_err(command_error("send_keys"))
    }

    async fn click(&self, locator: Locator<'_>) -> Result<()> {
        let span = browser_span!("click", locator = %locator);
        let element = self.find(locator).instrument(span.clone()).await?;
        element.click().instrument(span).await.map_err(command_error("click"))
    }

    async fn locate(&self, locator: Locator<'_>) -> Result<()> {
        self.find(locator).instrument(browser_span!("locate", locator = %locator)).await?;
        Ok(())
    }

    async fn is_displayed(&self, locator: Locator<'_>) -> Result<bool> {
        let element = self.find(locator).await?;
        element.is_displayed().await.map_err(command_error("is_displayed"))
    }

    async fn enter_frame(&self, locator: Locator<'_>) -> Result<()> {
        let span = browser_span!("enter_frame", locator = %locator);
        let frame = self.find(locator).instrument(span.clone()).await?;
        frame.enter_frame().instrument(span).await.map_err(command_error("enter_frame"))
    }

    async fn page_source(&self) -> Result<String> {
        self.ensure_open()?;
        self.client.source().await.map_err(command_error("page_source"))
    }

    async fn quit(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        match self.client.clone().close().await {
            Ok(()) => {
                info!(webdriver_url = %self.webdriver_url, "Browser session closed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Browser session did not close cleanly");
                Err(BrowserError::command("quit", e.to_string()))
            }
        }
    }
}
