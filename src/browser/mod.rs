//! Browser automation.
//!
//! The login flow drives a browser through the [`BrowserDriver`] trait so
//! it can run against a real WebDriver session ([`FantocciniDriver`]) or a
//! scripted fake in tests.

pub mod error;
pub mod options;
pub mod webdriver;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

pub use error::{BrowserError, Result};
pub use options::ChromeOptions;
pub use webdriver::FantocciniDriver;

/// How to find an element on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator<'a> {
    Id(&'a str),
    Css(&'a str),
    XPath(&'a str),
}

impl std::fmt::Display for Locator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::Css(css) => write!(f, "css={}", css),
            Locator::XPath(xpath) => write!(f, "xpath={}", xpath),
        }
    }
}

/// Operations the login flow needs from a browser session.
///
/// Element lookups honour the session's implicit wait. A lookup that times
/// out yields [`BrowserError::NoSuchElement`].
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<Url>;

    /// Set how long element lookups poll before giving up.
    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()>;

    async fn type_into(&self, locator: Locator<'_>, text: &str) -> Result<()>;

    async fn click(&self, locator: Locator<'_>) -> Result<()>;

    /// Look the element up without touching it. Fails with `NoSuchElement` when absent.
    async fn locate(&self, locator: Locator<'_>) -> Result<()>;

    /// Whether the element is rendered. Fails with `NoSuchElement` when absent.
    async fn is_displayed(&self, locator: Locator<'_>) -> Result<bool>;

    /// Switch the browsing context into the frame found by `locator`.
    async fn enter_frame(&self, locator: Locator<'_>) -> Result<()>;

    /// Markup of the current browsing context.
    async fn page_source(&self) -> Result<String>;

    /// End the session. Further calls fail.
    async fn quit(&self) -> Result<()>;
}

#[async_trait]
impl<T: BrowserDriver + ?Sized> BrowserDriver for Box<T> {
    async fn goto(&self, url: &str) -> Result<()> {
        (**self).goto(url).await
    }

    async fn current_url(&self) -> Result<Url> {
        (**self).current_url().await
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()> {
        (**self).set_implicit_wait(timeout).await
    }

    async fn type_into(&self, locator: Locator<'_>, text: &str) -> Result<()> {
        (**self).type_into(locator, text).await
    }

    async fn click(&self, locator: Locator<'_>) -> Result<()> {
        (**self).click(locator).await
    }

    async fn locate(&self, locator: Locator<'_>) -> Result<()> {
        (**self).locate(locator).await
    }

    async fn is_displayed(&self, locator: Locator<'_>) -> Result<bool> {
        (**self).is_displayed(locator).await
    }

    async fn enter_frame(&self, locator: Locator<'_>) -> Result<()> {
        (**self).enter_frame(locator).await
    }

    async fn page_source(&self) -> Result<String> {
        (**self).page_source().await
    }

    async fn quit(&self) -> Result<()> {
        (**self).quit().await
    }
}
