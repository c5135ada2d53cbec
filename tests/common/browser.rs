//! Scripted browser for login flow tests.
//!
//! Elements are keyed by their locator's display form. Elements registered
//! under a frame are only visible after `enter_frame` on that frame.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sso_console_e2e::browser::{BrowserDriver, BrowserError, Locator, Result};
use url::Url;

#[derive(Debug, Default)]
struct State {
    url: Option<String>,
    implicit_wait: Option<Duration>,
    /// displayed flag per top-level element
    elements: HashMap<String, bool>,
    /// frame locator -> elements inside it
    frames: HashMap<String, HashMap<String, bool>>,
    /// lookups that fail with a non-lookup error
    broken: HashMap<String, String>,
    current_frame: Option<String>,
    page_source: String,
    actions: Vec<String>,
    quit_calls: u32,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct ScriptedBrowser {
    state: Mutex<State>,
}

impl ScriptedBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The console login page: both fields and the submit button.
    pub fn login_page() -> Self {
        Self::new()
            .with_element(Locator::Id("username"), true)
            .with_element(Locator::Id("password"), true)
            .with_element(Locator::Css(r#"button[data-id="submit-button"]"#), true)
    }

    pub fn with_element(self, locator: Locator<'_>, displayed: bool) -> Self {
        self.state.lock().unwrap().elements.insert(locator.to_string(), displayed);
        self
    }

    /// Register a frame (itself a top-level element) and its contents.
    pub fn with_frame(self, frame: Locator<'_>, contents: &[(Locator<'_>, bool)]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.elements.insert(frame.to_string(), true);
            state.frames.insert(
                frame.to_string(),
                contents.iter().map(|(l, d)| (l.to_string(), *d)).collect(),
            );
        }
        self
    }

    /// Make lookups of `locator` fail with a WebDriver command error.
    pub fn with_broken(self, locator: Locator<'_>, message: &str) -> Self {
        self.state.lock().unwrap().broken.insert(locator.to_string(), message.to_string());
        self
    }

    pub fn with_page_source(self, source: &str) -> Self {
        self.state.lock().unwrap().page_source = source.to_string();
        self
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn visited(&self) -> Option<String> {
        self.state.lock().unwrap().url.clone()
    }

    pub fn implicit_wait(&self) -> Option<Duration> {
        self.state.lock().unwrap().implicit_wait
    }

    pub fn quit_calls(&self) -> u32 {
        self.state.lock().unwrap().quit_calls
    }

    fn lookup(&self, locator: Locator<'_>) -> Result<bool> {
        let state = self.state.lock().unwrap();
        if state.closed {
            return Err(BrowserError::SessionClosed);
        }
        let key = locator.to_string();
        if let Some(message) = state.broken.get(&key) {
            return Err(BrowserError::command("find", message.clone()));
        }
        let scope = match &state.current_frame {
            Some(frame) => state.frames.get(frame),
            None => Some(&state.elements),
        };
        scope
            .and_then(|elements| elements.get(&key).copied())
            .ok_or_else(|| BrowserError::no_such_element(locator))
    }

    fn record(&self, action: String) {
        self.state.lock().unwrap().actions.push(action);
    }
}

#[async_trait]
impl BrowserDriver for ScriptedBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.url = Some(url.to_string());
        state.current_frame = None;
        state.actions.push(format!("goto {}", url));
        Ok(())
    }

    async fn current_url(&self) -> Result<Url> {
        let url = self.visited().unwrap_or_else(|| "about:blank".to_string());
        Url::parse(&url).map_err(|e| BrowserError::command("current_url", e.to_string()))
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()> {
        self.state.lock().unwrap().implicit_wait = Some(timeout);
        Ok(())
    }

    async fn type_into(&self, locator: Locator<'_>, text: &str) -> Result<()> {
        self.lookup(locator)?;
        self.record(format!("type {} {}", locator, text));
        Ok(())
    }

    async fn click(&self, locator: Locator<'_>) -> Result<()> {
        self.lookup(locator)?;
        self.record(format!("click {}", locator));
        Ok(())
    }

    async fn locate(&self, locator: Locator<'_>) -> Result<()> {
        self.lookup(locator)?;
        self.record(format!("locate {}", locator));
        Ok(())
    }

    async fn is_displayed(&self, locator: Locator<'_>) -> Result<bool> {
        self.lookup(locator)
    }

    async fn enter_frame(&self, locator: Locator<'_>) -> Result<()> {
        self.lookup(locator)?;
        let mut state = self.state.lock().unwrap();
        if !state.frames.contains_key(&locator.to_string()) {
            return Err(BrowserError::command("enter_frame", "element is not a frame"));
        }
        state.current_frame = Some(locator.to_string());
        state.actions.push(format!("enter_frame {}", locator));
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().page_source.clone())
    }

    async fn quit(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.quit_calls += 1;
        state.closed = true;
        Ok(())
    }
}
