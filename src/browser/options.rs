//! Chrome launch options for the WebDriver new-session request.

use serde_json::{json, Map, Value};

/// Arguments for a headless Chrome that tolerates the staging certificate
pub const DEFAULT_CHROME_ARGS: &[&str] = &[
    "--ignore-ssl-errors=yes",
    "--ignore-certificate-errors",
    "--headless=new",
    "--no-sandbox",
    "--disable-dev-shm-usage",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeOptions {
    args: Vec<String>,
    accept_insecure_certs: bool,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            args: DEFAULT_CHROME_ARGS.iter().map(|a| a.to_string()).collect(),
            accept_insecure_certs: true,
        }
    }
}

impl ChromeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        if !self.args.contains(&arg) {
            self.args.push(arg);
        }
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// W3C capabilities with the `goog:chromeOptions` extension.
    pub fn to_capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert("browserName".into(), json!("chrome"));
        caps.insert("acceptInsecureCerts".into(), json!(self.accept_insecure_certs));
        caps.insert("goog:chromeOptions".into(), json!({ "args": self.args }));
        caps
    }
}
