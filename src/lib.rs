//! # sso-console-e2e
//!
//! End-to-end check that a tenant's administrator can sign in to the
//! PingOne admin console through the hosted login form.
//!
//! ## Architecture
//!
//! ```text
//! Parameter store ──► EnvironmentDescriptor ──► Identity API client
//!                                                      │
//!                                         delete-then-create test user
//!                                                      │
//!                   Reachability prober ──► Browser (WebDriver) login flow
//!                                                      │
//!                                              teardown: delete user
//! ```
//!
//! ## Core Components
//!
//! - **Parameters**: environment metadata from SSM, the process environment
//!   or an in-memory store
//! - **Identity**: PingOne Platform API client behind the `IdentityApi` trait
//! - **Lifecycle**: provisioning and removal of the disposable test user
//! - **Reachability**: fixed-delay polling of the console URL
//! - **Browser / Login**: WebDriver session and the console login steps
//! - **Suite**: immutable context built in setup, guaranteed teardown
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sso_console_e2e::{run_suite, LoginFlow, Result, SuiteContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let context = SuiteContext::setup().await?;
//!     run_suite(context, |ctx| async move {
//!         ctx.wait_until_console_reachable().await?;
//!         let user = ctx.test_user().clone();
//!         let console_url = ctx.console_url().to_string();
//!         ctx.run_test(|browser| async move {
//!             let flow = LoginFlow::new(browser.as_ref(), &console_url);
//!             flow.login(&user.username, &user.password).await?;
//!             flow.assert_post_login_page_visible().await
//!         })
//!         .await
//!     })
//!     .await
//! }
//! ```

pub mod browser;
pub mod config;
pub mod errors;
pub mod identity;
pub mod lifecycle;
pub mod login;
pub mod observability;
pub mod parameters;
pub mod reachability;
pub mod retry;
pub mod suite;

// Re-export commonly used types and traits
pub use browser::{BrowserDriver, BrowserError, FantocciniDriver, Locator};
pub use config::{SecretString, SuiteSettings};
pub use errors::{Error, Result};
pub use identity::{IdentityApi, PingOneClient};
pub use lifecycle::{TestUser, TestUserLifecycle, TestUserSpec};
pub use login::LoginFlow;
pub use observability::{init_logging, LogFormat};
pub use parameters::{EnvironmentDescriptor, ParameterStore};
pub use reachability::{ProbeError, ReachabilityProber};
pub use retry::{retry_if, RetryPolicy};
pub use suite::{run_suite, with_browser_session, SuiteContext};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
