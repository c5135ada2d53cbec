//! E2E Test Infrastructure
//!
//! - Hard timeouts on every live step
//! - `RUN_E2E=1` gate shared by all live tests
//! - Suite start-up from the process environment

pub mod harness;
pub mod timeout;

pub use harness::{e2e_enabled, start_suite};
pub use timeout::{with_timeout, TestTimeout};
