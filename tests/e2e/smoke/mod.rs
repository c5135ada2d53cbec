//! Smoke tests for the console login
//!
//! ```bash
//! RUN_E2E=1 cargo test --test e2e smoke -- --ignored --nocapture
//! ```

pub mod test_console_login;
