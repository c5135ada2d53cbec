//! Environment variable parameter backend.
//!
//! Intended for local runs where the remote parameter store is unavailable.
//! Parameter names are normalised to an environment variable name with the
//! `CONSOLE_SSO_PARAM_` prefix: every character that is not ASCII
//! alphanumeric becomes `_` and the result is upper-cased.
//!
//! ```bash
//! # jdoe/pcpt/customer/sso/environment-metadata
//! export CONSOLE_SSO_PARAM_JDOE_PCPT_CUSTOMER_SSO_ENVIRONMENT_METADATA='{"pingOneInformation":{"environmentId":"..."}}'
//! ```

use async_trait::async_trait;
use std::env;

use super::client::ParameterStore;
use super::error::{ParameterError, Result};

/// Environment variable prefix for parameters.
const PARAM_PREFIX: &str = "CONSOLE_SSO_PARAM_";

/// Read-only parameter store backed by process environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvParameterStore {}

impl EnvParameterStore {
    /// Creates a new environment variable parameter store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a parameter name to the environment variable name.
    pub fn name_to_env_var(name: &str) -> String {
        let normalised: String = name
            .trim_matches('/')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}{}", PARAM_PREFIX, normalised)
    }
}

#[async_trait]
impl ParameterStore for EnvParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        let env_var = Self::name_to_env_var(name);

        env::var(&env_var).map_err(|_| {
            ParameterError::not_found(format!(
                "{} (looking for environment variable {})",
                name, env_var
            ))
        })
    }

    fn backend_name(&self) -> &'static str {
        "env"
    }
}
