//! AWS Systems Manager Parameter Store backend.
//!
//! Compiled only with the `aws` feature. Credentials and region come from
//! the standard AWS provider chain (environment, profile, instance role).

use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;

use super::client::ParameterStore;
use super::error::{ParameterError, Result};

/// Parameter store reading plain (non-decrypted) SSM parameters.
#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    /// Build a client from the default AWS configuration chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self { client: aws_sdk_ssm::Client::new(&config) }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(false)
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                if service_error.is_parameter_not_found() {
                    ParameterError::not_found(name)
                } else {
                    ParameterError::connection_failed(format!(
                        "SSM GetParameter failed for '{}': {}",
                        name,
                        DisplayErrorContext(&service_error)
                    ))
                }
            })?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| ParameterError::malformed(name, "parameter has no value"))
    }

    fn backend_name(&self) -> &'static str {
        "ssm"
    }
}
