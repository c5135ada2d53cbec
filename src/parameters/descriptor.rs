//! Environment descriptor parsed from the environment metadata parameter.

use serde::Deserialize;
use tracing::info;

use super::client::ParameterStore;
use super::error::{ParameterError, Result};

/// Identity environment targeted by the suite. Fetched once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentDescriptor {
    /// Identity provider environment ID
    pub environment_id: String,
    /// Identity API base location, e.g. `https://api.pingone.com/v1`
    pub api_base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentMetadata {
    ping_one_information: PingOneInformation,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PingOneInformation {
    environment_id: String,
}

impl EnvironmentDescriptor {
    /// Parse the metadata JSON document stored under `name`.
    ///
    /// Only `pingOneInformation.environmentId` is required; other fields are ignored.
    pub fn from_metadata_json(
        name: &str,
        raw: &str,
        api_base_url: impl Into<String>,
    ) -> Result<Self> {
        let metadata: EnvironmentMetadata = serde_json::from_str(raw)
            .map_err(|e| ParameterError::malformed(name, e.to_string()))?;

        let environment_id = metadata.ping_one_information.environment_id.trim().to_string();
        if environment_id.is_empty() {
            return Err(ParameterError::malformed(
                name,
                "pingOneInformation.environmentId is empty",
            ));
        }

        Ok(Self { environment_id, api_base_url: api_base_url.into() })
    }

    /// Fetch and parse the metadata parameter from `store`.
    pub async fn fetch<S: ParameterStore + ?Sized>(
        store: &S,
        name: &str,
        api_base_url: impl Into<String>,
    ) -> Result<Self> {
        let raw = store.get_parameter(name).await?;
        let descriptor = Self::from_metadata_json(name, &raw, api_base_url)?;
        info!(
            parameter = %name,
            backend = store.backend_name(),
            environment_id = %descriptor.environment_id,
            "Loaded environment metadata"
        );
        Ok(descriptor)
    }
}
