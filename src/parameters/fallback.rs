//! Fallback parameter store with primary and secondary backends.
//!
//! Lets a local run use environment variables when the remote parameter
//! store is unreachable or does not hold the metadata document.

use async_trait::async_trait;

use super::client::ParameterStore;
use super::error::{ParameterError, Result};

/// Tries the primary backend first and the secondary one if the primary fails.
pub struct FallbackParameterStore<P: ParameterStore, S: ParameterStore> {
    primary: P,
    secondary: S,
}

impl<P: ParameterStore, S: ParameterStore> FallbackParameterStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P: ParameterStore, S: ParameterStore> ParameterStore for FallbackParameterStore<P, S> {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        match self.primary.get_parameter(name).await {
            Ok(value) => Ok(value),
            Err(primary_error) => {
                tracing::warn!(
                    parameter = %name,
                    backend = self.primary.backend_name(),
                    error = %primary_error,
                    "Primary parameter backend failed, attempting fallback"
                );
                self.secondary.get_parameter(name).await.map_err(|secondary_error| {
                    tracing::error!(
                        parameter = %name,
                        primary_error = %primary_error,
                        secondary_error = %secondary_error,
                        "Both primary and fallback parameter backends failed"
                    );
                    ParameterError::backend_error(format!(
                        "Primary backend failed: {}. Fallback also failed: {}",
                        primary_error, secondary_error
                    ))
                })
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "fallback"
    }
}
