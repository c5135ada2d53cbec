//! Remote parameter store access for suite configuration.
//!
//! The suite needs one value from outside the process: the environment
//! metadata document naming the identity environment under test. It is
//! read through the [`ParameterStore`] trait so the backend can be swapped:
//!
//! - **AWS SSM Parameter Store** (`aws` feature): the CI backend
//! - **Environment variables**: local runs, `CONSOLE_SSO_PARAM_*`
//! - **Static map**: tests
//!
//! # Example
//!
//! ```rust,ignore
//! use sso_console_e2e::parameters::{build_parameter_store, EnvironmentDescriptor};
//!
//! let store = build_parameter_store(settings.parameter_backend).await?;
//! let descriptor = EnvironmentDescriptor::fetch(
//!     store.as_ref(),
//!     &settings.metadata_parameter_name(),
//!     settings.identity.api_location.clone(),
//! )
//! .await?;
//! ```

pub mod client;
pub mod descriptor;
pub mod env;
pub mod error;
pub mod fallback;
pub mod memory;
#[cfg(feature = "aws")]
pub mod ssm;

pub use client::ParameterStore;
pub use descriptor::EnvironmentDescriptor;
pub use env::EnvParameterStore;
pub use error::{ParameterError, Result};
pub use fallback::FallbackParameterStore;
pub use memory::StaticParameterStore;
#[cfg(feature = "aws")]
pub use ssm::SsmParameterStore;

use crate::config::ParameterBackend;

/// Build the parameter store selected by configuration.
///
/// SSM is always paired with the environment backend as fallback.
pub async fn build_parameter_store(backend: ParameterBackend) -> Result<Box<dyn ParameterStore>> {
    match backend {
        ParameterBackend::Env => Ok(Box::new(EnvParameterStore::new())),
        #[cfg(feature = "aws")]
        ParameterBackend::Ssm => {
            let ssm = SsmParameterStore::from_env().await;
            Ok(Box::new(FallbackParameterStore::new(ssm, EnvParameterStore::new())))
        }
        #[cfg(not(feature = "aws"))]
        ParameterBackend::Ssm => Err(ParameterError::backend_error(
            "SSM parameter backend requested but the crate was built without the `aws` feature",
        )),
    }
}
