//! Core parameter store trait.

use async_trait::async_trait;

use super::error::Result;

/// Trait for key-value parameter store backends.
///
/// The suite reads exactly one parameter per run (the environment metadata
/// document), so the interface is read-only.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use sso_console_e2e::parameters::{ParameterStore, Result};
/// use async_trait::async_trait;
///
/// struct MyStore;
///
/// #[async_trait]
/// impl ParameterStore for MyStore {
///     async fn get_parameter(&self, name: &str) -> Result<String> {
///         Ok("{}".to_string())
///     }
///
///     fn backend_name(&self) -> &'static str {
///         "mine"
///     }
/// }
/// ```
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Retrieve a parameter value by its full name.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::NotFound`](super::ParameterError::NotFound) if the parameter doesn't exist
    /// - [`ParameterError::ConnectionFailed`](super::ParameterError::ConnectionFailed) if the backend is unreachable
    async fn get_parameter(&self, name: &str) -> Result<String>;

    /// Short backend label used in logs.
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl<T: ParameterStore + ?Sized> ParameterStore for Box<T> {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        (**self).get_parameter(name).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
