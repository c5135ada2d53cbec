//! In-memory parameter store.
//!
//! Holds a fixed set of parameters. Used by tests and by callers that
//! already have the metadata document at hand.

use async_trait::async_trait;
use std::collections::HashMap;

use super::client::ParameterStore;
use super::error::{ParameterError, Result};

/// Parameter store over a fixed map of name to value.
#[derive(Debug, Clone, Default)]
pub struct StaticParameterStore {
    values: HashMap<String, String>,
}

impl StaticParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any previous value with the same name.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl ParameterStore for StaticParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        self.values.get(name).cloned().ok_or_else(|| ParameterError::not_found(name))
    }

    fn backend_name(&self) -> &'static str {
        "static"
    }
}
