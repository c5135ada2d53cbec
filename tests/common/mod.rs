//! Common test utilities for all integration tests.
//!
//! Provides in-memory fakes for the identity API and the browser, plus
//! settings and metadata fixtures.

#![allow(dead_code)]
#![allow(clippy::duplicate_mod)]

pub mod browser;
pub mod identity;

use std::collections::HashMap;

use sso_console_e2e::config::SuiteSettings;

use identity::FakeIdentityApi;

pub const TENANT: &str = "acme";
pub const ENVIRONMENT_ID: &str = "3c9f2d7a-0b6e-4d51-9a8f-4e21c0d5b7aa";

/// Minimal variable set accepted by `SuiteSettings::from_lookup`.
pub fn base_vars() -> HashMap<String, String> {
    [
        ("TENANT_NAME", TENANT),
        ("ENV", "dev"),
        ("USER", "jdoe"),
        ("PARAMETER_BACKEND", "env"),
        ("PINGONE_ADMIN_ENVIRONMENT_ID", "admin-env"),
        ("PINGONE_CLIENT_ID", "worker-app"),
        ("PINGONE_CLIENT_SECRET", "worker-secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn settings() -> SuiteSettings {
    settings_with(&[])
}

pub fn settings_with(overrides: &[(&str, &str)]) -> SuiteSettings {
    let mut vars = base_vars();
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    SuiteSettings::from_lookup(|key| vars.get(key).cloned()).expect("fixture settings are valid")
}

/// Environment metadata document as stored in the parameter store.
pub fn metadata_json(environment_id: &str) -> String {
    serde_json::json!({
        "pingOneInformation": {
            "environmentId": environment_id,
            "region": "NA"
        },
        "tenant": TENANT
    })
    .to_string()
}

/// Identity fake seeded with the tenant's population, the read-only role
/// and the given subset of the tenant's candidate groups.
pub fn seeded_identity(settings: &SuiteSettings, groups: &[&str]) -> FakeIdentityApi {
    let api = FakeIdentityApi::new()
        .with_population(settings.population_name(), "pop-1")
        .with_role("Identity Data Read Only", "role-ro")
        .with_role("Environment Admin", "role-admin");
    groups
        .iter()
        .enumerate()
        .fold(api, |api, (i, name)| api.with_group(name, &format!("grp-{}", i + 1)))
}
