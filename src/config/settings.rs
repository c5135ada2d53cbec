//! # Suite Settings
//!
//! Everything the suite reads from the process environment, plus the values
//! derived from it (test username, group list, parameter name, console URL).

use serde::Serialize;
use std::time::Duration;
use validator::Validate;

use super::secret::SecretString;
use crate::errors::{Error, Result};

/// Default identity API location
pub const DEFAULT_API_LOCATION: &str = "https://api.pingone.com/v1";

/// Default token endpoint host
pub const DEFAULT_AUTH_LOCATION: &str = "https://auth.pingone.com";

/// Default admin console base URL (staging)
pub const DEFAULT_CONSOLE_URL: &str = "https://console-staging.pingone.com";

/// Default chromedriver endpoint
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Password given to the disposable test user
pub const TEST_USER_PASSWORD: &str = "2FederateM0re!";

/// Groups the test user is added to when they exist. Entries with `{tenant}`
/// and `{env}` are expanded per run.
const GROUP_NAME_TEMPLATES: &[&str] = &[
    "argo-pingbeluga",
    "os-ping",
    "{tenant}-{env}-pa-admin",
    "{tenant}-{env}-pf-roleadmin",
    "{tenant}",
];

/// Which parameter store backend to read environment metadata from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterBackend {
    /// AWS SSM Parameter Store (requires the `aws` feature)
    Ssm,
    /// `CONSOLE_SSO_PARAM_*` environment variables
    Env,
}

impl ParameterBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ssm" => Ok(Self::Ssm),
            "env" => Ok(Self::Env),
            other => Err(Error::config(format!(
                "Invalid PARAMETER_BACKEND '{}': expected 'ssm' or 'env'",
                other
            ))),
        }
    }
}

impl Default for ParameterBackend {
    fn default() -> Self {
        if cfg!(feature = "aws") {
            Self::Ssm
        } else {
            Self::Env
        }
    }
}

/// Identity API connection settings
#[derive(Debug, Clone, Serialize, Validate)]
pub struct IdentityApiSettings {
    /// Management API base, e.g. `https://api.pingone.com/v1`
    #[validate(url(message = "PINGONE_API_LOCATION must be a URL"))]
    pub api_location: String,

    /// Token endpoint host, e.g. `https://auth.pingone.com`
    #[validate(url(message = "PINGONE_AUTH_LOCATION must be a URL"))]
    pub auth_location: String,

    /// Environment that hosts the worker application
    #[validate(length(min = 1, message = "PINGONE_ADMIN_ENVIRONMENT_ID cannot be empty"))]
    pub admin_environment_id: String,

    /// Worker application client ID
    #[validate(length(min = 1, message = "PINGONE_CLIENT_ID cannot be empty"))]
    pub client_id: String,

    /// Worker application client secret
    pub client_secret: SecretString,

    /// Per-request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub request_timeout_seconds: u64,
}

impl IdentityApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Client-credentials token endpoint for the admin environment
    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/as/token",
            self.auth_location.trim_end_matches('/'),
            self.admin_environment_id
        )
    }
}

/// Settings for one suite run
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SuiteSettings {
    /// Tenant under test; drives usernames, population and group names
    #[validate(length(min = 1, message = "TENANT_NAME cannot be empty"))]
    pub tenant_name: String,

    /// Environment tier (`dev`, `staging`, ...)
    #[validate(length(min = 1, message = "ENV cannot be empty"))]
    pub environment: String,

    /// Parameter path prefix, `{USER}/pcpt/customer/sso` unless overridden
    #[validate(length(min = 1, message = "Parameter prefix cannot be empty"))]
    pub parameter_prefix: String,

    pub parameter_backend: ParameterBackend,

    #[validate(nested)]
    pub identity: IdentityApiSettings,

    /// Admin console base URL
    #[validate(url(message = "PINGONE_CONSOLE_URL must be a URL"))]
    pub console_url: String,

    /// WebDriver (chromedriver) endpoint
    #[validate(url(message = "WEBDRIVER_URL must be a URL"))]
    pub webdriver_url: String,
}

impl SuiteSettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| Error::config(format!("{} is not set", key)));

        let tenant_name = require("TENANT_NAME")?;
        let environment = get("ENV").unwrap_or_else(|| "dev".to_string());

        let parameter_prefix = match get("CUSTOMER_SSO_SSM_PATH_PREFIX") {
            Some(prefix) => prefix,
            None => {
                let user = get("USER").ok_or_else(|| {
                    Error::config("USER is not set and CUSTOMER_SSO_SSM_PATH_PREFIX is not provided")
                })?;
                format!("{}/pcpt/customer/sso", user)
            }
        };

        let parameter_backend = match get("PARAMETER_BACKEND") {
            Some(value) => ParameterBackend::parse(&value)?,
            None => ParameterBackend::default(),
        };

        let request_timeout_seconds = match get("PINGONE_REQUEST_TIMEOUT_SECONDS") {
            Some(value) => value.parse().map_err(|e| {
                Error::config(format!("Invalid PINGONE_REQUEST_TIMEOUT_SECONDS: {}", e))
            })?,
            None => 30,
        };

        let identity = IdentityApiSettings {
            api_location: get("PINGONE_API_LOCATION")
                .unwrap_or_else(|| DEFAULT_API_LOCATION.to_string()),
            auth_location: get("PINGONE_AUTH_LOCATION")
                .unwrap_or_else(|| DEFAULT_AUTH_LOCATION.to_string()),
            admin_environment_id: require("PINGONE_ADMIN_ENVIRONMENT_ID")?,
            client_id: require("PINGONE_CLIENT_ID")?,
            client_secret: SecretString::new(require("PINGONE_CLIENT_SECRET")?),
            request_timeout_seconds,
        };

        let settings = Self {
            tenant_name,
            environment,
            parameter_prefix,
            parameter_backend,
            identity,
            console_url: get("PINGONE_CONSOLE_URL")
                .unwrap_or_else(|| DEFAULT_CONSOLE_URL.to_string()),
            webdriver_url: get("WEBDRIVER_URL")
                .unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string()),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate field formats
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Name of the disposable test user
    pub fn username(&self) -> String {
        format!("sso-test-user-{}", self.tenant_name)
    }

    /// Password of the disposable test user
    pub fn password(&self) -> SecretString {
        SecretString::new(TEST_USER_PASSWORD)
    }

    /// Population the test user is created in
    pub fn population_name(&self) -> &str {
        &self.tenant_name
    }

    /// Candidate group names, in assignment order
    pub fn group_names(&self) -> Vec<String> {
        GROUP_NAME_TEMPLATES
            .iter()
            .map(|template| {
                template.replace("{tenant}", &self.tenant_name).replace("{env}", &self.environment)
            })
            .collect()
    }

    /// Full name of the environment metadata parameter
    pub fn metadata_parameter_name(&self) -> String {
        format!("{}/environment-metadata", self.parameter_prefix.trim_end_matches('/'))
    }

    /// Console home page URL for an environment
    pub fn console_home_url(&self, environment_id: &str) -> String {
        format!("{}/?env={}#home?nav=home", self.console_url.trim_end_matches('/'), environment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn base_vars() -> HashMap<String, String> {
        vars(&[
            ("TENANT_NAME", "acme"),
            ("USER", "jdoe"),
            ("PINGONE_ADMIN_ENVIRONMENT_ID", "admin-env"),
            ("PINGONE_CLIENT_ID", "worker"),
            ("PINGONE_CLIENT_SECRET", "s3cret"),
        ])
    }

    fn load(map: HashMap<String, String>) -> Result<SuiteSettings> {
        SuiteSettings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = load(base_vars()).unwrap();
        assert_eq!(settings.environment, "dev");
        assert_eq!(settings.parameter_prefix, "jdoe/pcpt/customer/sso");
        assert_eq!(
            settings.metadata_parameter_name(),
            "jdoe/pcpt/customer/sso/environment-metadata"
        );
        assert_eq!(settings.identity.api_location, DEFAULT_API_LOCATION);
        assert_eq!(settings.identity.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.webdriver_url, DEFAULT_WEBDRIVER_URL);
        assert_eq!(settings.parameter_backend, ParameterBackend::default());
    }

    #[test]
    fn test_derived_names() {
        let mut map = base_vars();
        map.insert("ENV".into(), "cicd".into());
        let settings = load(map).unwrap();

        assert_eq!(settings.username(), "sso-test-user-acme");
        assert_eq!(settings.password().expose_secret(), "2FederateM0re!");
        assert_eq!(settings.population_name(), "acme");
        assert_eq!(
            settings.group_names(),
            vec![
                "argo-pingbeluga",
                "os-ping",
                "acme-cicd-pa-admin",
                "acme-cicd-pf-roleadmin",
                "acme",
            ]
        );
    }

    #[test]
    fn test_prefix_override_does_not_need_user() {
        let mut map = base_vars();
        map.remove("USER");
        map.insert("CUSTOMER_SSO_SSM_PATH_PREFIX".into(), "ci/sso/".into());
        let settings = load(map).unwrap();
        assert_eq!(settings.metadata_parameter_name(), "ci/sso/environment-metadata");
    }

    #[test]
    fn test_missing_tenant_is_config_error() {
        let mut map = base_vars();
        map.remove("TENANT_NAME");
        let err = load(map).unwrap_err();
        assert!(err.to_string().contains("TENANT_NAME"));
    }

    #[test]
    fn test_missing_user_without_prefix() {
        let mut map = base_vars();
        map.remove("USER");
        let err = load(map).unwrap_err();
        assert!(err.to_string().contains("USER"));
    }

    #[test]
    fn test_invalid_backend() {
        let mut map = base_vars();
        map.insert("PARAMETER_BACKEND".into(), "vault".into());
        assert!(load(map).is_err());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut map = base_vars();
        map.insert("WEBDRIVER_URL".into(), "not a url".into());
        let err = load(map).unwrap_err();
        assert!(err.to_string().contains("WEBDRIVER_URL"));
    }

    #[test]
    fn test_console_and_token_urls() {
        let mut map = base_vars();
        map.insert("PINGONE_CONSOLE_URL".into(), "https://console.example.com/".into());
        let settings = load(map).unwrap();
        assert_eq!(
            settings.console_home_url("env-1"),
            "https://console.example.com/?env=env-1#home?nav=home"
        );
        assert_eq!(settings.identity.token_url(), "https://auth.pingone.com/admin-env/as/token");
    }

    #[test]
    fn test_secret_not_serialized() {
        let settings = load(base_vars()).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("[REDACTED]"));
    }
}
