//! Identity API authentication: bearer token or OAuth2 client credentials.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::error::{IdentityError, Result};
use crate::config::{IdentityApiSettings, SecretString};

/// How the client obtains its bearer token.
#[derive(Clone)]
pub enum IdentityCredentials {
    /// Pre-issued access token.
    Bearer(SecretString),

    /// OAuth2 client credentials grant against `token_url` (client_secret_basic).
    ClientCredentials { token_url: String, client_id: String, client_secret: SecretString },
}

impl std::fmt::Debug for IdentityCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.debug_struct("Bearer").field("token", &"[REDACTED]").finish(),
            Self::ClientCredentials { token_url, client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("token_url", token_url)
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .finish(),
        }
    }
}

impl IdentityCredentials {
    /// Worker application credentials from settings.
    pub fn from_settings(settings: &IdentityApiSettings) -> Self {
        Self::ClientCredentials {
            token_url: settings.token_url(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        }
    }

    /// Resolve the credentials to an access token.
    pub async fn access_token(&self, http: &Client) -> Result<SecretString> {
        match self {
            Self::Bearer(token) => Ok(token.clone()),
            Self::ClientCredentials { token_url, client_id, client_secret } => {
                fetch_client_credentials_token(http, token_url, client_id, client_secret).await
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: SecretString,
    #[serde(default)]
    expires_in: Option<u64>,
}

async fn fetch_client_credentials_token(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &SecretString,
) -> Result<SecretString> {
    debug!(token_url = %token_url, client_id = %client_id, "Requesting client credentials token");

    let response = http
        .post(token_url)
        .basic_auth(client_id, Some(client_secret.expose_secret()))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| IdentityError::Auth(format!("token request to {} failed: {}", token_url, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(IdentityError::Auth(format!(
            "token endpoint returned HTTP {}: {}",
            status.as_u16(),
            body
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| IdentityError::Auth(format!("invalid token response: {}", e)))?;

    if token.access_token.is_empty() {
        return Err(IdentityError::Auth("token endpoint returned an empty access token".into()));
    }

    debug!(expires_in = ?token.expires_in, "Obtained access token");
    Ok(token.access_token)
}
