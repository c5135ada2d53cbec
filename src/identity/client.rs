//! Identity API client trait and the PingOne HTTP implementation.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn, Instrument};

use super::auth::IdentityCredentials;
use super::endpoints::EnvironmentEndpoints;
use super::error::{IdentityError, Result};
use super::models::{
    CollectionPage, CreatedUser, Embedded, NamedResource, NewUser, ResourceRef, RoleAssignment,
    USER_IMPORT_CONTENT_TYPE,
};
use crate::config::{IdentityApiSettings, SecretString};
use crate::identity_span;

/// Upper bound on followed `_links.next` pages per listing
const MAX_PAGES: usize = 50;

/// Calls the suite makes against the identity provider.
///
/// Lookups that may legitimately miss return `Option`; lookups the suite
/// cannot proceed without return [`IdentityError::NotFound`].
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Resolve a population ID by exact name.
    async fn find_population_id(&self, name: &str) -> Result<String>;

    /// Resolve a group ID by exact name, `None` if the group does not exist.
    async fn find_group_id(&self, name: &str) -> Result<Option<String>>;

    /// Resolve a role ID by exact name.
    async fn find_role_id(&self, name: &str) -> Result<String>;

    /// Look a user up by exact username, `None` if absent.
    async fn find_user_id(&self, username: &str) -> Result<Option<String>>;

    /// Create a user and return its ID.
    async fn create_user(&self, user: &NewUser) -> Result<String>;

    /// Delete a user by ID.
    async fn delete_user(&self, user_id: &str) -> Result<()>;

    /// Grant a role to a user.
    async fn assign_role(&self, user_id: &str, assignment: &RoleAssignment) -> Result<()>;

    /// Add a user to a group.
    async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<()>;
}

/// PingOne Platform API client bound to one environment and one access token
pub struct PingOneClient {
    http: Client,
    endpoints: EnvironmentEndpoints,
    token: SecretString,
}

impl std::fmt::Debug for PingOneClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingOneClient")
            .field("endpoints", &self.endpoints)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl PingOneClient {
    /// Build an HTTP client from settings, obtain a worker token and bind to `environment_id`.
    pub async fn connect(settings: &IdentityApiSettings, environment_id: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(|e| IdentityError::Client(format!("Failed to build HTTP client: {}", e)))?;

        let endpoints = EnvironmentEndpoints::new(&settings.api_location, environment_id);
        let credentials = IdentityCredentials::from_settings(settings);
        Self::authenticate(http, endpoints, &credentials).await
    }

    /// Resolve `credentials` to a token over `http`.
    pub async fn authenticate(
        http: Client,
        endpoints: EnvironmentEndpoints,
        credentials: &IdentityCredentials,
    ) -> Result<Self> {
        let token = credentials.access_token(&http).await?;
        info!(environment_id = %endpoints.environment_id(), "Identity API session established");
        Ok(Self { http, endpoints, token })
    }

    /// Client over a pre-built HTTP client and token.
    pub fn with_token(http: Client, endpoints: EnvironmentEndpoints, token: SecretString) -> Self {
        Self { http, endpoints, token }
    }

    pub fn endpoints(&self) -> &EnvironmentEndpoints {
        &self.endpoints
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(|source| IdentityError::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Status { operation, status: status.as_u16(), body });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(operation, request).await?;
        response.json().await.map_err(|e| IdentityError::decode(operation, e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        url: &str,
        body: &B,
    ) -> Result<Response> {
        self.send(operation, self.http.post(url).json(body)).await
    }

    /// Fetch every page of a collection, optionally filtered.
    async fn list(
        &self,
        operation: &'static str,
        url: &str,
        filter: Option<&str>,
    ) -> Result<Vec<Embedded>> {
        let mut request = self.http.get(url);
        if let Some(filter) = filter {
            request = request.query(&[("filter", filter)]);
        }

        let mut pages = Vec::new();
        let mut page: CollectionPage = self.get_json(operation, request).await?;
        loop {
            let next = page.links.next.take().map(|link| link.href);
            pages.push(page.embedded);
            match next {
                Some(href) if pages.len() < MAX_PAGES => {
                    page = self.get_json(operation, self.http.get(&href)).await?;
                }
                Some(href) => {
                    warn!(
                        operation = %operation,
                        max_pages = MAX_PAGES,
                        next = %href,
                        "Page limit reached, remaining results ignored"
                    );
                    break;
                }
                None => break,
            }
        }
        Ok(pages)
    }
}

fn first_named(resources: Vec<NamedResource>, name: &str) -> Option<String> {
    resources.into_iter().find(|r| r.name == name).map(|r| r.id)
}

impl PingOneClient {
    async fn lookup_population(&self, name: &str) -> Result<String> {
        let pages = self.list("find_population", &self.endpoints.populations(), None).await?;
        first_named(pages.into_iter().flat_map(|p| p.populations).collect(), name)
            .ok_or_else(|| IdentityError::not_found("population", name))
    }

    async fn lookup_group(&self, name: &str) -> Result<Option<String>> {
        let filter = format!("name eq \"{}\"", name);
        let pages = self.list("find_group", &self.endpoints.groups(), Some(&filter)).await?;
        let id = first_named(pages.into_iter().flat_map(|p| p.groups).collect(), name);
        debug!(found = id.is_some(), "Group lookup finished");
        Ok(id)
    }

    async fn lookup_role(&self, name: &str) -> Result<String> {
        let pages = self.list("find_role", &self.endpoints.roles(), None).await?;
        first_named(pages.into_iter().flat_map(|p| p.roles).collect(), name)
            .ok_or_else(|| IdentityError::not_found("role", name))
    }

    async fn lookup_user(&self, username: &str) -> Result<Option<String>> {
        let filter = format!("username eq \"{}\"", username);
        let pages = self.list("find_user", &self.endpoints.users(), Some(&filter)).await?;
        Ok(pages.into_iter().flat_map(|p| p.users).find(|u| u.username == username).map(|u| u.id))
    }

    async fn post_user(&self, user: &NewUser) -> Result<String> {
        let body = serde_json::to_vec(user)
            .map_err(|e| IdentityError::decode("create_user", e.to_string()))?;
        let request = self
            .http
            .post(self.endpoints.users())
            .header(CONTENT_TYPE, USER_IMPORT_CONTENT_TYPE)
            .body(body);
        let created: CreatedUser = self.get_json("create_user", request).await?;
        info!(user_id = %created.id, "User created");
        Ok(created.id)
    }

    async fn remove_user(&self, user_id: &str) -> Result<()> {
        match self.send("delete_user", self.http.delete(self.endpoints.user(user_id))).await {
            Ok(_) => {
                info!("User deleted");
                Ok(())
            }
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND.as_u16()) => {
                debug!("User already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl IdentityApi for PingOneClient {
    async fn find_population_id(&self, name: &str) -> Result<String> {
        self.lookup_population(name)
            .instrument(identity_span!("find_population", population = %name))
            .await
    }

    async fn find_group_id(&self, name: &str) -> Result<Option<String>> {
        self.lookup_group(name).instrument(identity_span!("find_group", group = %name)).await
    }

    async fn find_role_id(&self, name: &str) -> Result<String> {
        self.lookup_role(name).instrument(identity_span!("find_role", role = %name)).await
    }

    async fn find_user_id(&self, username: &str) -> Result<Option<String>> {
        self.lookup_user(username).instrument(identity_span!("find_user", username = %username)).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<String> {
        self.post_user(user).instrument(identity_span!("create_user", username = %user.username)).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.remove_user(user_id).instrument(identity_span!("delete_user", user_id = %user_id)).await
    }

    async fn assign_role(&self, user_id: &str, assignment: &RoleAssignment) -> Result<()> {
        let url = self.endpoints.user_role_assignments(user_id);
        self.post_json("assign_role", &url, assignment)
            .instrument(identity_span!(
                "assign_role",
                user_id = %user_id,
                role_id = %assignment.role.id
            ))
            .await
            .map(|_| ())
    }

    async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<()> {
        let url = self.endpoints.user_group_memberships(user_id);
        self.post_json("add_user_to_group", &url, &ResourceRef::new(group_id))
            .instrument(identity_span!("add_user_to_group", user_id = %user_id, group_id = %group_id))
            .await
            .map(|_| ())
    }
}
