//! Wire types for the PingOne Platform API.

use serde::{Deserialize, Serialize};

use crate::config::SecretString;

/// Media type that lets a user be created together with a clear-text password.
pub const USER_IMPORT_CONTENT_TYPE: &str = "application/vnd.pingidentity.user.import+json";

/// Reference to another resource by ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

impl ResourceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A population, group or role as listed by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub id: String,
    pub name: String,
}

/// A user as listed by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserResource {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Link {
    pub href: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Links {
    #[serde(default)]
    pub next: Option<Link>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Embedded {
    #[serde(default)]
    pub populations: Vec<NamedResource>,
    #[serde(default)]
    pub groups: Vec<NamedResource>,
    #[serde(default)]
    pub roles: Vec<NamedResource>,
    #[serde(default)]
    pub users: Vec<UserResource>,
}

/// One page of a collection response (`_embedded` plus `_links.next`)
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CollectionPage {
    #[serde(rename = "_embedded", default)]
    pub embedded: Embedded,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordSpec {
    #[serde(serialize_with = "expose")]
    pub value: SecretString,
    pub force_change: bool,
}

fn expose<S: serde::Serializer>(value: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.expose_secret())
}

/// Body of a user creation request
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub name: PersonName,
    pub population: ResourceRef,
    pub username: String,
    pub password: PasswordSpec,
}

/// Created user, as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedUser {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentScope {
    pub id: String,
    #[serde(rename = "type")]
    pub scope_type: String,
}

/// Body of a role assignment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    pub role: ResourceRef,
    pub scope: AssignmentScope,
}

impl RoleAssignment {
    /// Assign `role_id` scoped to a whole environment.
    pub fn environment(role_id: impl Into<String>, environment_id: impl Into<String>) -> Self {
        Self {
            role: ResourceRef::new(role_id),
            scope: AssignmentScope { id: environment_id.into(), scope_type: "ENVIRONMENT".into() },
        }
    }
}
