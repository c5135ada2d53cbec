//! Identity provider management API.
//!
//! The suite talks to the provider through the [`IdentityApi`] trait:
//! population, group, role and user lookups, user creation and deletion,
//! and role/group assignment. [`PingOneClient`] implements it over the
//! PingOne Platform API with a client-credentials worker token.
//!
//! ```rust,ignore
//! let client = PingOneClient::connect(&settings.identity, &descriptor.environment_id).await?;
//! let population_id = client.find_population_id("acme").await?;
//! ```

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use auth::IdentityCredentials;
pub use client::{IdentityApi, PingOneClient};
pub use endpoints::EnvironmentEndpoints;
pub use error::{IdentityError, Result};
pub use models::{NewUser, PasswordSpec, PersonName, ResourceRef, RoleAssignment};
