//! Disposable test user lifecycle.
//!
//! The suite owns exactly one test identity per run. It is removed before
//! creation (to clear leftovers from an aborted run) and removed again in
//! teardown:
//!
//! ```text
//! absent -> delete (no-op) -> absent -> create -> present -> [tests] -> delete -> absent
//! ```
//!
//! Uniqueness of the username is enforced by delete-before-create, not by
//! the provider. A failure part-way through creation is not rolled back;
//! the unconditional teardown delete is the only cleanup.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::{SecretString, SuiteSettings};
use crate::identity::{
    IdentityApi, NewUser, PasswordSpec, PersonName, ResourceRef, Result, RoleAssignment,
};

/// Placeholder address given to the test user
pub const TEST_USER_EMAIL: &str = "do-not-reply@pingidentity.com";

/// Family name given to the test user
pub const TEST_USER_FAMILY_NAME: &str = "User";

/// Role granted to the test user on the environment under test
pub const TEST_USER_ROLE: &str = "Identity Data Read Only";

/// What to provision
#[derive(Debug, Clone)]
pub struct TestUserSpec {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub population_name: String,
    /// Candidate groups; missing ones are skipped
    pub group_names: Vec<String>,
    pub role_name: String,
    /// Environment the role assignment is scoped to
    pub environment_id: String,
}

impl TestUserSpec {
    pub fn from_settings(settings: &SuiteSettings, environment_id: impl Into<String>) -> Self {
        let username = settings.username();
        Self {
            given_name: username.clone(),
            username,
            password: settings.password(),
            email: TEST_USER_EMAIL.to_string(),
            family_name: TEST_USER_FAMILY_NAME.to_string(),
            population_name: settings.population_name().to_string(),
            group_names: settings.group_names(),
            role_name: TEST_USER_ROLE.to_string(),
            environment_id: environment_id.into(),
        }
    }

    fn new_user(&self, population_id: &str) -> NewUser {
        NewUser {
            email: self.email.clone(),
            name: PersonName { given: self.given_name.clone(), family: self.family_name.clone() },
            population: ResourceRef::new(population_id),
            username: self.username.clone(),
            password: PasswordSpec { value: self.password.clone(), force_change: false },
        }
    }
}

/// A group name that resolved to an ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub name: String,
    pub id: String,
}

/// The provisioned identity
#[derive(Debug, Clone, PartialEq)]
pub struct TestUser {
    pub user_id: String,
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub population_id: String,
    /// Groups the user was added to, in assignment order
    pub groups: Vec<ResolvedGroup>,
    pub role_id: String,
}

impl TestUser {
    pub fn group_ids(&self) -> BTreeSet<&str> {
        self.groups.iter().map(|g| g.id.as_str()).collect()
    }
}

/// Creates and deletes the test user through an [`IdentityApi`]
pub struct TestUserLifecycle<'a, A: IdentityApi + ?Sized> {
    api: &'a A,
    spec: TestUserSpec,
}

impl<'a, A: IdentityApi + ?Sized> TestUserLifecycle<'a, A> {
    pub fn new(api: &'a A, spec: TestUserSpec) -> Self {
        Self { api, spec }
    }

    pub fn spec(&self) -> &TestUserSpec {
        &self.spec
    }

    /// Resolve the candidate groups, skipping those that do not exist.
    pub async fn resolve_groups(&self) -> Result<Vec<ResolvedGroup>> {
        let mut groups = Vec::with_capacity(self.spec.group_names.len());
        for name in &self.spec.group_names {
            match self.api.find_group_id(name).await? {
                Some(id) => groups.push(ResolvedGroup { name: name.clone(), id }),
                None => debug!(group = %name, "Group does not exist, skipping"),
            }
        }
        Ok(groups)
    }

    /// Provision the user: population, groups, user, role, memberships.
    pub async fn create_test_user(&self) -> Result<TestUser> {
        let population_id = self.api.find_population_id(&self.spec.population_name).await?;
        let groups = self.resolve_groups().await?;

        let user_id = self.api.create_user(&self.spec.new_user(&population_id)).await?;

        let role_id = self.api.find_role_id(&self.spec.role_name).await?;
        self.api
            .assign_role(&user_id, &RoleAssignment::environment(&role_id, &self.spec.environment_id))
            .await?;

        for group in &groups {
            self.api.add_user_to_group(&user_id, &group.id).await?;
        }

        info!(
            username = %self.spec.username,
            user_id = %user_id,
            groups = groups.len(),
            skipped_groups = self.spec.group_names.len() - groups.len(),
            "Test user provisioned"
        );

        Ok(TestUser {
            user_id,
            username: self.spec.username.clone(),
            password: self.spec.password.clone(),
            email: self.spec.email.clone(),
            population_id,
            groups,
            role_id,
        })
    }

    /// Delete the user named `username` if it exists.
    ///
    /// Returns whether a user was deleted. A missing user is not an error.
    pub async fn delete_test_user(&self, username: &str) -> Result<bool> {
        match self.api.find_user_id(username).await? {
            Some(user_id) => {
                self.api.delete_user(&user_id).await?;
                info!(username = %username, user_id = %user_id, "Test user deleted");
                Ok(true)
            }
            None => {
                debug!(username = %username, "No test user to delete");
                Ok(false)
            }
        }
    }

    /// Clear any leftover user and provision a fresh one.
    pub async fn recreate_test_user(&self) -> Result<TestUser> {
        if self.delete_test_user(&self.spec.username).await? {
            info!(username = %self.spec.username, "Removed test user left over from a previous run");
        }
        self.create_test_user().await
    }
}
