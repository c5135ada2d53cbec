//! In-memory identity provider.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sso_console_e2e::identity::{IdentityApi, IdentityError, NewUser, Result, RoleAssignment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub population_id: String,
    /// (role id, scope id)
    pub roles: Vec<(String, String)>,
    pub groups: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct State {
    populations: HashMap<String, String>,
    groups: HashMap<String, String>,
    roles: HashMap<String, String>,
    users: BTreeMap<String, StoredUser>,
    calls: Vec<String>,
    fail_on: Option<&'static str>,
    next_id: u32,
}

/// Cheap to clone; clones share state so tests can inspect what the suite did.
#[derive(Debug, Clone, Default)]
pub struct FakeIdentityApi {
    state: Arc<Mutex<State>>,
}

impl FakeIdentityApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_population(self, name: &str, id: &str) -> Self {
        self.state.lock().unwrap().populations.insert(name.into(), id.into());
        self
    }

    pub fn with_group(self, name: &str, id: &str) -> Self {
        self.state.lock().unwrap().groups.insert(name.into(), id.into());
        self
    }

    pub fn with_role(self, name: &str, id: &str) -> Self {
        self.state.lock().unwrap().roles.insert(name.into(), id.into());
        self
    }

    /// Seed an existing user, e.g. one left over from an aborted run.
    pub fn with_user(self, username: &str, id: &str) -> Self {
        self.state.lock().unwrap().users.insert(
            id.into(),
            StoredUser {
                id: id.into(),
                username: username.into(),
                email: "stale@example.com".into(),
                population_id: "pop-1".into(),
                roles: Vec::new(),
                groups: BTreeSet::new(),
            },
        );
        self
    }

    /// Fail the named operation with an HTTP 500.
    pub fn failing_on(self, operation: &'static str) -> Self {
        self.state.lock().unwrap().fail_on = Some(operation);
        self
    }

    pub fn users(&self) -> Vec<StoredUser> {
        self.state.lock().unwrap().users.values().cloned().collect()
    }

    pub fn user_named(&self, username: &str) -> Option<StoredUser> {
        self.users().into_iter().find(|u| u.username == username)
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, operation: &'static str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation.to_string());
        if state.fail_on == Some(operation) {
            return Err(IdentityError::Status {
                operation,
                status: 500,
                body: "injected failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityApi for FakeIdentityApi {
    async fn find_population_id(&self, name: &str) -> Result<String> {
        self.record("find_population")?;
        self.state
            .lock()
            .unwrap()
            .populations
            .get(name)
            .cloned()
            .ok_or_else(|| IdentityError::not_found("population", name))
    }

    async fn find_group_id(&self, name: &str) -> Result<Option<String>> {
        self.record("find_group")?;
        Ok(self.state.lock().unwrap().groups.get(name).cloned())
    }

    async fn find_role_id(&self, name: &str) -> Result<String> {
        self.record("find_role")?;
        self.state
            .lock()
            .unwrap()
            .roles
            .get(name)
            .cloned()
            .ok_or_else(|| IdentityError::not_found("role", name))
    }

    async fn find_user_id(&self, username: &str) -> Result<Option<String>> {
        self.record("find_user")?;
        Ok(self.user_named(username).map(|u| u.id))
    }

    async fn create_user(&self, user: &NewUser) -> Result<String> {
        self.record("create_user")?;
        let mut state = self.state.lock().unwrap();
        if state.users.values().any(|u| u.username == user.username) {
            return Err(IdentityError::Status {
                operation: "create_user",
                status: 409,
                body: "username must be unique".into(),
            });
        }
        state.next_id += 1;
        let id = format!("user-{}", state.next_id);
        state.users.insert(
            id.clone(),
            StoredUser {
                id: id.clone(),
                username: user.username.clone(),
                email: user.email.clone(),
                population_id: user.population.id.clone(),
                roles: Vec::new(),
                groups: BTreeSet::new(),
            },
        );
        Ok(id)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.record("delete_user")?;
        self.state.lock().unwrap().users.remove(user_id);
        Ok(())
    }

    async fn assign_role(&self, user_id: &str, assignment: &RoleAssignment) -> Result<()> {
        self.record("assign_role")?;
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| IdentityError::not_found("user", user_id))?;
        user.roles.push((assignment.role.id.clone(), assignment.scope.id.clone()));
        Ok(())
    }

    async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<()> {
        self.record("add_user_to_group")?;
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| IdentityError::not_found("user", user_id))?;
        user.groups.insert(group_id.to_string());
        Ok(())
    }
}
