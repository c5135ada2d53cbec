//! URL layout of the identity API for one environment.

/// Endpoint builder scoped to an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentEndpoints {
    api_location: String,
    environment_id: String,
}

impl EnvironmentEndpoints {
    pub fn new(api_location: impl Into<String>, environment_id: impl Into<String>) -> Self {
        let api_location = api_location.into().trim_end_matches('/').to_string();
        Self { api_location, environment_id: environment_id.into() }
    }

    pub fn environment_id(&self) -> &str {
        &self.environment_id
    }

    pub fn environment(&self) -> String {
        format!("{}/environments/{}", self.api_location, self.environment_id)
    }

    pub fn populations(&self) -> String {
        format!("{}/populations", self.environment())
    }

    pub fn groups(&self) -> String {
        format!("{}/groups", self.environment())
    }

    /// Roles are platform-wide, not per environment.
    pub fn roles(&self) -> String {
        format!("{}/roles", self.api_location)
    }

    pub fn users(&self) -> String {
        format!("{}/users", self.environment())
    }

    pub fn user(&self, user_id: &str) -> String {
        format!("{}/{}", self.users(), user_id)
    }

    pub fn user_role_assignments(&self, user_id: &str) -> String {
        format!("{}/roleAssignments", self.user(user_id))
    }

    pub fn user_group_memberships(&self, user_id: &str) -> String {
        format!("{}/memberOfGroups", self.user(user_id))
    }
}
