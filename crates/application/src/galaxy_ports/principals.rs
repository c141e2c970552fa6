use async_trait::async_trait;

use galaxy_rbac_core::AppResult;
use galaxy_rbac_domain::{Me, Organization, Team, User};

/// Input payload for creating a local user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// Port for user, organization and team administration.
#[async_trait]
pub trait PrincipalPort: Send + Sync {
    /// Creates a local user.
    async fn create_user(&self, input: CreateUserInput) -> AppResult<User>;

    /// Returns the user the session is authenticated as.
    async fn me(&self) -> AppResult<Me>;

    /// Creates an organization.
    async fn create_organization(&self, name: &str) -> AppResult<Organization>;

    /// Creates a team inside the named organization.
    async fn create_team(&self, name: &str, organization_name: &str) -> AppResult<Team>;

    /// Adds users to a team.
    async fn associate_team_users(&self, team_id: i64, user_ids: &[i64]) -> AppResult<()>;
}
