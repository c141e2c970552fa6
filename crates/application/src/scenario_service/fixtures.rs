use std::sync::Arc;

use galaxy_rbac_core::{AppResult, Credentials, ensure};
use galaxy_rbac_domain::{Namespace, ResourceNames, RoleDefinition, Task, TaskHandle, Team, User};
use tracing::{debug, info, warn};

use crate::{CreateUserInput, GalaxyApi};

use super::ScenarioService;

/// A freshly created user together with a session authenticated as them.
pub(super) struct UserSession {
    pub user_id: i64,
    pub session: Arc<dyn GalaxyApi>,
}

impl ScenarioService {
    pub(super) fn admin(&self) -> Arc<dyn GalaxyApi> {
        self.sessions.admin()
    }

    /// Creates the user named by `names` with the configured password.
    pub(super) async fn create_user(&self, names: &ResourceNames) -> AppResult<User> {
        let user = self
            .admin()
            .create_user(CreateUserInput {
                username: names.username().to_owned(),
                email: names.email(),
                password: self.environment.user_password.clone(),
            })
            .await?;

        info!(username = %user.username, user_id = user.id, "created user");
        Ok(user)
    }

    /// Creates a user and resolves their id through a session authenticated as them.
    pub(super) async fn create_user_session(&self, names: &ResourceNames) -> AppResult<UserSession> {
        self.create_user(names).await?;

        let credentials =
            Credentials::new(names.username(), self.environment.user_password.as_str())?;
        let session = self.sessions.login(&credentials)?;
        let me = session.me().await?;
        ensure(me.username == names.username(), || {
            format!(
                "session for '{}' reports user '{}'",
                names.username(),
                me.username
            )
        })?;

        Ok(UserSession {
            user_id: me.id,
            session,
        })
    }

    /// Creates an organization and a team inside it, both named after `names`.
    pub(super) async fn create_team(&self, names: &ResourceNames) -> AppResult<Team> {
        let admin = self.admin();
        let organization_name = names.organization();
        admin.create_organization(organization_name.as_str()).await?;

        let team = admin
            .create_team(names.team().as_str(), organization_name.as_str())
            .await?;

        info!(
            team = %team.name,
            team_id = team.id,
            group_id = team.group_id(),
            "created team"
        );
        Ok(team)
    }

    pub(super) async fn random_namespace(&self) -> AppResult<Namespace> {
        let namespace = self
            .admin()
            .create_namespace(ResourceNames::random_namespace().as_str())
            .await?;

        info!(namespace = %namespace.name, namespace_id = namespace.id, "created namespace");
        Ok(namespace)
    }

    pub(super) async fn role_definition(&self, name: &str) -> AppResult<RoleDefinition> {
        let role_definition = self.admin().find_role_definition(name).await?;
        debug!(role = %name, role_definition_id = role_definition.id, "resolved role definition");
        Ok(role_definition)
    }

    /// Waits for a task and requires it to end in `completed`.
    pub(super) async fn await_completed(
        session: &dyn GalaxyApi,
        handle: &TaskHandle,
        action: &str,
    ) -> AppResult<Task> {
        let task = session.wait_for_task(handle).await?;
        ensure(task.is_completed(), || {
            format!(
                "{action} task {} ended in state '{}' (error: {})",
                task.pulp_href,
                task.state.as_str(),
                task.error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "none".to_owned())
            )
        })?;

        debug!(action = %action, task = %task.pulp_href, "task completed");
        Ok(task)
    }

    /// Deletes an assignment, ignoring failures.
    ///
    /// Revoking through one subsystem may already have removed the resource
    /// through the other, so a failed delete is expected in some orders.
    pub(super) async fn revoke_best_effort(&self, href: &str) {
        if let Err(error) = self.admin().delete_resource(href).await {
            warn!(href = %href, error = %error, "ignored failure while revoking assignment");
        }
    }
}
