use galaxy_rbac_core::{AppResult, ensure};
use galaxy_rbac_domain::{NATIVE_AUDITOR_ROLE, PLATFORM_AUDITOR_ROLE, Page, ResourceNames};
use tracing::info;

use crate::{AssignRoleInput, AssignmentFilter, NativeRoleSubject};

use super::ScenarioService;

impl ScenarioService {
    /// Native and declarative auditor roles mirror each other for a user.
    ///
    /// * when given the galaxy.auditor role, the "Platform Auditor" roledef
    ///   should also be granted automatically,
    /// * when revoking the galaxy.auditor role, the "Platform Auditor" roledef
    ///   should also be revoked automatically,
    /// * when given the "Platform Auditor" roledef the galaxy.auditor role
    ///   should also be granted automatically,
    /// * when revoking the "Platform Auditor" roledef the galaxy.auditor role
    ///   should also be revoked automatically.
    pub(super) async fn user_platform_auditor_sync(&self) -> AppResult<()> {
        let admin = self.admin();
        let auditor = self.role_definition(PLATFORM_AUDITOR_ROLE).await?;
        let user = self.create_user(&ResourceNames::random()).await?;
        let subject = NativeRoleSubject::User(user.id);
        let filter = AssignmentFilter::for_user(user.id);

        // native => declarative
        let native = admin.grant_native_role(subject, NATIVE_AUDITOR_ROLE).await?;
        info!(user_id = user.id, href = %native.pulp_href, "granted native auditor role");

        let assignments = admin.list_user_assignments(&filter).await?;
        expect_count(&assignments, 1, "role definition assignments after native grant")?;
        let role_definition = assignments.first().map(|assignment| assignment.role_definition);
        expect_role_definition(role_definition, auditor.id)?;

        self.revoke_best_effort(native.pulp_href.as_str()).await;
        let assignments = admin.list_user_assignments(&filter).await?;
        expect_count(&assignments, 0, "role definition assignments after native revoke")?;

        // declarative => native
        let assignment = admin
            .assign_user_role(user.id, &AssignRoleInput::global(auditor.id))
            .await?;
        info!(user_id = user.id, href = %assignment.url, "assigned platform auditor");

        let native_assignments = admin.list_native_assignments(subject).await?;
        expect_count(&native_assignments, 1, "native roles after role definition grant")?;
        expect_native_role(native_assignments.first().map(|grant| grant.role.as_str()))?;

        self.revoke_best_effort(assignment.url.as_str()).await;
        let native_assignments = admin.list_native_assignments(subject).await?;
        expect_count(&native_assignments, 0, "native roles after role definition revoke")
    }

    /// Native group roles and declarative team roles mirror each other.
    ///
    /// Same expectations as the user variant, with the team's linked group
    /// holding the native role.
    pub(super) async fn team_platform_auditor_sync(&self) -> AppResult<()> {
        let admin = self.admin();
        let auditor = self.role_definition(PLATFORM_AUDITOR_ROLE).await?;
        let team = self.create_team(&ResourceNames::random()).await?;
        let subject = NativeRoleSubject::Group(team.group_id());
        let filter = AssignmentFilter::for_team(team.id);

        // native => declarative
        let native = admin.grant_native_role(subject, NATIVE_AUDITOR_ROLE).await?;
        info!(group_id = team.group_id(), href = %native.pulp_href, "granted native auditor role");

        let assignments = admin.list_team_assignments(&filter).await?;
        expect_count(&assignments, 1, "team role definition assignments after native grant")?;
        let role_definition = assignments.first().map(|assignment| assignment.role_definition);
        expect_role_definition(role_definition, auditor.id)?;

        self.revoke_best_effort(native.pulp_href.as_str()).await;
        let assignments = admin.list_team_assignments(&filter).await?;
        expect_count(&assignments, 0, "team role definition assignments after native revoke")?;

        // declarative => native
        let assignment = admin
            .assign_team_role(team.id, &AssignRoleInput::global(auditor.id))
            .await?;
        info!(team_id = team.id, href = %assignment.url, "assigned platform auditor");

        let native_assignments = admin.list_native_assignments(subject).await?;
        expect_count(&native_assignments, 1, "group native roles after role definition grant")?;
        expect_native_role(native_assignments.first().map(|grant| grant.role.as_str()))?;

        self.revoke_best_effort(assignment.url.as_str()).await;
        let native_assignments = admin.list_native_assignments(subject).await?;
        expect_count(&native_assignments, 0, "group native roles after role definition revoke")
    }
}

fn expect_count<T>(page: &Page<T>, expected: u64, what: &str) -> AppResult<()> {
    ensure(page.count == expected, || {
        format!("expected {expected} {what}, found {}", page.count)
    })
}

fn expect_role_definition(actual: Option<i64>, expected: i64) -> AppResult<()> {
    ensure(actual == Some(expected), || {
        format!("expected role definition {expected}, found {actual:?}")
    })
}

fn expect_native_role(actual: Option<&str>) -> AppResult<()> {
    ensure(actual == Some(NATIVE_AUDITOR_ROLE), || {
        format!("expected native role '{NATIVE_AUDITOR_ROLE}', found {actual:?}")
    })
}
