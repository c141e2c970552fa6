use async_trait::async_trait;
use galaxy_rbac_application::{AssignRoleInput, AssignmentFilter, NativeRoleSubject, RbacPort};
use galaxy_rbac_core::{AppError, AppResult};
use galaxy_rbac_domain::{
    NativeRole, NativeRoleAssignment, Page, RoleDefinition, RoleTeamAssignment,
    RoleUserAssignment,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::json;

use super::HttpGalaxyClient;

const ROLE_DEFINITIONS: &str = "_ui/v2/role_definitions/";
const ROLE_USER_ASSIGNMENTS: &str = "_ui/v2/role_user_assignments/";
const ROLE_TEAM_ASSIGNMENTS: &str = "_ui/v2/role_team_assignments/";
const NATIVE_ROLES: &str = "pulp/api/v3/roles/";

/// Body of `role_user_assignments` and `role_team_assignments` posts.
#[derive(Debug, Serialize)]
struct AssignmentPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<i64>,
    role_definition: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    object_id: Option<&'a str>,
}

impl<'a> AssignmentPayload<'a> {
    fn from_input(input: &'a AssignRoleInput) -> Self {
        let scope = input.scope.as_ref();
        Self {
            user: None,
            team: None,
            role_definition: input.role_definition,
            content_type: scope
                .and_then(|scope| scope.content_type)
                .map(|content_type| content_type.as_str()),
            object_id: scope.map(|scope| scope.object_id.as_str()),
        }
    }
}

#[async_trait]
impl RbacPort for HttpGalaxyClient {
    async fn find_role_definition(&self, name: &str) -> AppResult<RoleDefinition> {
        let page: Page<RoleDefinition> = self
            .get_page(
                ROLE_DEFINITIONS,
                &[("name", name.to_owned())],
                "look up role definition",
            )
            .await?;

        page.results
            .into_iter()
            .find(|definition| definition.name == name)
            .ok_or_else(|| AppError::NotFound(format!("role definition '{name}' does not exist")))
    }

    async fn list_role_definitions(&self) -> AppResult<Vec<RoleDefinition>> {
        self.list_all(ROLE_DEFINITIONS, &[], "list role definitions")
            .await
    }

    async fn list_native_roles(&self, prefix: &str) -> AppResult<Vec<NativeRole>> {
        self.list_all(
            NATIVE_ROLES,
            &[("name__startswith", prefix.to_owned())],
            "list native roles",
        )
        .await
    }

    async fn assign_user_role(
        &self,
        user_id: i64,
        input: &AssignRoleInput,
    ) -> AppResult<RoleUserAssignment> {
        let payload = AssignmentPayload {
            user: Some(user_id),
            ..AssignmentPayload::from_input(input)
        };
        self.send_json(
            Method::POST,
            ROLE_USER_ASSIGNMENTS,
            &payload,
            "assign user role",
        )
        .await
    }

    async fn assign_team_role(
        &self,
        team_id: i64,
        input: &AssignRoleInput,
    ) -> AppResult<RoleTeamAssignment> {
        let payload = AssignmentPayload {
            team: Some(team_id),
            ..AssignmentPayload::from_input(input)
        };
        self.send_json(
            Method::POST,
            ROLE_TEAM_ASSIGNMENTS,
            &payload,
            "assign team role",
        )
        .await
    }

    async fn list_user_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> AppResult<Page<RoleUserAssignment>> {
        self.get_page(
            ROLE_USER_ASSIGNMENTS,
            &filter.query_pairs(),
            "list user role assignments",
        )
        .await
    }

    async fn list_team_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> AppResult<Page<RoleTeamAssignment>> {
        self.get_page(
            ROLE_TEAM_ASSIGNMENTS,
            &filter.query_pairs(),
            "list team role assignments",
        )
        .await
    }

    async fn grant_native_role(
        &self,
        subject: NativeRoleSubject,
        role: &str,
    ) -> AppResult<NativeRoleAssignment> {
        self.send_json(
            Method::POST,
            subject.roles_path().as_str(),
            &json!({ "content_object": null, "role": role }),
            "grant native role",
        )
        .await
    }

    async fn list_native_assignments(
        &self,
        subject: NativeRoleSubject,
    ) -> AppResult<Page<NativeRoleAssignment>> {
        self.get_page(subject.roles_path().as_str(), &[], "list native role assignments")
            .await
    }

    async fn delete_resource(&self, href: &str) -> AppResult<()> {
        self.delete(href, "delete resource").await?;
        Ok(())
    }
}
