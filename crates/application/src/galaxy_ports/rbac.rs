use async_trait::async_trait;

use galaxy_rbac_core::AppResult;
use galaxy_rbac_domain::{
    ContentType, NativeRole, NativeRoleAssignment, Page, RoleDefinition, RoleTeamAssignment,
    RoleUserAssignment,
};

/// Object a role assignment is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectScope {
    /// Content type of the object; inferred by the server from the role when absent.
    pub content_type: Option<ContentType>,
    /// Object identifier.
    pub object_id: String,
}

/// Input payload for granting a role definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRoleInput {
    /// Role definition identifier.
    pub role_definition: i64,
    /// Object scope; `None` grants the role globally.
    pub scope: Option<ObjectScope>,
}

impl AssignRoleInput {
    /// Grants a role definition globally.
    #[must_use]
    pub fn global(role_definition: i64) -> Self {
        Self {
            role_definition,
            scope: None,
        }
    }

    /// Grants a role definition on one object.
    #[must_use]
    pub fn scoped(
        role_definition: i64,
        content_type: Option<ContentType>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            role_definition,
            scope: Some(ObjectScope {
                content_type,
                object_id: object_id.into(),
            }),
        }
    }
}

/// Query filters for role assignment listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    /// `user__id` filter.
    pub user_id: Option<i64>,
    /// `team__id` filter.
    pub team_id: Option<i64>,
    /// `object_id` filter.
    pub object_id: Option<String>,
    /// `content_type__model` filter.
    pub content_type_model: Option<String>,
}

impl AssignmentFilter {
    /// Filters by grantee user.
    #[must_use]
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Filters by grantee team.
    #[must_use]
    pub fn for_team(team_id: i64) -> Self {
        Self {
            team_id: Some(team_id),
            ..Self::default()
        }
    }

    /// Filters by scoped object.
    #[must_use]
    pub fn for_object(object_id: impl Into<String>) -> Self {
        Self {
            object_id: Some(object_id.into()),
            ..Self::default()
        }
    }

    /// Narrows the filter to one content type model.
    #[must_use]
    pub fn with_content_type_model(mut self, model: impl Into<String>) -> Self {
        self.content_type_model = Some(model.into());
        self
    }

    /// Returns query string pairs in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(user_id) = self.user_id {
            pairs.push(("user__id", user_id.to_string()));
        }
        if let Some(team_id) = self.team_id {
            pairs.push(("team__id", team_id.to_string()));
        }
        if let Some(object_id) = &self.object_id {
            pairs.push(("object_id", object_id.clone()));
        }
        if let Some(model) = &self.content_type_model {
            pairs.push(("content_type__model", model.clone()));
        }
        pairs
    }
}

/// Holder of native role grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeRoleSubject {
    /// A user, by user id.
    User(i64),
    /// A group, by group id.
    Group(i64),
}

impl NativeRoleSubject {
    /// Returns the native roles collection path for the subject.
    #[must_use]
    pub fn roles_path(&self) -> String {
        match self {
            Self::User(id) => format!("pulp/api/v3/users/{id}/roles/"),
            Self::Group(id) => format!("pulp/api/v3/groups/{id}/roles/"),
        }
    }
}

/// Port for both permission subsystems: role definitions and native roles.
#[async_trait]
pub trait RbacPort: Send + Sync {
    /// Looks up a role definition by exact name.
    async fn find_role_definition(&self, name: &str) -> AppResult<RoleDefinition>;

    /// Lists every role definition.
    async fn list_role_definitions(&self) -> AppResult<Vec<RoleDefinition>>;

    /// Lists native roles whose name starts with `prefix`.
    async fn list_native_roles(&self, prefix: &str) -> AppResult<Vec<NativeRole>>;

    /// Grants a role definition to a user.
    async fn assign_user_role(
        &self,
        user_id: i64,
        input: &AssignRoleInput,
    ) -> AppResult<RoleUserAssignment>;

    /// Grants a role definition to a team.
    async fn assign_team_role(
        &self,
        team_id: i64,
        input: &AssignRoleInput,
    ) -> AppResult<RoleTeamAssignment>;

    /// Lists user role assignments visible to the session.
    async fn list_user_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> AppResult<Page<RoleUserAssignment>>;

    /// Lists team role assignments visible to the session.
    async fn list_team_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> AppResult<Page<RoleTeamAssignment>>;

    /// Grants a native role globally.
    async fn grant_native_role(
        &self,
        subject: NativeRoleSubject,
        role: &str,
    ) -> AppResult<NativeRoleAssignment>;

    /// Lists native role grants of a subject.
    async fn list_native_assignments(
        &self,
        subject: NativeRoleSubject,
    ) -> AppResult<Page<NativeRoleAssignment>>;

    /// Deletes the resource at `href`; used for revoking either kind of assignment.
    async fn delete_resource(&self, href: &str) -> AppResult<()>;
}
