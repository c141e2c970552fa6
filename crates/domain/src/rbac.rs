use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Role definition granting ownership of one ansible repository.
pub const REPOSITORY_OWNER_ROLE: &str = "galaxy.ansible_repository_owner";
/// Role definition granting ownership of one collection namespace.
pub const NAMESPACE_OWNER_ROLE: &str = "galaxy.collection_namespace_owner";
/// Declarative platform-wide read-only role.
pub const PLATFORM_AUDITOR_ROLE: &str = "Platform Auditor";
/// Native role mirrored to and from [`PLATFORM_AUDITOR_ROLE`].
pub const NATIVE_AUDITOR_ROLE: &str = "galaxy.auditor";

/// Declarative role definition from `_ui/v2/role_definitions/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleDefinition {
    /// Server-assigned identifier.
    pub id: i64,
    /// Unique role name.
    pub name: String,
    /// Content type the role applies to; absent for global roles.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Permission codenames bundled in the role.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Role definition granted to a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleUserAssignment {
    /// Server-assigned identifier.
    pub id: i64,
    /// Href used to revoke the assignment.
    pub url: String,
    /// Granted role definition identifier.
    pub role_definition: i64,
    /// Scoped content type, absent for global assignments.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Scoped object identifier, absent for global assignments.
    #[serde(default, deserialize_with = "object_id_from_value")]
    pub object_id: Option<String>,
    /// Grantee user identifier.
    pub user: i64,
}

/// Role definition granted to a team.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleTeamAssignment {
    /// Server-assigned identifier.
    pub id: i64,
    /// Href used to revoke the assignment.
    pub url: String,
    /// Granted role definition identifier.
    pub role_definition: i64,
    /// Scoped content type, absent for global assignments.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Scoped object identifier, absent for global assignments.
    #[serde(default, deserialize_with = "object_id_from_value")]
    pub object_id: Option<String>,
    /// Grantee team identifier.
    pub team: i64,
}

/// Native role granted to a user or group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NativeRoleAssignment {
    /// Href used to revoke the assignment.
    pub pulp_href: String,
    /// Native role name.
    pub role: String,
    /// Scoped object href; `null` for global grants.
    #[serde(default)]
    pub content_object: Option<Value>,
}

/// Native role from `pulp/api/v3/roles/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NativeRole {
    /// Native role name.
    pub name: String,
    /// Href of the role.
    #[serde(default)]
    pub pulp_href: Option<String>,
}

/// Object ids are strings on the wire but older servers emit integers.
fn object_id_from_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        Some(Value::Number(value)) => Some(value.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{NativeRoleAssignment, RoleUserAssignment};

    #[test]
    fn global_user_assignment_has_no_scope() {
        let assignment: Result<RoleUserAssignment, _> = serde_json::from_value(json!({
            "id": 9,
            "url": "/api/galaxy/_ui/v2/role_user_assignments/9/",
            "role_definition": 3,
            "content_type": null,
            "object_id": null,
            "user": 12,
            "created": "2024-05-01T10:00:00Z",
        }));

        assert!(assignment.is_ok());
        let assignment = assignment.unwrap_or_else(|_| unreachable!());
        assert!(assignment.content_type.is_none());
        assert!(assignment.object_id.is_none());
    }

    #[test]
    fn numeric_object_id_is_read_as_string() {
        let assignment: Result<RoleUserAssignment, _> = serde_json::from_value(json!({
            "id": 10,
            "url": "/api/galaxy/_ui/v2/role_user_assignments/10/",
            "role_definition": 5,
            "content_type": "galaxy.namespace",
            "object_id": 42,
            "user": 12,
        }));

        assert_eq!(
            assignment.ok().and_then(|assignment| assignment.object_id),
            Some("42".to_owned())
        );
    }

    #[test]
    fn native_assignment_accepts_null_content_object() {
        let assignment: Result<NativeRoleAssignment, _> = serde_json::from_value(json!({
            "pulp_href": "/api/galaxy/pulp/api/v3/users/12/roles/0190/",
            "role": "galaxy.auditor",
            "content_object": null,
        }));

        assert!(assignment.is_ok());
        assert_eq!(
            assignment.map(|assignment| assignment.role).unwrap_or_default(),
            "galaxy.auditor"
        );
    }
}
