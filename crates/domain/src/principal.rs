use serde::Deserialize;

/// Local user account as returned by `_ui/v2/users/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address, if set.
    #[serde(default)]
    pub email: Option<String>,
}

/// Projection of the authenticated session from `_ui/v1/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Me {
    /// Identifier of the authenticated user.
    pub id: i64,
    /// Login name of the authenticated user.
    pub username: String,
}

/// Organization grouping teams.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    /// Server-assigned identifier.
    pub id: i64,
    /// Unique organization name.
    pub name: String,
}

/// Native group implicitly linked to a team.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamGroup {
    /// Group identifier used by the native role endpoints.
    pub id: i64,
}

/// Team as returned by `_ui/v2/teams/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    /// Server-assigned identifier.
    pub id: i64,
    /// Team name, unique within its organization.
    pub name: String,
    /// Owning organization identifier.
    #[serde(default)]
    pub organization: Option<i64>,
    /// Linked native group.
    pub group: TeamGroup,
}

impl Team {
    /// Returns the identifier of the linked native group.
    #[must_use]
    pub fn group_id(&self) -> i64 {
        self.group.id
    }
}

/// Kind of principal a role is granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    /// Role granted directly to a user.
    User,
    /// Role granted to a team the user belongs to.
    Team,
}

impl PrincipalKind {
    /// Returns a stable lowercase label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Team => "team",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Team;

    #[test]
    fn team_exposes_linked_group() {
        let team: Result<Team, _> = serde_json::from_value(json!({
            "id": 4,
            "name": "team_abc",
            "organization": 2,
            "group": {"id": 17, "name": "org_abc::team_abc"},
            "url": "/api/galaxy/_ui/v2/teams/4/",
        }));

        assert!(team.is_ok());
        let team = team.unwrap_or_else(|_| unreachable!());
        assert_eq!(team.group_id(), 17);
        assert_eq!(team.organization, Some(2));
    }
}
