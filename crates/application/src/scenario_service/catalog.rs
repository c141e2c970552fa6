use std::fmt::{Display, Formatter};
use std::str::FromStr;

use galaxy_rbac_core::AppError;
use galaxy_rbac_domain::PrincipalKind;

/// Scenarios the service can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Every native `galaxy*` role has a role definition of the same name.
    ///
    /// The server no longer aims for 1:1 parity, so this only runs on request.
    RoleDefinitionParity,
    /// An object-scoped repository owner can rename the repository.
    RepositoryOwner(PrincipalKind),
    /// An object-scoped namespace owner can edit the namespace and manage its content.
    NamespaceOwner(PrincipalKind),
    /// `galaxy.auditor` and `Platform Auditor` stay in sync for a user.
    UserPlatformAuditorSync,
    /// `galaxy.auditor` and `Platform Auditor` stay in sync for a team and its group.
    TeamPlatformAuditorSync,
    /// A user can list their own object-scoped assignment through filters.
    AssignmentFilteringAsUser,
}

impl Scenario {
    /// Returns every scenario.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Scenario] = &[
            Scenario::RoleDefinitionParity,
            Scenario::RepositoryOwner(PrincipalKind::User),
            Scenario::RepositoryOwner(PrincipalKind::Team),
            Scenario::NamespaceOwner(PrincipalKind::User),
            Scenario::NamespaceOwner(PrincipalKind::Team),
            Scenario::UserPlatformAuditorSync,
            Scenario::TeamPlatformAuditorSync,
            Scenario::AssignmentFilteringAsUser,
        ];

        ALL
    }

    /// Returns the scenarios run when none are selected explicitly.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|scenario| scenario.runs_by_default())
            .collect()
    }

    /// Returns the stable selection key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::RoleDefinitionParity => "roledefs-match-native-roles",
            Self::RepositoryOwner(PrincipalKind::User) => "repository-owner-user",
            Self::RepositoryOwner(PrincipalKind::Team) => "repository-owner-team",
            Self::NamespaceOwner(PrincipalKind::User) => "namespace-owner-user",
            Self::NamespaceOwner(PrincipalKind::Team) => "namespace-owner-team",
            Self::UserPlatformAuditorSync => "user-platform-auditor-sync",
            Self::TeamPlatformAuditorSync => "team-platform-auditor-sync",
            Self::AssignmentFilteringAsUser => "assignment-filtering-as-user",
        }
    }

    /// Returns whether the scenario is part of [`Scenario::defaults`].
    #[must_use]
    pub fn runs_by_default(&self) -> bool {
        !matches!(self, Self::RoleDefinitionParity)
    }

    pub(super) fn skipped_behind_jwt_proxy(&self) -> bool {
        matches!(
            self,
            Self::RepositoryOwner(_) | Self::NamespaceOwner(_) | Self::UserPlatformAuditorSync
        )
    }

    pub(super) fn requires_local_resource_management(&self) -> bool {
        !matches!(self, Self::RoleDefinitionParity)
    }
}

impl Display for Scenario {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.key())
    }
}

impl FromStr for Scenario {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|scenario| scenario.key() == value.trim())
            .ok_or_else(|| AppError::Validation(format!("unknown scenario '{value}'")))
    }
}

/// Result of running one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Every expectation held.
    Passed,
    /// Not applicable in this environment.
    Skipped {
        /// Why the scenario does not apply.
        reason: String,
    },
    /// An expectation or a remote call failed.
    Failed {
        /// Rendered error.
        error: String,
    },
}

impl ScenarioOutcome {
    /// Returns whether the outcome counts as a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of one scenario in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Scenario that ran.
    pub scenario: Scenario,
    /// Its outcome.
    pub outcome: ScenarioOutcome,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Scenario;

    #[test]
    fn keys_round_trip_and_are_unique() {
        let mut keys: Vec<&str> = Scenario::all().iter().map(Scenario::key).collect();
        for key in &keys {
            assert_eq!(Scenario::from_str(key).map(|scenario| scenario.key()).ok(), Some(*key));
        }

        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Scenario::all().len());
    }

    #[test]
    fn parity_check_is_opt_in() {
        assert!(!Scenario::defaults().contains(&Scenario::RoleDefinitionParity));
        assert_eq!(Scenario::defaults().len(), Scenario::all().len() - 1);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(Scenario::from_str("repository-owner-robot").is_err());
    }
}
