use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use galaxy_rbac_core::{AppError, AppResult};
use tracing::{info, warn};

use crate::GalaxySessions;

mod assignment_visibility;
mod catalog;
mod fixtures;
mod object_owner;
mod parity;
mod role_sync;


pub use catalog::{Scenario, ScenarioOutcome, ScenarioReport};

/// Deployment flavor of the server under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentMode {
    /// Self-hosted single node with local user management.
    Standalone,
    /// Public community instance backed by an external identity provider.
    Community,
    /// Hosted service behind a gateway.
    Insights,
}

impl DeploymentMode {
    /// Returns the configuration value for this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::Community => "community",
            Self::Insights => "insights",
        }
    }
}

impl Display for DeploymentMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standalone" => Ok(Self::Standalone),
            "community" => Ok(Self::Community),
            "insights" => Ok(Self::Insights),
            other => Err(AppError::Validation(format!(
                "unknown deployment mode '{other}', expected standalone, community or insights"
            ))),
        }
    }
}

/// Facts about the environment the scenarios run in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEnvironment {
    /// Deployment flavor of the server.
    pub deployment: DeploymentMode,
    /// Requests pass through a JWT-issuing proxy that replaces basic auth.
    pub jwt_proxy_in_use: bool,
    /// Password given to every user a scenario creates.
    pub user_password: String,
}

/// Runs RBAC scenarios against one server.
#[derive(Clone)]
pub struct ScenarioService {
    sessions: Arc<dyn GalaxySessions>,
    environment: ScenarioEnvironment,
}

impl ScenarioService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(sessions: Arc<dyn GalaxySessions>, environment: ScenarioEnvironment) -> Self {
        Self {
            sessions,
            environment,
        }
    }

    /// Runs one scenario. Unmet gates yield [`ScenarioOutcome::Skipped`].
    pub async fn run(&self, scenario: Scenario) -> AppResult<ScenarioOutcome> {
        if let Some(reason) = self.skip_reason(scenario).await? {
            return Ok(ScenarioOutcome::Skipped { reason });
        }

        match scenario {
            Scenario::RoleDefinitionParity => self.roledefs_match_native_roles().await?,
            Scenario::RepositoryOwner(kind) => self.repository_owner(kind).await?,
            Scenario::NamespaceOwner(kind) => self.namespace_owner(kind).await?,
            Scenario::UserPlatformAuditorSync => self.user_platform_auditor_sync().await?,
            Scenario::TeamPlatformAuditorSync => self.team_platform_auditor_sync().await?,
            Scenario::AssignmentFilteringAsUser => self.assignment_filtering_as_user().await?,
        }

        Ok(ScenarioOutcome::Passed)
    }

    /// Runs scenarios one after another and reports each outcome.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioReport> {
        let mut reports = Vec::with_capacity(scenarios.len());

        for &scenario in scenarios {
            info!(scenario = %scenario, "scenario started");
            let outcome = match self.run(scenario).await {
                Ok(outcome) => outcome,
                Err(error) => ScenarioOutcome::Failed {
                    error: error.to_string(),
                },
            };

            match &outcome {
                ScenarioOutcome::Passed => info!(scenario = %scenario, "scenario passed"),
                ScenarioOutcome::Skipped { reason } => {
                    info!(scenario = %scenario, reason = %reason, "scenario skipped");
                }
                ScenarioOutcome::Failed { error } => {
                    warn!(scenario = %scenario, error = %error, "scenario failed");
                }
            }

            reports.push(ScenarioReport { scenario, outcome });
        }

        reports
    }

    async fn skip_reason(&self, scenario: Scenario) -> AppResult<Option<String>> {
        if self.environment.deployment != DeploymentMode::Standalone {
            return Ok(Some(format!(
                "requires a standalone deployment, server is {}",
                self.environment.deployment
            )));
        }

        if scenario.skipped_behind_jwt_proxy() && self.environment.jwt_proxy_in_use {
            return Ok(Some("Skipped because jwt proxy is in use".to_owned()));
        }

        if scenario.requires_local_resource_management() {
            let settings = self.sessions.admin().server_settings().await?;
            if !settings.allows_local_resource_management() {
                return Ok(Some("this test relies on local resource creation".to_owned()));
            }
        }

        Ok(None)
    }
}
