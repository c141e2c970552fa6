//! Runs the Galaxy RBAC scenarios against a live server.

#![forbid(unsafe_code)]

mod runner_config;

use std::env;
use std::sync::Arc;

use galaxy_rbac_application::{Scenario, ScenarioOutcome, ScenarioReport, ScenarioService};
use galaxy_rbac_core::{AppError, AppResult};
use galaxy_rbac_infrastructure::HttpGalaxySessions;
use tracing::{info, warn};

use crate::runner_config::{RunnerConfig, init_tracing};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Run(Vec<Scenario>),
}

impl Command {
    fn parse<I>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        match args.as_slice() {
            [] => Ok(Self::Run(Scenario::defaults())),
            [command] if command == "list" => Ok(Self::List),
            keys => keys
                .iter()
                .map(|key| key.parse::<Scenario>())
                .collect::<AppResult<Vec<_>>>()
                .map(Self::Run),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let scenarios = match Command::parse(env::args().skip(1))? {
        Command::List => {
            for scenario in Scenario::all() {
                let marker = if scenario.runs_by_default() { "" } else { " (opt-in)" };
                println!("{}{marker}", scenario.key());
            }
            return Ok(());
        }
        Command::Run(scenarios) => scenarios,
    };

    let config = RunnerConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let sessions = HttpGalaxySessions::new(
        http_client,
        config.api_root.clone(),
        config.admin_auth.clone(),
        config.task_polling(),
    );
    let service = ScenarioService::new(Arc::new(sessions), config.environment());

    info!(
        api_root = %config.api_root,
        admin = %config.admin_auth.principal_label(),
        deployment = %config.deployment,
        jwt_proxy_in_use = config.jwt_proxy_in_use,
        scenario_count = scenarios.len(),
        "galaxy-rbac-runner started"
    );

    let reports = service.run_all(&scenarios).await;
    summarize(&reports)
}

fn summarize(reports: &[ScenarioReport]) -> AppResult<()> {
    let mut passed = 0_usize;
    let mut skipped = 0_usize;
    let mut failed = Vec::new();

    for report in reports {
        match &report.outcome {
            ScenarioOutcome::Passed => passed += 1,
            ScenarioOutcome::Skipped { .. } => skipped += 1,
            ScenarioOutcome::Failed { .. } => failed.push(report.scenario.key()),
        }
    }

    if failed.is_empty() {
        info!(passed, skipped, "all scenarios finished without failures");
        return Ok(());
    }

    warn!(passed, skipped, failed = failed.len(), "scenarios failed");
    Err(AppError::Assertion(format!(
        "failed scenarios: {}",
        failed.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use galaxy_rbac_application::{Scenario, ScenarioOutcome, ScenarioReport};
    use galaxy_rbac_core::{AppError, AppResult};

    use super::{Command, summarize};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn no_arguments_runs_default_scenarios() -> AppResult<()> {
        let command = Command::parse(args(&[]))?;

        assert_eq!(command, Command::Run(Scenario::defaults()));
        Ok(())
    }

    #[test]
    fn list_and_explicit_keys_are_parsed() -> AppResult<()> {
        assert_eq!(Command::parse(args(&["list"]))?, Command::List);
        assert_eq!(
            Command::parse(args(&["roledefs-match-native-roles", "team-platform-auditor-sync"]))?,
            Command::Run(vec![
                Scenario::RoleDefinitionParity,
                Scenario::TeamPlatformAuditorSync
            ])
        );
        Ok(())
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            Command::parse(args(&["repository-owner-group"])),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn summary_fails_when_any_scenario_failed() {
        let reports = vec![
            ScenarioReport {
                scenario: Scenario::UserPlatformAuditorSync,
                outcome: ScenarioOutcome::Passed,
            },
            ScenarioReport {
                scenario: Scenario::AssignmentFilteringAsUser,
                outcome: ScenarioOutcome::Skipped {
                    reason: "this test relies on local resource creation".to_owned(),
                },
            },
            ScenarioReport {
                scenario: Scenario::TeamPlatformAuditorSync,
                outcome: ScenarioOutcome::Failed {
                    error: "assertion failed: expected 1".to_owned(),
                },
            },
        ];

        let result = summarize(&reports);

        assert!(
            matches!(result, Err(AppError::Assertion(message)) if message == "failed scenarios: team-platform-auditor-sync")
        );
        assert!(summarize(&reports[..2]).is_ok());
    }
}
