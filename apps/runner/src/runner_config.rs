use std::env;
use std::time::Duration;

use galaxy_rbac_application::{DeploymentMode, ScenarioEnvironment};
use galaxy_rbac_core::{AppError, AppResult, Credentials, GalaxyAuth, NonEmptyString};
use galaxy_rbac_infrastructure::TaskPolling;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_API_ROOT: &str = "http://localhost:5001/api/galaxy/";
const DEFAULT_USER_PASSWORD: &str = "redhat1234";

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub api_root: Url,
    pub admin_auth: GalaxyAuth,
    pub user_password: String,
    pub deployment: DeploymentMode,
    pub jwt_proxy_in_use: bool,
    pub request_timeout_seconds: u64,
    pub task_poll_interval_ms: u64,
    pub task_timeout_seconds: u64,
}

impl RunnerConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup, e.g. the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_root_value =
            optional_value(&lookup, "GALAXY_API_ROOT").unwrap_or_else(|| DEFAULT_API_ROOT.to_owned());
        let api_root = Url::parse(api_root_value.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid GALAXY_API_ROOT '{api_root_value}': {error}"))
        })?;

        let admin_auth = match optional_value(&lookup, "GALAXY_ADMIN_TOKEN") {
            Some(token) => GalaxyAuth::Token(NonEmptyString::new(token)?),
            None => GalaxyAuth::Basic(Credentials::new(
                optional_value(&lookup, "GALAXY_ADMIN_USERNAME")
                    .unwrap_or_else(|| "admin".to_owned()),
                optional_value(&lookup, "GALAXY_ADMIN_PASSWORD")
                    .unwrap_or_else(|| "admin".to_owned()),
            )?),
        };

        let user_password = optional_value(&lookup, "GALAXY_USER_PASSWORD")
            .unwrap_or_else(|| DEFAULT_USER_PASSWORD.to_owned());
        let deployment = optional_value(&lookup, "GALAXY_DEPLOYMENT_MODE")
            .map(|value| value.parse::<DeploymentMode>())
            .transpose()?
            .unwrap_or(DeploymentMode::Standalone);
        let jwt_proxy_in_use = lookup("JWT_PROXY").is_some();

        let request_timeout_seconds =
            parse_positive_u64(&lookup, "GALAXY_REQUEST_TIMEOUT_SECONDS", 30)?;
        let task_poll_interval_ms =
            parse_positive_u64(&lookup, "GALAXY_TASK_POLL_INTERVAL_MS", 1000)?;
        let task_timeout_seconds = parse_positive_u64(&lookup, "GALAXY_TASK_TIMEOUT_SECONDS", 300)?;

        Ok(Self {
            api_root,
            admin_auth,
            user_password,
            deployment,
            jwt_proxy_in_use,
            request_timeout_seconds,
            task_poll_interval_ms,
            task_timeout_seconds,
        })
    }

    pub fn environment(&self) -> ScenarioEnvironment {
        ScenarioEnvironment {
            deployment: self.deployment,
            jwt_proxy_in_use: self.jwt_proxy_in_use,
            user_password: self.user_password.clone(),
        }
    }

    pub fn task_polling(&self) -> TaskPolling {
        TaskPolling {
            interval: Duration::from_millis(self.task_poll_interval_ms),
            timeout: Duration::from_secs(self.task_timeout_seconds),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_value<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_positive_u64<F>(lookup: &F, name: &str, default: u64) -> AppResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match optional_value(lookup, name) {
        Some(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        })?,
        None => default,
    };

    if value == 0 {
        return Err(AppError::Validation(format!(
            "{name} must be greater than zero"
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use galaxy_rbac_application::DeploymentMode;
    use galaxy_rbac_core::{AppError, AppResult, GalaxyAuth};

    use super::RunnerConfig;

    fn load(pairs: &[(&str, &str)]) -> AppResult<RunnerConfig> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        RunnerConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_target_local_standalone_server() -> AppResult<()> {
        let config = load(&[])?;

        assert_eq!(config.api_root.as_str(), "http://localhost:5001/api/galaxy/");
        assert_eq!(config.deployment, DeploymentMode::Standalone);
        assert!(!config.jwt_proxy_in_use);
        assert_eq!(config.user_password, "redhat1234");
        assert_eq!(config.task_polling().interval, Duration::from_secs(1));
        assert_eq!(config.task_polling().timeout, Duration::from_secs(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(
            matches!(&config.admin_auth, GalaxyAuth::Basic(credentials) if credentials.username() == "admin")
        );
        Ok(())
    }

    #[test]
    fn admin_token_takes_precedence_over_basic_credentials() -> AppResult<()> {
        let config = load(&[
            ("GALAXY_ADMIN_TOKEN", "abc123"),
            ("GALAXY_ADMIN_USERNAME", "root"),
        ])?;

        assert!(matches!(&config.admin_auth, GalaxyAuth::Token(token) if token.as_str() == "abc123"));
        Ok(())
    }

    #[test]
    fn jwt_proxy_presence_is_enough_to_gate() -> AppResult<()> {
        let config = load(&[("JWT_PROXY", "")])?;

        assert!(config.jwt_proxy_in_use);
        assert!(config.environment().jwt_proxy_in_use);
        Ok(())
    }

    #[test]
    fn deployment_mode_is_parsed() -> AppResult<()> {
        let config = load(&[("GALAXY_DEPLOYMENT_MODE", "Community")])?;
        assert_eq!(config.environment().deployment, DeploymentMode::Community);

        assert!(matches!(
            load(&[("GALAXY_DEPLOYMENT_MODE", "cloud")]),
            Err(AppError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn zero_or_malformed_durations_are_rejected() {
        assert!(matches!(
            load(&[("GALAXY_TASK_POLL_INTERVAL_MS", "0")]),
            Err(AppError::Validation(message)) if message.contains("greater than zero")
        ));
        assert!(matches!(
            load(&[("GALAXY_TASK_TIMEOUT_SECONDS", "soon")]),
            Err(AppError::Validation(message)) if message.contains("GALAXY_TASK_TIMEOUT_SECONDS")
        ));
    }

    #[test]
    fn invalid_api_root_is_rejected() {
        assert!(matches!(
            load(&[("GALAXY_API_ROOT", "not a url")]),
            Err(AppError::Validation(_))
        ));
    }
}
