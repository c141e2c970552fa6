use std::time::Duration;

use async_trait::async_trait;
use galaxy_rbac_application::{SettingsPort, TaskPort};
use galaxy_rbac_core::{AppError, AppResult, GalaxyAuth};
use galaxy_rbac_domain::{Page, ServerSettings, Task, TaskHandle};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

mod content;
mod principals;
mod rbac;


/// Polling cadence for server-side tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPolling {
    /// Delay between two task reads.
    pub interval: Duration,
    /// Deadline for a task to reach a terminal state.
    pub timeout: Duration,
}

/// reqwest-backed client for one authenticated Galaxy session.
#[derive(Clone)]
pub struct HttpGalaxyClient {
    http_client: reqwest::Client,
    api_root: Url,
    auth: GalaxyAuth,
    polling: TaskPolling,
}

impl HttpGalaxyClient {
    /// Creates a client rooted at `api_root`, e.g. `http://localhost:5001/api/galaxy/`.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        api_root: Url,
        auth: GalaxyAuth,
        polling: TaskPolling,
    ) -> Self {
        Self {
            http_client,
            api_root: with_trailing_slash(api_root),
            auth,
            polling,
        }
    }

    /// Returns a client for the same server authenticated differently.
    #[must_use]
    pub fn with_auth(&self, auth: GalaxyAuth) -> Self {
        Self {
            auth,
            ..self.clone()
        }
    }

    /// Resolves a relative path under the API root, or an absolute href against its host.
    fn resolve(&self, path: &str) -> AppResult<Url> {
        self.api_root.join(path).map_err(|error| {
            AppError::Validation(format!("invalid API path '{path}': {error}"))
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header(ACCEPT, "application/json");

        match &self.auth {
            GalaxyAuth::Basic(credentials) => {
                builder.basic_auth(credentials.username(), Some(credentials.password()))
            }
            GalaxyAuth::Token(token) => {
                builder.header(AUTHORIZATION, format!("Token {}", token.as_str()))
            }
        }
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("{action} request failed: {error}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        Err(AppError::from_status(
            status.as_u16(),
            format!("{action} failed with status {status}: {body}"),
        ))
    }

    async fn decode<T: DeserializeOwned>(response: Response, action: &str) -> AppResult<T> {
        response.json::<T>().await.map_err(|error| {
            AppError::Internal(format!("{action} returned an unexpected body: {error}"))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, action: &str) -> AppResult<T> {
        let url = self.resolve(path)?;
        let response = self.send(self.request(Method::GET, url), action).await?;
        Self::decode(response, action).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B, action: &str) -> AppResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        let response = self
            .send(self.request(method, url).json(body), action)
            .await?;
        Self::decode(response, action).await
    }

    /// Sends a JSON body and ignores whatever the server answers with.
    async fn send_json_discarding<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        action: &str,
    ) -> AppResult<()>
    where
        B: Serialize + Sync,
    {
        let url = self.resolve(path)?;
        self.send(self.request(method, url).json(body), action)
            .await?;
        Ok(())
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        action: &str,
    ) -> AppResult<Page<T>> {
        let mut url = self.resolve(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let response = self.send(self.request(Method::GET, url), action).await?;
        Self::decode(response, action).await
    }

    /// Reads every page of a listing by following `next` links.
    async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        action: &str,
    ) -> AppResult<Vec<T>> {
        let mut page: Page<T> = self.get_page(path, query, action).await?;
        let mut rows = Vec::with_capacity(page.results.len());

        loop {
            rows.append(&mut page.results);
            let Some(next) = page.next.take() else {
                return Ok(rows);
            };
            debug!(action = %action, next = %next, "following next page");
            page = self.get_page(next.as_str(), &[], action).await?;
        }
    }

    async fn delete(&self, path: &str, action: &str) -> AppResult<Response> {
        let url = self.resolve(path)?;
        self.send(self.request(Method::DELETE, url), action).await
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(path.as_str());
    }
    url
}

#[async_trait]
impl TaskPort for HttpGalaxyClient {
    async fn wait_for_task(&self, handle: &TaskHandle) -> AppResult<Task> {
        let deadline = tokio::time::Instant::now() + self.polling.timeout;

        loop {
            let task: Task = self.get_json(handle.task.as_str(), "read task").await?;
            if task.state.is_terminal() {
                debug!(task = %task.pulp_href, state = task.state.as_str(), "task finished");
                return Ok(task);
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(AppError::Timeout(format!(
                    "task {} still '{}' after {}s",
                    task.pulp_href,
                    task.state.as_str(),
                    self.polling.timeout.as_secs_f64()
                )));
            }

            tokio::time::sleep(self.polling.interval).await;
        }
    }
}

#[async_trait]
impl SettingsPort for HttpGalaxyClient {
    async fn server_settings(&self) -> AppResult<ServerSettings> {
        self.get_json("_ui/v1/settings/", "read server settings")
            .await
    }
}
