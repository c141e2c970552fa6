use async_trait::async_trait;
use galaxy_rbac_application::{CollectionUpload, ContentPort, TaskPort};
use galaxy_rbac_core::{AppError, AppResult};
use galaxy_rbac_domain::{Artifact, Namespace, Repository, TaskHandle};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::HttpGalaxyClient;
use crate::collection_archive::build_collection_archive;

/// Task ids returned by the staging to published move endpoint.
#[derive(Debug, Deserialize)]
struct MoveResponse {
    #[serde(default)]
    copy_task_id: Option<String>,
    #[serde(default)]
    remove_task_id: Option<String>,
}

impl HttpGalaxyClient {
    /// Polls the published index until the version is served.
    async fn wait_until_published(&self, artifact: &Artifact) -> AppResult<()> {
        let deadline = tokio::time::Instant::now() + self.polling.timeout;
        let path = artifact.version_index_path();

        loop {
            let url = self.resolve(path.as_str())?;
            match self
                .send(self.request(Method::GET, url), "read published version")
                .await
            {
                Ok(_) => return Ok(()),
                Err(AppError::NotFound(_)) => {
                    debug!(collection = %artifact.label(), "version not yet published");
                }
                Err(error) => return Err(error),
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(AppError::Timeout(format!(
                    "{} not visible in published after {}s",
                    artifact.label(),
                    self.polling.timeout.as_secs_f64()
                )));
            }

            tokio::time::sleep(self.polling.interval).await;
        }
    }
}

#[async_trait]
impl ContentPort for HttpGalaxyClient {
    async fn create_repository(&self, name: &str) -> AppResult<Repository> {
        self.send_json(
            Method::POST,
            "pulp/api/v3/repositories/ansible/ansible/",
            &json!({ "name": name }),
            "create repository",
        )
        .await
    }

    async fn rename_repository(
        &self,
        repository: &Repository,
        new_name: &str,
    ) -> AppResult<TaskHandle> {
        self.send_json(
            Method::PATCH,
            repository.pulp_href.as_str(),
            &json!({ "name": new_name }),
            "rename repository",
        )
        .await
    }

    async fn create_namespace(&self, name: &str) -> AppResult<Namespace> {
        self.send_json(
            Method::POST,
            "_ui/v1/namespaces/",
            &json!({ "name": name, "groups": [] }),
            "create namespace",
        )
        .await
    }

    async fn update_namespace_company(&self, name: &str, company: &str) -> AppResult<Namespace> {
        self.send_json(
            Method::PUT,
            format!("_ui/v1/namespaces/{name}/").as_str(),
            &json!({ "name": name, "company": company }),
            "update namespace",
        )
        .await
    }

    async fn upload_collection(&self, upload: &CollectionUpload) -> AppResult<TaskHandle> {
        let archive = build_collection_archive(
            upload.namespace.as_str(),
            upload.name.as_str(),
            upload.version.as_str(),
        )?;
        debug!(
            file = %archive.file_name,
            sha256 = %archive.sha256,
            size = archive.bytes.len(),
            "built collection archive"
        );

        let file = Part::bytes(archive.bytes)
            .file_name(archive.file_name)
            .mime_str("application/gzip")
            .map_err(|error| AppError::Internal(format!("invalid archive mime type: {error}")))?;
        let form = Form::new()
            .text("sha256", archive.sha256)
            .part("file", file);

        let url = self.resolve("v3/artifacts/collections/")?;
        let response = self
            .send(
                self.request(Method::POST, url).multipart(form),
                "upload collection",
            )
            .await?;
        Self::decode(response, "upload collection").await
    }

    async fn certify_collection(&self, artifact: &Artifact) -> AppResult<()> {
        let path = format!(
            "v3/collections/{}/{}/versions/{}/move/staging/published/",
            artifact.namespace, artifact.name, artifact.version
        );
        let moved: MoveResponse = self
            .send_json(Method::POST, path.as_str(), &json!({}), "certify collection")
            .await?;

        for task_id in [moved.copy_task_id, moved.remove_task_id]
            .into_iter()
            .flatten()
        {
            let handle = TaskHandle {
                task: format!("pulp/api/v3/tasks/{task_id}/"),
            };
            let task = self.wait_for_task(&handle).await?;
            if !task.is_completed() {
                return Err(AppError::Assertion(format!(
                    "certification task {} for {} ended in state '{}'",
                    task.pulp_href,
                    artifact.label(),
                    task.state.as_str()
                )));
            }
        }

        self.wait_until_published(artifact).await?;
        info!(collection = %artifact.label(), "collection certified");
        Ok(())
    }

    async fn delete_collection_version(&self, artifact: &Artifact) -> AppResult<TaskHandle> {
        let response = self
            .delete(
                artifact.version_index_path().as_str(),
                "delete collection version",
            )
            .await?;
        Self::decode(response, "delete collection version").await
    }

    async fn delete_collection(&self, artifact: &Artifact) -> AppResult<TaskHandle> {
        let response = self
            .delete(artifact.collection_index_path().as_str(), "delete collection")
            .await?;
        Self::decode(response, "delete collection").await
    }
}
