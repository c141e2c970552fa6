use async_trait::async_trait;

use galaxy_rbac_core::AppResult;
use galaxy_rbac_domain::{Artifact, Namespace, Repository, TaskHandle};

/// Collection version to build and upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionUpload {
    /// Target namespace name.
    pub namespace: String,
    /// Collection name.
    pub name: String,
    /// Semantic version.
    pub version: String,
}

/// Port for repositories, namespaces and collection content.
#[async_trait]
pub trait ContentPort: Send + Sync {
    /// Creates an ansible repository.
    async fn create_repository(&self, name: &str) -> AppResult<Repository>;

    /// Renames a repository; the change runs as a task.
    async fn rename_repository(
        &self,
        repository: &Repository,
        new_name: &str,
    ) -> AppResult<TaskHandle>;

    /// Creates a namespace with no owning groups.
    async fn create_namespace(&self, name: &str) -> AppResult<Namespace>;

    /// Replaces the namespace's company attribute.
    async fn update_namespace_company(&self, name: &str, company: &str) -> AppResult<Namespace>;

    /// Builds and uploads a collection archive; the import runs as a task.
    async fn upload_collection(&self, upload: &CollectionUpload) -> AppResult<TaskHandle>;

    /// Moves a staged version to the published repository and waits until it is visible.
    async fn certify_collection(&self, artifact: &Artifact) -> AppResult<()>;

    /// Deletes one published collection version.
    async fn delete_collection_version(&self, artifact: &Artifact) -> AppResult<TaskHandle>;

    /// Deletes a published collection with all its versions.
    async fn delete_collection(&self, artifact: &Artifact) -> AppResult<TaskHandle>;
}
