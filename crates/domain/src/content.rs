use galaxy_rbac_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::href_resource_id;

const PUBLISHED_INDEX: &str = "v3/plugin/ansible/content/published/collections/index";

/// Collection namespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Namespace {
    /// Server-assigned identifier.
    pub id: i64,
    /// Unique namespace name.
    pub name: String,
    /// Company attribute shown on the namespace page.
    #[serde(default)]
    pub company: Option<String>,
}

/// Ansible content repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// Canonical href, ending with the repository identifier.
    pub pulp_href: String,
}

impl Repository {
    /// Returns the identifier embedded in the repository href.
    pub fn repository_id(&self) -> AppResult<&str> {
        href_resource_id(self.pulp_href.as_str())
    }
}

/// Content types an object-scoped role assignment can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// An ansible content repository.
    AnsibleRepository,
    /// A collection namespace.
    Namespace,
}

impl ContentType {
    /// Returns the `app_label.model` value used in assignment payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnsibleRepository => "galaxy.ansiblerepository",
            Self::Namespace => "galaxy.namespace",
        }
    }

    /// Returns the model part used by the `content_type__model` filter.
    #[must_use]
    pub fn model(&self) -> &'static str {
        match self {
            Self::AnsibleRepository => "ansiblerepository",
            Self::Namespace => "namespace",
        }
    }
}

/// Uploaded collection version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Collection name.
    pub name: String,
    /// Owning namespace name.
    pub namespace: String,
    /// Whether the version landed directly in the published repository.
    pub published: bool,
    /// Semantic version string.
    pub version: String,
}

impl Artifact {
    /// Returns the published index path of this version.
    #[must_use]
    pub fn version_index_path(&self) -> String {
        format!(
            "{PUBLISHED_INDEX}/{}/{}/versions/{}/",
            self.namespace, self.name, self.version
        )
    }

    /// Returns the published index path of the whole collection.
    #[must_use]
    pub fn collection_index_path(&self) -> String {
        format!("{PUBLISHED_INDEX}/{}/{}/", self.namespace, self.name)
    }

    /// Returns `namespace.name:version` for logs.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}.{}:{}", self.namespace, self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::{Artifact, ContentType, Repository};

    #[test]
    fn artifact_paths_point_at_published_index() {
        let artifact = Artifact {
            name: "tools".to_owned(),
            namespace: "namespace_1".to_owned(),
            published: true,
            version: "1.0.1".to_owned(),
        };

        assert_eq!(
            artifact.version_index_path(),
            "v3/plugin/ansible/content/published/collections/index/namespace_1/tools/versions/1.0.1/"
        );
        assert_eq!(
            artifact.collection_index_path(),
            "v3/plugin/ansible/content/published/collections/index/namespace_1/tools/"
        );
    }

    #[test]
    fn repository_id_comes_from_href() {
        let repository = Repository {
            name: "repo_1".to_owned(),
            pulp_href: "/api/galaxy/pulp/api/v3/repositories/ansible/ansible/abc-123/".to_owned(),
        };

        assert_eq!(repository.repository_id().unwrap_or_default(), "abc-123");
    }

    #[test]
    fn content_type_model_is_the_label_suffix() {
        for content_type in [ContentType::AnsibleRepository, ContentType::Namespace] {
            assert!(content_type.as_str().ends_with(content_type.model()));
        }
    }
}
