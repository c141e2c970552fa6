use galaxy_rbac_core::{AppResult, ensure};
use galaxy_rbac_domain::{
    Artifact, ContentType, NAMESPACE_OWNER_ROLE, PrincipalKind, REPOSITORY_OWNER_ROLE,
    ResourceNames,
};
use tracing::info;

use crate::{AssignRoleInput, CollectionUpload, GalaxyApi};

use super::ScenarioService;

const NAMESPACE_COMPANY: &str = "foobar";

impl ScenarioService {
    /// Granting `galaxy.ansible_repository_owner` on a repository, directly or
    /// through a team, lets the user rename that repository.
    pub(super) async fn repository_owner(&self, kind: PrincipalKind) -> AppResult<()> {
        let names = ResourceNames::random();
        let user = self.create_user_session(&names).await?;
        let role_definition = self.role_definition(REPOSITORY_OWNER_ROLE).await?;

        let repository_name = names.repository();
        let repository = self
            .admin()
            .create_repository(repository_name.as_str())
            .await?;
        info!(repository = %repository.name, href = %repository.pulp_href, "created repository");

        let input = AssignRoleInput::scoped(
            role_definition.id,
            Some(ContentType::AnsibleRepository),
            repository.repository_id()?,
        );
        self.grant_object_role(kind, &names, user.user_id, &input)
            .await?;

        let renamed = format!("{repository_name}foo");
        let handle = user
            .session
            .rename_repository(&repository, renamed.as_str())
            .await?;
        Self::await_completed(user.session.as_ref(), &handle, "repository rename").await?;

        Ok(())
    }

    /// Granting `galaxy.collection_namespace_owner` on a namespace, directly or
    /// through a team, lets the user alter the namespace and upload, update and
    /// delete collections in it.
    ///
    /// * Assumes that galaxy.collection_namespace_owner roledef exists
    /// * Assumes that galaxy.collection_namespace_owner lets the user change the
    ///   namespace's company name
    /// * Assumes having galaxy.collection_namespace_owner implies a user can upload
    /// * Assumes having galaxy.collection_namespace_owner implies a user can delete
    /// * Assumes deletion is permissible even if the namespace owner may not be able
    ///   to view a private repository that includes their collection.
    pub(super) async fn namespace_owner(&self, kind: PrincipalKind) -> AppResult<()> {
        let namespace = self.random_namespace().await?;
        let names = ResourceNames::random();
        let user = self.create_user_session(&names).await?;
        let role_definition = self.role_definition(NAMESPACE_OWNER_ROLE).await?;

        let input = AssignRoleInput::scoped(
            role_definition.id,
            Some(ContentType::Namespace),
            namespace.id.to_string(),
        );
        self.grant_object_role(kind, &names, user.user_id, &input)
            .await?;

        let updated = user
            .session
            .update_namespace_company(namespace.name.as_str(), NAMESPACE_COMPANY)
            .await?;
        if let Some(company) = updated.company.as_deref() {
            ensure(company == NAMESPACE_COMPANY, || {
                format!(
                    "namespace '{}' company is '{company}' after update",
                    namespace.name
                )
            })?;
        }

        let requires_approval = self
            .admin()
            .server_settings()
            .await?
            .requires_content_approval();
        let collection_name = ResourceNames::random_collection();
        let first = self
            .upload_as(
                user.session.as_ref(),
                &namespace.name,
                &collection_name,
                "1.0.0",
                requires_approval,
            )
            .await?;
        let second = self
            .upload_as(
                user.session.as_ref(),
                &first.namespace,
                &first.name,
                "1.0.1",
                requires_approval,
            )
            .await?;

        if requires_approval {
            let admin = self.admin();
            admin.certify_collection(&first).await?;
            admin.certify_collection(&second).await?;
            info!(collection = %first.label(), "certified both collection versions");
        }

        let handle = user.session.delete_collection_version(&second).await?;
        Self::await_completed(user.session.as_ref(), &handle, "collection version delete")
            .await?;

        let handle = user.session.delete_collection(&first).await?;
        Self::await_completed(user.session.as_ref(), &handle, "collection delete").await?;

        Ok(())
    }

    /// Grants an object-scoped role to the user directly, or to a new team the
    /// user is added to.
    async fn grant_object_role(
        &self,
        kind: PrincipalKind,
        names: &ResourceNames,
        user_id: i64,
        input: &AssignRoleInput,
    ) -> AppResult<()> {
        let admin = self.admin();

        match kind {
            PrincipalKind::User => {
                let assignment = admin.assign_user_role(user_id, input).await?;
                info!(
                    user_id,
                    assignment_id = assignment.id,
                    "assigned object role to user"
                );
            }
            PrincipalKind::Team => {
                let team = self.create_team(names).await?;
                admin.associate_team_users(team.id, &[user_id]).await?;
                let assignment = admin.assign_team_role(team.id, input).await?;
                info!(
                    team_id = team.id,
                    user_id,
                    assignment_id = assignment.id,
                    "assigned object role to team"
                );
            }
        }

        Ok(())
    }

    async fn upload_as(
        &self,
        session: &dyn GalaxyApi,
        namespace: &str,
        name: &str,
        version: &str,
        requires_approval: bool,
    ) -> AppResult<Artifact> {
        let upload = CollectionUpload {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            version: version.to_owned(),
        };
        let handle = session.upload_collection(&upload).await?;
        Self::await_completed(session, &handle, "collection import").await?;

        let artifact = Artifact {
            name: upload.name,
            namespace: upload.namespace,
            published: !requires_approval,
            version: upload.version,
        };
        info!(collection = %artifact.label(), published = artifact.published, "uploaded collection");
        Ok(artifact)
    }
}
