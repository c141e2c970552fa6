use galaxy_rbac_core::{AppResult, ensure};
use galaxy_rbac_domain::{ContentType, NAMESPACE_OWNER_ROLE, ResourceNames};
use tracing::info;

use crate::{AssignRoleInput, AssignmentFilter};

use super::ScenarioService;

impl ScenarioService {
    /// A namespace owner can find their own assignment through the filtered
    /// listing while authenticated as themselves.
    ///
    /// * This assumes there is a galaxy.collection_namespace_owner roledef
    ///   and that it has a content type defined.
    /// * This also assumes the role_user_assignments endpoint is user
    ///   accessible and filterable.
    /// * The role_user_assignments endpoint behaves differently for
    ///   evaluating a superuser vs a user for access.
    pub(super) async fn assignment_filtering_as_user(&self) -> AppResult<()> {
        let role_definition = self.role_definition(NAMESPACE_OWNER_ROLE).await?;
        let names = ResourceNames::random();
        let user = self.create_user_session(&names).await?;
        let namespace = self.random_namespace().await?;
        let object_id = namespace.id.to_string();

        let assignment = self
            .admin()
            .assign_user_role(
                user.user_id,
                &AssignRoleInput::scoped(role_definition.id, None, object_id.as_str()),
            )
            .await?;
        info!(
            user_id = user.user_id,
            assignment_id = assignment.id,
            namespace = %namespace.name,
            "assigned namespace owner"
        );

        let filters = [
            AssignmentFilter::for_object(object_id.as_str()),
            AssignmentFilter::for_object(object_id.as_str())
                .with_content_type_model(ContentType::Namespace.model()),
        ];
        for filter in &filters {
            let page = user.session.list_user_assignments(filter).await?;
            ensure(page.count == 1, || {
                format!(
                    "expected 1 assignment for filter {:?}, found {}",
                    filter.query_pairs(),
                    page.count
                )
            })?;

            let found = page.first().map(|row| row.id);
            ensure(found == Some(assignment.id), || {
                format!(
                    "expected assignment {} for filter {:?}, found {found:?}",
                    assignment.id,
                    filter.query_pairs()
                )
            })?;
        }

        Ok(())
    }
}
