use std::collections::HashSet;

use galaxy_rbac_core::{AppResult, ensure};

use super::ScenarioService;

const NATIVE_ROLE_PREFIX: &str = "galaxy";

impl ScenarioService {
    /// Every native `galaxy*` role has a role definition with the same name.
    pub(super) async fn roledefs_match_native_roles(&self) -> AppResult<()> {
        let admin = self.admin();
        let native_roles = admin.list_native_roles(NATIVE_ROLE_PREFIX).await?;
        let role_definitions = admin.list_role_definitions().await?;

        let defined: HashSet<&str> = role_definitions
            .iter()
            .map(|definition| definition.name.as_str())
            .collect();
        let missing: Vec<&str> = native_roles
            .iter()
            .map(|role| role.name.as_str())
            .filter(|name| !defined.contains(name))
            .collect();

        ensure(missing.is_empty(), || {
            format!(
                "native roles without role definitions: {}",
                missing.join(", ")
            )
        })
    }
}
