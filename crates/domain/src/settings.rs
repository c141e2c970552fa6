use serde::Deserialize;
use serde_json::{Map, Value};

const ALLOW_LOCAL_RESOURCE_MANAGEMENT: &str = "ALLOW_LOCAL_RESOURCE_MANAGEMENT";
const REQUIRE_CONTENT_APPROVAL: &str = "GALAXY_REQUIRE_CONTENT_APPROVAL";

/// Server feature settings from `_ui/v1/settings/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ServerSettings(Map<String, Value>);

impl ServerSettings {
    /// Creates settings from raw key/value pairs.
    #[must_use]
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Looks up a boolean setting, ignoring key case.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .and_then(|(_, value)| value.as_bool())
    }

    /// Local users, teams and organizations may be created unless explicitly disabled.
    #[must_use]
    pub fn allows_local_resource_management(&self) -> bool {
        self.flag(ALLOW_LOCAL_RESOURCE_MANAGEMENT) != Some(false)
    }

    /// Uploads land in staging and need certification only when explicitly enabled.
    #[must_use]
    pub fn requires_content_approval(&self) -> bool {
        self.flag(REQUIRE_CONTENT_APPROVAL) == Some(true)
    }
}
