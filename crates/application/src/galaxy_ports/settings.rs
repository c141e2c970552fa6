use async_trait::async_trait;

use galaxy_rbac_core::AppResult;
use galaxy_rbac_domain::ServerSettings;

/// Port for server feature settings.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    /// Reads the server feature settings.
    async fn server_settings(&self) -> AppResult<ServerSettings>;
}
