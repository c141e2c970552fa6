use std::sync::Arc;

use galaxy_rbac_core::{AppResult, Credentials};

use super::{ContentPort, PrincipalPort, RbacPort, SettingsPort, TaskPort};

/// Full API surface of one authenticated session.
pub trait GalaxyApi: PrincipalPort + RbacPort + ContentPort + TaskPort + SettingsPort {}

impl<T> GalaxyApi for T where T: PrincipalPort + RbacPort + ContentPort + TaskPort + SettingsPort {}

/// Factory for authenticated sessions.
pub trait GalaxySessions: Send + Sync {
    /// Returns the administrator session.
    fn admin(&self) -> Arc<dyn GalaxyApi>;

    /// Opens a session authenticated with basic credentials.
    fn login(&self, credentials: &Credentials) -> AppResult<Arc<dyn GalaxyApi>>;
}
