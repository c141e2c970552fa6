use std::sync::Arc;

use galaxy_rbac_application::{GalaxyApi, GalaxySessions};
use galaxy_rbac_core::{AppResult, Credentials, GalaxyAuth};
use tracing::debug;
use url::Url;

use crate::{HttpGalaxyClient, TaskPolling};

/// Opens HTTP sessions that share one connection pool.
#[derive(Clone)]
pub struct HttpGalaxySessions {
    admin: Arc<HttpGalaxyClient>,
}

impl HttpGalaxySessions {
    /// Creates the session factory with the administrator's authentication.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        api_root: Url,
        admin_auth: GalaxyAuth,
        polling: TaskPolling,
    ) -> Self {
        Self {
            admin: Arc::new(HttpGalaxyClient::new(
                http_client,
                api_root,
                admin_auth,
                polling,
            )),
        }
    }
}

impl GalaxySessions for HttpGalaxySessions {
    fn admin(&self) -> Arc<dyn GalaxyApi> {
        self.admin.clone()
    }

    fn login(&self, credentials: &Credentials) -> AppResult<Arc<dyn GalaxyApi>> {
        debug!(username = %credentials.username(), "opening user session");
        Ok(Arc::new(
            self.admin.with_auth(GalaxyAuth::Basic(credentials.clone())),
        ))
    }
}
